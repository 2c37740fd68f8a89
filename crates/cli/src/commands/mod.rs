//! Subcommand implementations.

pub mod cart;
pub mod catalog;

use lk_printers_core::CartError;
use lk_printers_storefront::data::DataError;
use thiserror::Error;

/// Errors surfaced by any subcommand.
#[derive(Debug, Error)]
pub enum CommandError {
    /// A data file could not be read or decoded.
    #[error(transparent)]
    Data(#[from] DataError),

    /// A cart line was rejected.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// A quoted product is not in the catalog.
    #[error("product {0} is not in the catalog")]
    UnknownProduct(lk_printers_core::ProductId),

    /// `catalog check` found problems.
    #[error("{0} problem(s) found in the data files")]
    Check(usize),
}
