//! LK Printers Core - catalog, filtering and cart state.
//!
//! This crate provides the types shared by every LK Printers component:
//! - `storefront` - Public-facing print-on-demand store
//! - `cli` - Command-line tools for checking catalog data and quoting carts
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP, no
//! sessions. Callers load the catalog however they like and hand it in.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, ratings and categories
//! - [`catalog`] - Immutable product catalog and the filter engine
//! - [`cart`] - The cart ledger and its derived totals

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod types;

pub use cart::{Cart, CartError, CartLine, CartState, CartTotals, ShippingPolicy};
pub use catalog::{Catalog, CatalogError, CatalogFilter, Product};
pub use types::*;
