//! Core types for the LK Printers storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod id;
pub mod price;
pub mod rating;

pub use category::{Category, CategorySelector, UnknownCategory};
pub use id::*;
pub use price::{CurrencyCode, Price};
pub use rating::{Rating, RatingError};
