//! Session-backed models for storefront.

pub mod session;

pub use session::{SessionCart, keys as session_keys};
