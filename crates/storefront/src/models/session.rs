//! Session-stored shopping cart.
//!
//! Each browser session owns exactly one [`Cart`]. Handlers extract a
//! [`SessionCart`], mutate it, and call [`SessionCart::save`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use lk_printers_core::Cart;
use tower_sessions::Session;

use crate::error::AppError;

/// Session keys.
pub mod keys {
    /// Key for the shopper's cart.
    pub const CART: &str = "cart";
}

/// The cart belonging to the current session.
///
/// ```rust,ignore
/// async fn handler(mut cart: SessionCart) -> Result<String> {
///     cart.cart_mut().add_item(ProductId::new(3), 1)?;
///     cart.save().await?;
///     Ok(cart.cart().item_count().to_string())
/// }
/// ```
pub struct SessionCart {
    session: Session,
    cart: Cart,
}

impl SessionCart {
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    /// Write the cart back to the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store rejects the write.
    pub async fn save(&self) -> Result<(), AppError> {
        self.session.insert(keys::CART, &self.cart).await?;
        Ok(())
    }
}

impl<S> FromRequestParts<S> for SessionCart
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AppError::Internal(msg.to_string()))?;

        let cart = match session.get::<Cart>(keys::CART).await {
            Ok(cart) => cart.unwrap_or_default(),
            // Undecodable carts are replaced with an empty one
            Err(tower_sessions::session::Error::SerdeJson(e)) => {
                tracing::warn!(error = %e, "Discarding undecodable session cart");
                Cart::default()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self { session, cart })
    }
}
