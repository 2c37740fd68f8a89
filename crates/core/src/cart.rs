//! The cart ledger.
//!
//! A [`Cart`] is an ordered list of [`CartLine`]s, at most one per product.
//! Prices are never stored on the cart: [`Cart::totals`] derives subtotal,
//! shipping and total from the catalog every time it is called.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Product};
use crate::types::{Price, ProductId};

/// Errors returned by cart mutations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Quantity to add was below 1 (or above `u32::MAX`).
    #[error("invalid quantity {quantity}: must be at least 1")]
    InvalidQuantity {
        /// The rejected quantity.
        quantity: i64,
    },
    /// The cart has no line for this product.
    #[error("product {0} is not in the cart")]
    ProductNotFound(ProductId),
    /// Two lines for the same product (only possible in untrusted input).
    #[error("duplicate cart line for product {0}")]
    DuplicateLine(ProductId),
}

/// One product and the quantity wanted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: NonZeroU32,
}

impl CartLine {
    /// Line price for a unit price.
    #[must_use]
    pub fn line_price(&self, unit_price: Price) -> Price {
        unit_price.times(self.quantity.get())
    }
}

/// Observable cart state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartState {
    /// No lines; the storefront shows a "browse products" prompt.
    Empty,
    /// At least one line.
    Populated,
}

/// Shipping rules: free at or above a threshold, flat fee below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingPolicy {
    pub free_shipping_threshold: Price,
    pub flat_fee: Price,
}

impl ShippingPolicy {
    /// Shipping charged for a subtotal.
    #[must_use]
    pub fn shipping_for(&self, subtotal: Price) -> Price {
        if subtotal >= self.free_shipping_threshold {
            Price::ZERO
        } else {
            self.flat_fee
        }
    }
}

impl Default for ShippingPolicy {
    /// ₹99 shipping, free from ₹999.
    fn default() -> Self {
        Self {
            free_shipping_threshold: Price::from_major(999),
            flat_fee: Price::from_major(99),
        }
    }
}

/// Totals derived from a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartTotals {
    pub subtotal: Price,
    pub shipping: Price,
    pub total: Price,
    pub free_shipping_threshold: Price,
}

impl CartTotals {
    #[must_use]
    pub fn qualifies_for_free_shipping(&self) -> bool {
        self.subtotal >= self.free_shipping_threshold
    }

    /// How much more the customer must add to get free shipping.
    #[must_use]
    pub fn amount_to_free_shipping(&self) -> Price {
        self.free_shipping_threshold.saturating_sub(self.subtotal)
    }
}

/// A shopping cart.
///
/// Lines keep insertion order. Adding a product that is already present
/// increases its quantity instead of adding a second line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add `quantity` of a product, merging into an existing line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] if `quantity` is below 1. The
    /// cart is left unchanged.
    pub fn add_item(&mut self, product_id: ProductId, quantity: i64) -> Result<CartLine, CartError> {
        let added = positive_quantity(quantity).ok_or(CartError::InvalidQuantity { quantity })?;

        if let Some(line) = self.line_mut(product_id) {
            line.quantity = line.quantity.saturating_add(added.get());
            return Ok(*line);
        }

        let line = CartLine {
            product_id,
            quantity: added,
        };
        self.lines.push(line);
        Ok(line)
    }

    /// Set a line's quantity. Values below 1 are clamped to 1.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ProductNotFound`] if the product has no line.
    pub fn set_quantity(
        &mut self,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<NonZeroU32, CartError> {
        let line = self
            .line_mut(product_id)
            .ok_or(CartError::ProductNotFound(product_id))?;
        line.quantity = clamped_quantity(quantity);
        Ok(line.quantity)
    }

    /// Step a line's quantity up or down. Never drops below 1.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ProductNotFound`] if the product has no line.
    pub fn adjust_quantity(
        &mut self,
        product_id: ProductId,
        delta: i64,
    ) -> Result<NonZeroU32, CartError> {
        let line = self
            .line_mut(product_id)
            .ok_or(CartError::ProductNotFound(product_id))?;
        let target = i64::from(line.quantity.get()).saturating_add(delta);
        line.quantity = clamped_quantity(target);
        Ok(line.quantity)
    }

    /// Remove a product's line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ProductNotFound`] if the product has no line; the
    /// cart is unchanged.
    pub fn remove_item(&mut self, product_id: ProductId) -> Result<CartLine, CartError> {
        let position = self
            .lines
            .iter()
            .position(|l| l.product_id == product_id)
            .ok_or(CartError::ProductNotFound(product_id))?;
        Ok(self.lines.remove(position))
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in display order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn state(&self) -> CartState {
        if self.lines.is_empty() {
            CartState::Empty
        } else {
            CartState::Populated
        }
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity.get())).sum()
    }

    /// Lines paired with their catalog product. Lines whose product is not
    /// in the catalog are skipped.
    pub fn priced_lines<'a>(
        &'a self,
        catalog: &'a Catalog,
    ) -> impl Iterator<Item = (&'a CartLine, &'a Product)> {
        self.lines
            .iter()
            .filter_map(|line| catalog.get(line.product_id).map(|p| (line, p)))
    }

    /// Subtotal, shipping and total at current catalog prices.
    #[must_use]
    pub fn totals(&self, catalog: &Catalog, policy: &ShippingPolicy) -> CartTotals {
        let subtotal: Price = self
            .priced_lines(catalog)
            .map(|(line, product)| line.line_price(product.price))
            .sum();
        let shipping = policy.shipping_for(subtotal);

        CartTotals {
            subtotal,
            shipping,
            total: subtotal + shipping,
            free_shipping_threshold: policy.free_shipping_threshold,
        }
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| l.product_id == product_id)
    }
}

impl TryFrom<Vec<CartLine>> for Cart {
    type Error = CartError;

    fn try_from(lines: Vec<CartLine>) -> Result<Self, Self::Error> {
        for (i, line) in lines.iter().enumerate() {
            if lines.iter().skip(i + 1).any(|l| l.product_id == line.product_id) {
                return Err(CartError::DuplicateLine(line.product_id));
            }
        }
        Ok(Self { lines })
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

fn positive_quantity(quantity: i64) -> Option<NonZeroU32> {
    u32::try_from(quantity).ok().and_then(NonZeroU32::new)
}

fn clamped_quantity(quantity: i64) -> NonZeroU32 {
    let clamped = quantity.clamp(1, i64::from(u32::MAX));
    positive_quantity(clamped).unwrap_or(NonZeroU32::MIN)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::tests::product;
    use crate::types::{Category, CurrencyCode};

    const A: ProductId = ProductId::new(1);
    const B: ProductId = ProductId::new(2);

    fn catalog() -> Catalog {
        Catalog::new(
            CurrencyCode::INR,
            vec![
                product(1, "A", Category::Apparel, 349),
                product(2, "B", Category::Stationery, 199),
                product(3, "C", Category::Drinkware, 999),
            ],
        )
        .unwrap()
    }

    fn qty(cart: &Cart, id: ProductId) -> u32 {
        cart.line(id).unwrap().quantity.get()
    }

    #[test]
    fn test_new_cart_is_empty() {
        let cart = Cart::new();
        assert_eq!(cart.state(), CartState::Empty);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_add_merges_lines() {
        let mut cart = Cart::new();
        cart.add_item(A, 2).unwrap();
        cart.add_item(A, 3).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(qty(&cart, A), 5);
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut cart = Cart::new();
        cart.add_item(B, 1).unwrap();
        cart.add_item(A, 1).unwrap();
        cart.add_item(B, 1).unwrap();
        let order: Vec<ProductId> = cart.lines().iter().map(|l| l.product_id).collect();
        assert_eq!(order, vec![B, A]);
    }

    #[test]
    fn test_add_rejects_non_positive_quantity() {
        let mut cart = Cart::new();
        assert_eq!(
            cart.add_item(A, 0),
            Err(CartError::InvalidQuantity { quantity: 0 })
        );
        assert_eq!(
            cart.add_item(A, -3),
            Err(CartError::InvalidQuantity { quantity: -3 })
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_saturates() {
        let mut cart = Cart::new();
        cart.add_item(A, i64::from(u32::MAX)).unwrap();
        cart.add_item(A, 10).unwrap();
        assert_eq!(qty(&cart, A), u32::MAX);
    }

    #[test]
    fn test_set_quantity_clamps_to_one() {
        let mut cart = Cart::new();
        cart.add_item(A, 4).unwrap();
        assert_eq!(cart.set_quantity(A, 0).unwrap().get(), 1);
        assert_eq!(cart.set_quantity(A, -10).unwrap().get(), 1);
        assert_eq!(cart.set_quantity(A, 7).unwrap().get(), 7);
        assert_eq!(cart.state(), CartState::Populated);
    }

    #[test]
    fn test_set_quantity_on_missing_line() {
        let mut cart = Cart::new();
        cart.add_item(A, 1).unwrap();
        assert_eq!(cart.set_quantity(B, 3), Err(CartError::ProductNotFound(B)));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_adjust_floors_at_one() {
        let mut cart = Cart::new();
        cart.add_item(A, 2).unwrap();
        assert_eq!(cart.adjust_quantity(A, -1).unwrap().get(), 1);
        assert_eq!(cart.adjust_quantity(A, -1).unwrap().get(), 1);
        assert_eq!(cart.adjust_quantity(A, 1).unwrap().get(), 2);
        assert_eq!(cart.state(), CartState::Populated);
    }

    #[test]
    fn test_remove_returns_to_empty() {
        let mut cart = Cart::new();
        cart.add_item(A, 1).unwrap();
        let removed = cart.remove_item(A).unwrap();
        assert_eq!(removed.product_id, A);
        assert_eq!(cart.state(), CartState::Empty);
    }

    #[test]
    fn test_remove_missing_is_reported_and_harmless() {
        let mut cart = Cart::new();
        cart.add_item(A, 1).unwrap();
        assert_eq!(cart.remove_item(B), Err(CartError::ProductNotFound(B)));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_totals_below_threshold() {
        let mut cart = Cart::new();
        cart.add_item(A, 2).unwrap();
        cart.add_item(B, 1).unwrap();
        let totals = cart.totals(&catalog(), &ShippingPolicy::default());
        assert_eq!(totals.subtotal, Price::from_major(897));
        assert_eq!(totals.shipping, Price::from_major(99));
        assert_eq!(totals.total, Price::from_major(996));
        assert!(!totals.qualifies_for_free_shipping());
        assert_eq!(totals.amount_to_free_shipping(), Price::from_major(102));
    }

    #[test]
    fn test_totals_at_threshold_ship_free() {
        let mut cart = Cart::new();
        cart.add_item(ProductId::new(3), 1).unwrap();
        let totals = cart.totals(&catalog(), &ShippingPolicy::default());
        assert_eq!(totals.subtotal, Price::from_major(999));
        assert_eq!(totals.shipping, Price::ZERO);
        assert_eq!(totals.total, Price::from_major(999));
        assert_eq!(totals.amount_to_free_shipping(), Price::ZERO);
    }

    #[test]
    fn test_totals_track_mutations() {
        let catalog = catalog();
        let policy = ShippingPolicy::default();
        let mut cart = Cart::new();
        cart.add_item(A, 1).unwrap();
        assert_eq!(cart.totals(&catalog, &policy).subtotal, Price::from_major(349));
        cart.set_quantity(A, 3).unwrap();
        assert_eq!(cart.totals(&catalog, &policy).subtotal, Price::from_major(1047));
        assert_eq!(cart.totals(&catalog, &policy).shipping, Price::ZERO);
    }

    #[test]
    fn test_totals_skip_unknown_products() {
        let mut cart = Cart::new();
        cart.add_item(A, 1).unwrap();
        cart.add_item(ProductId::new(404), 5).unwrap();
        let totals = cart.totals(&catalog(), &ShippingPolicy::default());
        assert_eq!(totals.subtotal, Price::from_major(349));
        assert_eq!(cart.priced_lines(&catalog()).count(), 1);
    }

    #[test]
    fn test_item_count_sums_quantities() {
        let mut cart = Cart::new();
        cart.add_item(A, 2).unwrap();
        cart.add_item(B, 3).unwrap();
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_serde_rejects_duplicate_lines() {
        let json = r#"[{"product_id":1,"quantity":1},{"product_id":1,"quantity":2}]"#;
        assert!(serde_json::from_str::<Cart>(json).is_err());
    }

    #[test]
    fn test_serde_rejects_zero_quantity() {
        let json = r#"[{"product_id":1,"quantity":0}]"#;
        assert!(serde_json::from_str::<Cart>(json).is_err());
    }

    #[test]
    fn test_serde_round_trip_preserves_order() {
        let mut cart = Cart::new();
        cart.add_item(B, 1).unwrap();
        cart.add_item(A, 4).unwrap();
        let json = serde_json::to_string(&cart).unwrap();
        assert_eq!(
            json,
            r#"[{"product_id":2,"quantity":1},{"product_id":1,"quantity":4}]"#
        );
        assert_eq!(serde_json::from_str::<Cart>(&json).unwrap(), cart);
    }
}
