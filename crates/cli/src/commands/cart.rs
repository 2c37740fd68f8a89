//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! lk-cli cart quote 1:2 8:1 1
//! ```
//!
//! Lines are added in order to an empty cart, so repeating a product merges
//! into one line. Shipping uses the storefront defaults.

use std::path::Path;

use lk_printers_core::{Cart, CartTotals, Catalog, ProductId, ShippingPolicy};
use lk_printers_storefront::data;

use super::CommandError;

/// A `PRODUCT_ID[:QUANTITY]` argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineArg {
    pub product_id: ProductId,
    pub quantity: i64,
}

impl LineArg {
    /// Parse `7` or `7:3`.
    ///
    /// # Errors
    ///
    /// Returns a message if either part is not a number.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let (id, quantity) = raw.split_once(':').unwrap_or((raw, "1"));
        let product_id = id
            .trim()
            .parse::<ProductId>()
            .map_err(|_| format!("invalid product id in {raw:?}"))?;
        let quantity = quantity
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("invalid quantity in {raw:?}"))?;
        Ok(Self {
            product_id,
            quantity,
        })
    }
}

/// Build a cart from line arguments.
///
/// # Errors
///
/// Returns an error for a product missing from the catalog or a quantity
/// below 1.
pub fn build_cart(catalog: &Catalog, lines: &[LineArg]) -> Result<Cart, CommandError> {
    let mut cart = Cart::new();
    for line in lines {
        if catalog.get(line.product_id).is_none() {
            return Err(CommandError::UnknownProduct(line.product_id));
        }
        cart.add_item(line.product_id, line.quantity)?;
    }
    Ok(cart)
}

/// Price a cart and print a receipt.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or a line is rejected.
pub fn quote(data_dir: &Path, lines: &[LineArg]) -> Result<(), CommandError> {
    let catalog = data::load_catalog(data_dir)?;
    let cart = build_cart(&catalog, lines)?;
    let totals = cart.totals(&catalog, &ShippingPolicy::default());

    #[allow(clippy::print_stdout)]
    {
        let currency = catalog.currency();
        for (line, product) in cart.priced_lines(&catalog) {
            println!(
                "{:>3} x {:<28} {:>10}",
                line.quantity,
                product.name,
                line.line_price(product.price).display(currency)
            );
        }
        for row in summary(&totals, &catalog) {
            println!("{row}");
        }
    }
    Ok(())
}

/// Subtotal, shipping and total rows.
fn summary(totals: &CartTotals, catalog: &Catalog) -> Vec<String> {
    let currency = catalog.currency();
    let shipping = if totals.shipping.is_zero() {
        "FREE".to_string()
    } else {
        totals.shipping.display(currency)
    };
    vec![
        format!("{:<34} {:>10}", "Subtotal", totals.subtotal.display(currency)),
        format!("{:<34} {shipping:>10}", "Shipping"),
        format!("{:<34} {:>10}", "Total", totals.total.display(currency)),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use lk_printers_core::{CartError, Price};

    fn catalog() -> Catalog {
        let json = r#"{"products": [
            {"id": 1, "name": "Visiting Cards", "price": 19900, "original_price": 29900,
             "category": "stationery", "rating": 4.8, "review_count": 10, "image": "/x.svg"},
            {"id": 8, "name": "Custom Hoodies", "price": 89900, "original_price": 129900,
             "category": "apparel", "rating": 4.8, "review_count": 10, "image": "/x.svg"}
        ]}"#;
        let doc: lk_printers_core::catalog::CatalogDocument = serde_json::from_str(json).unwrap();
        Catalog::try_from(doc).unwrap()
    }

    #[test]
    fn test_parse_line_arg() {
        assert_eq!(
            LineArg::parse("7:3").unwrap(),
            LineArg {
                product_id: ProductId::new(7),
                quantity: 3
            }
        );
        assert_eq!(LineArg::parse("7").unwrap().quantity, 1);
        assert!(LineArg::parse("seven:1").is_err());
        assert!(LineArg::parse("7:lots").is_err());
    }

    #[test]
    fn test_repeated_products_merge() {
        let lines = [
            LineArg::parse("1:2").unwrap(),
            LineArg::parse("8").unwrap(),
            LineArg::parse("1").unwrap(),
        ];
        let cart = build_cart(&catalog(), &lines).unwrap();
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.item_count(), 4);
    }

    #[test]
    fn test_unknown_product_is_rejected() {
        let lines = [LineArg::parse("99").unwrap()];
        assert!(matches!(
            build_cart(&catalog(), &lines),
            Err(CommandError::UnknownProduct(id)) if id == ProductId::new(99)
        ));
    }

    #[test]
    fn test_zero_quantity_is_rejected() {
        let lines = [LineArg::parse("1:0").unwrap()];
        assert!(matches!(
            build_cart(&catalog(), &lines),
            Err(CommandError::Cart(CartError::InvalidQuantity { quantity: 0 }))
        ));
    }

    #[test]
    fn test_summary_rows() {
        let catalog = catalog();
        let cart = build_cart(&catalog, &[LineArg::parse("1:2").unwrap()]).unwrap();
        let totals = cart.totals(&catalog, &ShippingPolicy::default());
        assert_eq!(totals.total, Price::from_major(398 + 99));

        let rows = summary(&totals, &catalog);
        assert!(rows.first().unwrap().ends_with("₹398"));
        assert!(rows.get(1).unwrap().ends_with("₹99"));
        assert!(rows.get(2).unwrap().ends_with("₹497"));
    }

    #[test]
    fn test_free_shipping_row() {
        let catalog = catalog();
        let cart = build_cart(&catalog, &[LineArg::parse("8:2").unwrap()]).unwrap();
        let totals = cart.totals(&catalog, &ShippingPolicy::default());
        let rows = summary(&totals, &catalog);
        assert!(rows.get(1).unwrap().ends_with("FREE"));
    }
}
