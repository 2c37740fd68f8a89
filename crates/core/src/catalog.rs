//! Immutable product catalog and the filter engine.
//!
//! A [`Catalog`] is built once from static data and never mutated. Listing
//! pages narrow it with a [`CatalogFilter`], which is a pure function of the
//! catalog, a [`CategorySelector`] and a free-text query.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{Category, CategorySelector, CurrencyCode, Price, ProductId, Rating};

/// Errors raised while assembling a catalog.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Two products share an id.
    #[error("duplicate product id {0}")]
    DuplicateProductId(ProductId),
    /// A product has a negative price or list price.
    #[error("product {0} has a negative price")]
    NegativePrice(ProductId),
    /// A product has an empty name.
    #[error("product {0} has an empty name")]
    EmptyName(ProductId),
}

/// A purchasable product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Selling price per unit.
    pub price: Price,
    /// List price shown struck through next to the selling price.
    pub original_price: Price,
    pub category: Category,
    pub rating: Rating,
    pub review_count: u32,
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    /// Merchandising badge such as "Best Seller".
    #[serde(default)]
    pub badge: Option<String>,
    /// Eligible for same-day delivery.
    #[serde(default)]
    pub same_day: bool,
}

impl Product {
    /// Percentage saved against the list price, rounded to the nearest whole
    /// percent. `None` when there is no saving.
    #[must_use]
    pub fn discount_percent(&self) -> Option<u8> {
        let list = self.original_price.minor_units();
        let sale = self.price.minor_units();
        if list <= 0 || sale >= list {
            return None;
        }
        let saved = list - sale;
        let percent = (saved.saturating_mul(100) + list / 2) / list;
        u8::try_from(percent).ok().filter(|p| *p > 0)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.price.is_negative() || self.original_price.is_negative() {
            return Err(CatalogError::NegativePrice(self.id));
        }
        if self.name.trim().is_empty() {
            return Err(CatalogError::EmptyName(self.id));
        }
        Ok(())
    }
}

/// On-disk shape of a catalog document.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub currency: CurrencyCode,
    pub products: Vec<Product>,
}

/// The static set of products for a storefront.
///
/// Catalog order is the order products were supplied in and is preserved by
/// every query.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    currency: CurrencyCode,
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog, checking product ids are unique and prices are sane.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError`] found.
    pub fn new(currency: CurrencyCode, products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            product.validate()?;
            if index.insert(product.id, position).is_some() {
                return Err(CatalogError::DuplicateProductId(product.id));
            }
        }

        Ok(Self {
            currency,
            products,
            index,
        })
    }

    /// Currency every price in the catalog is expressed in.
    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.index.get(&id).and_then(|&i| self.products.get(i))
    }

    /// Run a filter over the catalog.
    #[must_use]
    pub fn filter(&self, filter: &CatalogFilter) -> Vec<&Product> {
        filter.apply(&self.products)
    }

    /// Other products in the same category, in catalog order.
    pub fn related<'a>(&'a self, product: &'a Product) -> impl Iterator<Item = &'a Product> {
        self.products
            .iter()
            .filter(move |p| p.category == product.category && p.id != product.id)
    }

    /// Products for the home page: badged products first, then the rest by
    /// review count (most reviewed first).
    #[must_use]
    pub fn best_sellers(&self, limit: usize) -> Vec<&Product> {
        let mut ranked: Vec<&Product> = self.products.iter().collect();
        // Stable sort keeps catalog order between equal keys
        ranked.sort_by(|a, b| {
            b.badge
                .is_some()
                .cmp(&a.badge.is_some())
                .then(b.review_count.cmp(&a.review_count))
        });
        ranked.truncate(limit);
        ranked
    }

    /// Products eligible for same-day delivery.
    pub fn same_day(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.same_day)
    }

    /// Number of products per category, in [`Category::ALL`] order, skipping
    /// empty categories.
    #[must_use]
    pub fn category_counts(&self) -> Vec<(Category, usize)> {
        Category::ALL
            .into_iter()
            .map(|c| (c, self.products.iter().filter(|p| p.category == c).count()))
            .filter(|(_, n)| *n > 0)
            .collect()
    }
}

impl TryFrom<CatalogDocument> for Catalog {
    type Error = CatalogError;

    fn try_from(doc: CatalogDocument) -> Result<Self, Self::Error> {
        Self::new(doc.currency, doc.products)
    }
}

/// Category plus free-text search over product names.
///
/// ```
/// use lk_printers_core::{CatalogFilter, Category};
///
/// let filter = CatalogFilter::new(Category::Apparel.into(), "Hood");
/// assert_eq!(filter.query(), "hood");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    category: CategorySelector,
    query: String,
}

impl CatalogFilter {
    /// Create a filter. The query is lower-cased once here and otherwise
    /// matched as given.
    #[must_use]
    pub fn new(category: CategorySelector, query: &str) -> Self {
        Self {
            category,
            query: query.to_lowercase(),
        }
    }

    /// Filter that only selects a category.
    #[must_use]
    pub fn category(category: CategorySelector) -> Self {
        Self::new(category, "")
    }

    #[must_use]
    pub const fn selector(&self) -> CategorySelector {
        self.category
    }

    /// The normalized query.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether a single product passes the filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.category.matches(product.category)
            && (self.query.is_empty() || product.name.to_lowercase().contains(&self.query))
    }

    /// The ordered subsequence of `products` that pass the filter.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn product(id: u32, name: &str, category: Category, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            price: Price::from_major(price),
            original_price: Price::from_major(price + 100),
            category,
            rating: Rating::new(4.5).unwrap(),
            review_count: 100,
            image: "/static/images/placeholder.svg".to_string(),
            description: String::new(),
            features: Vec::new(),
            badge: None,
            same_day: false,
        }
    }

    fn sample_catalog() -> Catalog {
        Catalog::new(
            CurrencyCode::INR,
            vec![
                product(1, "Premium Visiting Cards", Category::Stationery, 199),
                product(2, "Round Neck T-Shirts", Category::Apparel, 349),
                product(3, "Custom Photo Mugs", Category::PhotoGifts, 249),
                product(7, "Polo T-Shirts", Category::Apparel, 449),
                product(8, "Custom Hoodies", Category::Apparel, 899),
                product(6, "Premium Notebook", Category::Stationery, 399),
            ],
        )
        .unwrap()
    }

    fn ids(products: &[&Product]) -> Vec<u32> {
        products.iter().map(|p| p.id.as_u32()).collect()
    }

    #[test]
    fn test_all_with_empty_query_is_identity() {
        let catalog = sample_catalog();
        let filtered = catalog.filter(&CatalogFilter::default());
        assert_eq!(ids(&filtered), vec![1, 2, 3, 7, 8, 6]);
    }

    #[test]
    fn test_category_keeps_catalog_order() {
        let catalog = sample_catalog();
        let filtered = catalog.filter(&CatalogFilter::category(Category::Apparel.into()));
        assert_eq!(ids(&filtered), vec![2, 7, 8]);
        assert!(filtered.iter().all(|p| p.category == Category::Apparel));
    }

    #[test]
    fn test_query_is_case_insensitive_substring() {
        let catalog = sample_catalog();
        let filtered = catalog.filter(&CatalogFilter::new(CategorySelector::All, "T-SHIRT"));
        assert_eq!(ids(&filtered), vec![2, 7]);

        let filtered = catalog.filter(&CatalogFilter::new(CategorySelector::All, "premium"));
        assert_eq!(ids(&filtered), vec![1, 6]);
    }

    #[test]
    fn test_query_whitespace_is_significant() {
        let catalog = sample_catalog();
        let filtered = catalog.filter(&CatalogFilter::new(CategorySelector::All, "mugs "));
        assert!(filtered.is_empty());

        let filtered = catalog.filter(&CatalogFilter::new(CategorySelector::All, "   "));
        assert!(filtered.is_empty());

        // Inner spaces are part of the name
        let filtered = catalog.filter(&CatalogFilter::new(CategorySelector::All, "photo mugs"));
        assert_eq!(ids(&filtered), vec![3]);
    }

    #[test]
    fn test_category_and_query_combine() {
        let catalog = sample_catalog();
        let filter = CatalogFilter::new(Category::Stationery.into(), "note");
        assert_eq!(ids(&catalog.filter(&filter)), vec![6]);

        let filter = CatalogFilter::new(Category::PhotoGifts.into(), "hoodie");
        assert!(catalog.filter(&filter).is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let catalog = sample_catalog();
        let filter = CatalogFilter::new(Category::Apparel.into(), "shirt");
        assert_eq!(catalog.filter(&filter), catalog.filter(&filter));
    }

    #[test]
    fn test_apparel_only_from_slug() {
        let catalog = Catalog::new(
            CurrencyCode::INR,
            vec![
                product(1, "A", Category::Apparel, 349),
                product(2, "B", Category::Stationery, 199),
            ],
        )
        .unwrap();
        let filtered = catalog.filter(&CatalogFilter::category(CategorySelector::parse("apparel")));
        assert_eq!(ids(&filtered), vec![1]);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = Catalog::new(
            CurrencyCode::INR,
            vec![
                product(1, "A", Category::Apparel, 10),
                product(1, "B", Category::Apparel, 20),
            ],
        );
        assert_eq!(
            result.unwrap_err(),
            CatalogError::DuplicateProductId(ProductId::new(1))
        );
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut bad = product(4, "Refund", Category::Packaging, 0);
        bad.price = Price::from_minor(-1);
        assert!(matches!(
            Catalog::new(CurrencyCode::INR, vec![bad]),
            Err(CatalogError::NegativePrice(_))
        ));
    }

    #[test]
    fn test_get_and_related() {
        let catalog = sample_catalog();
        let tee = catalog.get(ProductId::new(2)).unwrap();
        assert_eq!(tee.name, "Round Neck T-Shirts");
        let related: Vec<u32> = catalog.related(tee).map(|p| p.id.as_u32()).collect();
        assert_eq!(related, vec![7, 8]);
        assert!(catalog.get(ProductId::new(99)).is_none());
    }

    #[test]
    fn test_discount_percent() {
        let mut p = product(1, "Visiting Cards", Category::Stationery, 199);
        p.original_price = Price::from_major(299);
        assert_eq!(p.discount_percent(), Some(33));

        p.original_price = p.price;
        assert_eq!(p.discount_percent(), None);
    }

    #[test]
    fn test_best_sellers_prefers_badges_then_reviews() {
        let mut products = vec![
            product(1, "A", Category::Apparel, 10),
            product(2, "B", Category::Apparel, 10),
            product(3, "C", Category::Apparel, 10),
        ];
        products[0].review_count = 10;
        products[1].review_count = 500;
        products[2].review_count = 50;
        products[2].badge = Some("Popular".to_string());
        let catalog = Catalog::new(CurrencyCode::INR, products).unwrap();
        assert_eq!(ids(&catalog.best_sellers(2)), vec![3, 2]);
    }

    #[test]
    fn test_document_deserializes() {
        let json = r#"{
            "currency": "INR",
            "products": [{
                "id": 5,
                "name": "Desktop Calendar 2026",
                "price": 29900,
                "original_price": 44900,
                "category": "calendars",
                "rating": 4.8,
                "review_count": 450,
                "image": "/static/images/placeholder.svg"
            }]
        }"#;
        let doc: CatalogDocument = serde_json::from_str(json).unwrap();
        let catalog = Catalog::try_from(doc).unwrap();
        let calendar = catalog.get(ProductId::new(5)).unwrap();
        assert_eq!(calendar.category, Category::CalendarsDiaries);
        assert_eq!(calendar.price, Price::from_major(299));
        assert!(!calendar.same_day);
    }
}
