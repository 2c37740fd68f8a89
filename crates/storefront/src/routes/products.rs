//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use lk_printers_core::{CatalogFilter, CategorySelector, Product, ProductId};
use serde::Deserialize;
use tracing::instrument;

use super::{CategoryLink, Layout, format_price};
use crate::error::{AppError, Result};
use crate::filters;
use crate::models::SessionCart;
use crate::state::AppState;

/// Related products shown under a product.
const RELATED_LIMIT: usize = 4;

/// Product display data for cards and rows.
#[derive(Clone)]
pub struct ProductCard {
    pub id: u32,
    pub name: String,
    pub image: String,
    pub price: String,
    pub original_price: Option<String>,
    pub discount_percent: Option<u8>,
    pub rating: String,
    /// Filled and empty stars, e.g. `★★★★☆`.
    pub stars: String,
    pub review_count: u32,
    pub badge: Option<String>,
    pub category: CategoryLink,
    pub same_day: bool,
}

impl ProductCard {
    #[must_use]
    pub fn new(state: &AppState, product: &Product) -> Self {
        let full = usize::from(product.rating.full_stars().min(5));
        let discount_percent = product.discount_percent();
        Self {
            id: product.id.as_u32(),
            name: product.name.clone(),
            image: product.image.clone(),
            price: format_price(state, product.price),
            original_price: discount_percent.map(|_| format_price(state, product.original_price)),
            discount_percent,
            rating: product.rating.to_string(),
            stars: format!("{}{}", "★".repeat(full), "☆".repeat(5 - full)),
            review_count: product.review_count,
            badge: product.badge.clone(),
            category: product.category.into(),
            same_day: product.same_day,
        }
    }

    /// Cards for a list of products.
    #[must_use]
    pub fn many<'a>(state: &AppState, products: impl IntoIterator<Item = &'a Product>) -> Vec<Self> {
        products.into_iter().map(|p| Self::new(state, p)).collect()
    }
}

/// Listing layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    /// Parse the `view` query value, defaulting to grid.
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("list") => Self::List,
            _ => Self::Grid,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::List => "list",
        }
    }
}

/// Listing query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    pub category: Option<String>,
    pub q: Option<String>,
    pub view: Option<String>,
}

/// A category filter chip with its product count.
#[derive(Clone)]
pub struct CategoryChip {
    pub link: CategoryLink,
    pub count: usize,
    pub selected: bool,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub layout: Layout,
    pub products: Vec<ProductCard>,
    pub chips: Vec<CategoryChip>,
    pub all_selected: bool,
    /// Slug of the selected category, `all` when none.
    pub category: String,
    pub query: String,
    pub view: &'static str,
    pub total: usize,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub layout: Layout,
    pub product: ProductCard,
    pub description: String,
    pub features: Vec<String>,
    pub related: Vec<ProductCard>,
}

/// Display the product listing, narrowed by category and search text.
#[instrument(skip(state, cart))]
pub async fn index(
    State(state): State<AppState>,
    cart: SessionCart,
    Query(query): Query<ListingQuery>,
) -> ProductsIndexTemplate {
    let selector = CategorySelector::parse(query.category.as_deref().unwrap_or_default());
    let filter = CatalogFilter::new(selector, query.q.as_deref().unwrap_or_default());
    let view = ViewMode::parse(query.view.as_deref());

    let products = ProductCard::many(&state, state.catalog().filter(&filter));
    tracing::debug!(
        category = selector.slug(),
        query = filter.query(),
        results = products.len(),
        "Filtered catalog"
    );

    let chips = state
        .catalog()
        .category_counts()
        .into_iter()
        .map(|(category, count)| CategoryChip {
            link: category.into(),
            count,
            selected: selector == CategorySelector::Only(category),
        })
        .collect();

    ProductsIndexTemplate {
        layout: Layout::new(&state, cart.cart()),
        total: products.len(),
        products,
        chips,
        all_selected: selector == CategorySelector::All,
        category: selector.slug().to_string(),
        query: query.q.unwrap_or_default(),
        view: view.as_str(),
    }
}

/// Display a product.
///
/// # Errors
///
/// Returns 404 if the id is malformed or not in the catalog.
#[instrument(skip(state, cart))]
pub async fn show(
    State(state): State<AppState>,
    cart: SessionCart,
    Path(id): Path<String>,
) -> Result<ProductShowTemplate> {
    let product = id
        .parse::<ProductId>()
        .ok()
        .and_then(|id| state.catalog().get(id))
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let related = ProductCard::many(&state, state.catalog().related(product).take(RELATED_LIMIT));

    Ok(ProductShowTemplate {
        layout: Layout::new(&state, cart.cart()),
        product: ProductCard::new(&state, product),
        description: product.description.clone(),
        features: product.features.clone(),
        related,
    })
}

#[cfg(test)]
mod tests {
    use super::ViewMode;

    #[test]
    fn test_view_mode_parse() {
        assert_eq!(ViewMode::parse(None), ViewMode::Grid);
        assert_eq!(ViewMode::parse(Some("LIST")), ViewMode::List);
        assert_eq!(ViewMode::parse(Some("carousel")), ViewMode::Grid);
    }
}
