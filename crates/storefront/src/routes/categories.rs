//! Category landing pages.
//!
//! Each category slug gets its own top-level route (`/apparel`,
//! `/photo-gifts`, ...) showing the category copy from site data and the
//! category's products.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use lk_printers_core::{CatalogFilter, Category};
use serde::Deserialize;
use tracing::instrument;

use super::products::{ProductCard, ViewMode};
use super::{CategoryLink, Layout};
use crate::filters;
use crate::models::SessionCart;
use crate::state::AppState;

/// Category page query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryQuery {
    pub q: Option<String>,
    pub view: Option<String>,
}

/// Category page template.
#[derive(Template, WebTemplate)]
#[template(path = "categories/show.html")]
pub struct CategoryShowTemplate {
    pub layout: Layout,
    pub category: CategoryLink,
    pub title: String,
    pub description: String,
    pub products: Vec<ProductCard>,
    pub query: String,
    pub view: &'static str,
}

/// Display a category page.
#[instrument(skip(state, cart))]
pub async fn show(
    category: Category,
    State(state): State<AppState>,
    cart: SessionCart,
    Query(query): Query<CategoryQuery>,
) -> CategoryShowTemplate {
    let filter = CatalogFilter::new(category.into(), query.q.as_deref().unwrap_or_default());
    let copy = state.site().category_copy(category);

    CategoryShowTemplate {
        layout: Layout::new(&state, cart.cart()),
        category: category.into(),
        title: copy.title,
        description: copy.description,
        products: ProductCard::many(&state, state.catalog().filter(&filter)),
        query: query.q.unwrap_or_default(),
        view: ViewMode::parse(query.view.as_deref()).as_str(),
    }
}
