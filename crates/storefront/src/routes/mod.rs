//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//!
//! # Catalog
//! GET  /products               - Listing (?category=&q=&view=grid|list)
//! GET  /product/{id}           - Product detail
//! GET  /{category-slug}        - Category page, one route per category
//!
//! # Cart (HTMX fragments, redirect to /cart for plain form posts)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add to cart (count badge fragment)
//! POST /cart/update            - Set quantity (cart items fragment)
//! POST /cart/adjust            - Step quantity up or down (cart items fragment)
//! POST /cart/remove            - Remove line (cart items fragment)
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Information
//! GET  /help                   - Help centre and FAQ
//! GET  /about                  - About page (markdown)
//! GET  /same-day-delivery      - Same-day delivery (markdown + products)
//! GET  /store-locator          - Store list (?q=city or address)
//! GET  /track-order            - Order tracking (?order_id=)
//! ```

pub mod cart;
pub mod categories;
pub mod home;
pub mod pages;
pub mod products;

use axum::{
    Router,
    extract::{Query, State},
    routing::{get, post},
};
use lk_printers_core::{Cart, Category, Price};

use crate::data::{MenuSection, SupportContact};
use crate::models::SessionCart;
use crate::state::AppState;

/// Link to a category page.
#[derive(Clone)]
pub struct CategoryLink {
    pub slug: &'static str,
    pub name: &'static str,
}

impl From<Category> for CategoryLink {
    fn from(category: Category) -> Self {
        Self {
            slug: category.slug(),
            name: category.name(),
        }
    }
}

/// A main navigation entry with its optional mega-menu.
#[derive(Clone)]
pub struct NavView {
    pub name: String,
    pub href: String,
    pub sections: Vec<MenuSection>,
}

/// Data every full page needs: header, navigation and footer.
#[derive(Clone)]
pub struct Layout {
    pub navigation: Vec<NavView>,
    pub categories: Vec<CategoryLink>,
    pub cart_count: u64,
    pub support: SupportContact,
    /// Formatted free-shipping threshold for the promo strip.
    pub free_shipping_from: String,
}

impl Layout {
    #[must_use]
    pub fn new(state: &AppState, cart: &Cart) -> Self {
        let site = state.site();
        let navigation = site
            .navigation
            .iter()
            .map(|link| NavView {
                name: link.name.clone(),
                href: link.href.clone(),
                sections: site
                    .mega_menu(&link.name)
                    .map(|m| m.sections.clone())
                    .unwrap_or_default(),
            })
            .collect();

        Self {
            navigation,
            categories: Category::ALL.into_iter().map(CategoryLink::from).collect(),
            cart_count: cart.item_count(),
            support: site.support.clone(),
            free_shipping_from: format_price(state, state.shipping().free_shipping_threshold),
        }
    }
}

/// Format a price in the catalog currency.
#[must_use]
pub fn format_price(state: &AppState, price: Price) -> String {
    price.display(state.catalog().currency())
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/adjust", post(cart::adjust))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// One route per category slug.
pub fn category_routes() -> Router<AppState> {
    Category::ALL
        .into_iter()
        .fold(Router::new(), |router, category| {
            router.route(
                &format!("/{}", category.slug()),
                get(
                    move |state: State<AppState>,
                          cart: SessionCart,
                          query: Query<categories::CategoryQuery>| {
                        categories::show(category, state, cart, query)
                    },
                ),
            )
        })
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/products", get(products::index))
        .route("/product/{id}", get(products::show))
        .nest("/cart", cart_routes())
        .merge(category_routes())
        .merge(pages::router())
        .fallback(pages::not_found)
}
