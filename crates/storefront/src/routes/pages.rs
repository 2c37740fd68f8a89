//! Informational pages: help, about, same-day delivery, store locator,
//! order tracking and the 404 page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{Days, NaiveDate};
use serde::Deserialize;
use tracing::instrument;

use super::Layout;
use super::products::ProductCard;
use crate::content::{Highlight, Page};
use crate::data::{Faq, Store};
use crate::error::{AppError, Result};
use crate::filters;
use crate::models::SessionCart;
use crate::state::AppState;

/// Markdown page rendered inside the layout.
#[derive(Clone)]
pub struct PageView {
    pub title: String,
    pub description: String,
    pub updated_at: Option<NaiveDate>,
    pub highlights: Vec<Highlight>,
    pub content_html: String,
}

impl From<&Page> for PageView {
    fn from(page: &Page) -> Self {
        Self {
            title: page.meta.title.clone(),
            description: page.meta.description.clone().unwrap_or_default(),
            updated_at: page.meta.updated_at,
            highlights: page.meta.highlights.clone(),
            content_html: page.content_html.clone(),
        }
    }
}

/// Look up a markdown page.
fn content_page(state: &AppState, slug: &str) -> Result<PageView> {
    state
        .content()
        .get_page(slug)
        .map(PageView::from)
        .ok_or_else(|| AppError::NotFound(format!("page {slug}")))
}

/// Content page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/content.html")]
pub struct ContentPageTemplate {
    pub layout: Layout,
    pub page: PageView,
}

/// Same-day delivery page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/same_day.html")]
pub struct SameDayTemplate {
    pub layout: Layout,
    pub page: PageView,
    pub products: Vec<ProductCard>,
    pub cities: Vec<String>,
}

/// Help centre template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/help.html")]
pub struct HelpTemplate {
    pub layout: Layout,
    pub faqs: Vec<Faq>,
}

/// Store locator template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/store_locator.html")]
pub struct StoreLocatorTemplate {
    pub layout: Layout,
    pub query: String,
    pub stores: Vec<Store>,
}

/// One step of an order timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingStep {
    pub label: String,
    pub completed: bool,
    pub date: Option<String>,
}

/// Tracking result for an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tracking {
    pub order_id: String,
    pub status: String,
    pub estimated_delivery: String,
    pub steps: Vec<TrackingStep>,
}

/// Order tracking template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/track_order.html")]
pub struct TrackOrderTemplate {
    pub layout: Layout,
    pub order_id: String,
    pub tracking: Option<Tracking>,
}

/// 404 page template.
#[derive(Template, WebTemplate)]
#[template(path = "404.html")]
pub struct NotFoundTemplate {
    pub layout: Layout,
}

/// Store locator query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct StoreQuery {
    pub q: Option<String>,
}

/// Order tracking query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct TrackQuery {
    pub order_id: Option<String>,
}

/// Steps completed in the sample timeline.
const COMPLETED_STEPS: usize = 3;

const DATE_FORMAT: &str = "%b %d, %Y";

/// Build the sample timeline for an order id.
///
/// Returns `None` for a blank id. Ids are trimmed and upper-cased. The first
/// three steps are complete and dated relative to `today`.
#[must_use]
pub fn track(order_id: &str, steps: &[String], today: NaiveDate) -> Option<Tracking> {
    let order_id = order_id.trim().to_uppercase();
    if order_id.is_empty() {
        return None;
    }

    let day = |back: u64| {
        today
            .checked_sub_days(Days::new(back))
            .unwrap_or(today)
            .format(DATE_FORMAT)
            .to_string()
    };
    // Placed and processed two days ago, shipped yesterday
    let dates = [day(2), day(2), day(1)];

    let steps = steps
        .iter()
        .enumerate()
        .map(|(i, label)| TrackingStep {
            label: label.clone(),
            completed: i < COMPLETED_STEPS,
            date: dates.get(i).cloned(),
        })
        .collect();

    let estimated_delivery = today
        .checked_add_days(Days::new(1))
        .unwrap_or(today)
        .format(DATE_FORMAT)
        .to_string();

    Some(Tracking {
        order_id,
        status: "In Transit".to_string(),
        estimated_delivery,
        steps,
    })
}

/// Display the About page.
///
/// # Errors
///
/// Returns 404 if the page doesn't exist.
#[instrument(skip(state, cart))]
pub async fn about(State(state): State<AppState>, cart: SessionCart) -> Result<ContentPageTemplate> {
    Ok(ContentPageTemplate {
        page: content_page(&state, "about")?,
        layout: Layout::new(&state, cart.cart()),
    })
}

/// Display the same-day delivery page.
///
/// # Errors
///
/// Returns 404 if the page doesn't exist.
#[instrument(skip(state, cart))]
pub async fn same_day(State(state): State<AppState>, cart: SessionCart) -> Result<SameDayTemplate> {
    Ok(SameDayTemplate {
        page: content_page(&state, "same-day-delivery")?,
        products: ProductCard::many(&state, state.catalog().same_day()),
        cities: state.site().same_day_cities.clone(),
        layout: Layout::new(&state, cart.cart()),
    })
}

/// Display the help centre.
#[instrument(skip(state, cart))]
pub async fn help(State(state): State<AppState>, cart: SessionCart) -> HelpTemplate {
    HelpTemplate {
        layout: Layout::new(&state, cart.cart()),
        faqs: state.site().faqs.clone(),
    }
}

/// Display stores, filtered by city or address.
#[instrument(skip(state, cart))]
pub async fn store_locator(
    State(state): State<AppState>,
    cart: SessionCart,
    Query(query): Query<StoreQuery>,
) -> StoreLocatorTemplate {
    let query = query.q.unwrap_or_default().trim().to_string();
    let stores = state
        .site()
        .stores_matching(&query)
        .into_iter()
        .cloned()
        .collect();

    StoreLocatorTemplate {
        layout: Layout::new(&state, cart.cart()),
        query,
        stores,
    }
}

/// Display the order tracking form and, for a given id, its timeline.
#[instrument(skip(state, cart))]
pub async fn track_order(
    State(state): State<AppState>,
    cart: SessionCart,
    Query(query): Query<TrackQuery>,
) -> TrackOrderTemplate {
    let order_id = query.order_id.unwrap_or_default();
    let today = chrono::Local::now().date_naive();
    let tracking = track(&order_id, &state.site().tracking_steps, today);

    TrackOrderTemplate {
        layout: Layout::new(&state, cart.cart()),
        order_id: tracking
            .as_ref()
            .map_or_else(String::new, |t| t.order_id.clone()),
        tracking,
    }
}

/// Fallback for unknown paths.
#[instrument(skip(state, cart))]
pub async fn not_found(State(state): State<AppState>, cart: SessionCart) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        NotFoundTemplate {
            layout: Layout::new(&state, cart.cart()),
        },
    )
}

/// Create the pages routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/about", get(about))
        .route("/same-day-delivery", get(same_day))
        .route("/help", get(help))
        .route("/store-locator", get(store_locator))
        .route("/track-order", get(track_order))
}
