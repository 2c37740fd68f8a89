//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use super::Layout;
use super::products::ProductCard;
use crate::data::{BusinessNeed, FeaturedCategory, HeroSlide, Promise};
use crate::filters;
use crate::models::SessionCart;
use crate::state::AppState;

/// Products in the best sellers strip.
const BEST_SELLER_LIMIT: usize = 8;

/// Testimonial display data for templates.
#[derive(Clone)]
pub struct TestimonialView {
    pub name: String,
    pub company: String,
    pub review: String,
    pub stars: String,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub layout: Layout,
    pub slides: Vec<HeroSlide>,
    pub featured: Vec<FeaturedCategory>,
    pub best_sellers: Vec<ProductCard>,
    pub business_needs: Vec<BusinessNeed>,
    pub testimonials: Vec<TestimonialView>,
    pub promises: Vec<Promise>,
}

/// Display the home page.
#[instrument(skip(state, cart))]
pub async fn home(State(state): State<AppState>, cart: SessionCart) -> HomeTemplate {
    let site = state.site();

    let testimonials = site
        .testimonials
        .iter()
        .map(|t| TestimonialView {
            name: t.name.clone(),
            company: t.company.clone(),
            review: t.review.clone(),
            stars: "★".repeat(usize::from(t.rating.min(5))),
        })
        .collect();

    HomeTemplate {
        layout: Layout::new(&state, cart.cart()),
        slides: site.hero_slides.clone(),
        featured: site.featured_categories.clone(),
        best_sellers: ProductCard::many(&state, state.catalog().best_sellers(BEST_SELLER_LIMIT)),
        business_needs: site.business_needs.clone(),
        testimonials,
        promises: site.promises.clone(),
    }
}
