//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart itself lives in the session; totals are recomputed from the
//! catalog on every render.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use lk_printers_core::{Cart, CartError, CartState, ProductId};
use serde::Deserialize;
use tracing::instrument;

use super::{CategoryLink, Layout, format_price};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::htmx::{HxRequest, Notify, Trigger};
use crate::models::SessionCart;
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartLineView {
    pub product_id: u32,
    pub name: String,
    pub image: String,
    pub category: CategoryLink,
    pub unit_price: String,
    pub quantity: u32,
    pub line_price: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub is_empty: bool,
    pub item_count: u64,
    pub subtotal: String,
    /// `None` when shipping is free.
    pub shipping: Option<String>,
    pub total: String,
    /// "Add ₹N more for free shipping", when below the threshold.
    pub free_shipping_hint: Option<String>,
}

impl CartView {
    #[must_use]
    pub fn new(state: &AppState, cart: &Cart) -> Self {
        let catalog = state.catalog();
        let totals = cart.totals(catalog, state.shipping());

        let lines = cart
            .priced_lines(catalog)
            .map(|(line, product)| CartLineView {
                product_id: product.id.as_u32(),
                name: product.name.clone(),
                image: product.image.clone(),
                category: product.category.into(),
                unit_price: format_price(state, product.price),
                quantity: line.quantity.get(),
                line_price: format_price(state, line.line_price(product.price)),
            })
            .collect();

        let free_shipping_hint = (!totals.qualifies_for_free_shipping()).then(|| {
            format!(
                "Add {} more for free shipping",
                format_price(state, totals.amount_to_free_shipping())
            )
        });

        Self {
            lines,
            is_empty: cart.state() == CartState::Empty,
            item_count: cart.item_count(),
            subtotal: format_price(state, totals.subtotal),
            shipping: (!totals.shipping.is_zero()).then(|| format_price(state, totals.shipping)),
            total: format_price(state, totals.total),
            free_shipping_hint,
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
    pub quantity: Option<i64>,
}

/// Set quantity form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Step quantity form data.
#[derive(Debug, Deserialize)]
pub struct AdjustCartForm {
    pub product_id: ProductId,
    pub delta: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: ProductId,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub layout: Layout,
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

/// Display cart page.
#[instrument(skip(state, cart))]
pub async fn show(State(state): State<AppState>, cart: SessionCart) -> CartShowTemplate {
    CartShowTemplate {
        layout: Layout::new(&state, cart.cart()),
        cart: CartView::new(&state, cart.cart()),
    }
}

/// Add item to cart.
///
/// Adding a product already in the cart increases its quantity. HTMX
/// requests get the count badge back; plain form posts are redirected to the
/// cart page.
///
/// # Errors
///
/// Returns 404 for a product that is not in the catalog and 400 for a
/// quantity below 1.
#[instrument(skip(state, cart))]
pub async fn add(
    State(state): State<AppState>,
    HxRequest(hx): HxRequest,
    mut cart: SessionCart,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let product = state
        .catalog()
        .get(form.product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.product_id)))?;

    let quantity = form.quantity.unwrap_or(1);
    let line = match cart.cart_mut().add_item(product.id, quantity) {
        Ok(line) => line,
        // HTMX does not swap 4xx bodies, so the toast carries the message
        Err(CartError::InvalidQuantity { quantity }) if hx => {
            tracing::debug!(product_id = %product.id, quantity, "Rejected add to cart");
            let message = "Please choose a quantity of at least 1";
            let trigger = Trigger::new().notify(&Notify::error(message));
            return Ok((StatusCode::BAD_REQUEST, trigger, message).into_response());
        }
        Err(e) => return Err(e.into()),
    };
    cart.save().await?;

    add_breadcrumb(
        "cart",
        "Added to cart",
        Some(&[
            ("product_id", &product.id.to_string()),
            ("quantity", &line.quantity.to_string()),
        ]),
    );
    tracing::info!(product_id = %product.id, quantity = line.quantity.get(), "Added to cart");

    if !hx {
        return Ok(Redirect::to("/cart").into_response());
    }

    let count = cart.cart().item_count();
    let trigger = Trigger::new()
        .cart_updated(count)
        .notify(&Notify::success(format!(
            "{quantity}x {} added to your cart",
            product.name
        )));

    Ok((trigger, CartCountTemplate { count }).into_response())
}

/// Set a line's quantity. Quantities below 1 are raised to 1.
///
/// # Errors
///
/// Returns an error if the session cannot be written.
#[instrument(skip(state, cart))]
pub async fn update(
    State(state): State<AppState>,
    HxRequest(hx): HxRequest,
    mut cart: SessionCart,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let result = cart.cart_mut().set_quantity(form.product_id, form.quantity);
    mutated(&state, hx, cart, result.map(|_| None)).await
}

/// Step a line's quantity by `delta`, never below 1.
///
/// # Errors
///
/// Returns an error if the session cannot be written.
#[instrument(skip(state, cart))]
pub async fn adjust(
    State(state): State<AppState>,
    HxRequest(hx): HxRequest,
    mut cart: SessionCart,
    Form(form): Form<AdjustCartForm>,
) -> Result<Response> {
    let result = cart
        .cart_mut()
        .adjust_quantity(form.product_id, form.delta);
    mutated(&state, hx, cart, result.map(|_| None)).await
}

/// Remove a line from the cart.
///
/// # Errors
///
/// Returns an error if the session cannot be written.
#[instrument(skip(state, cart))]
pub async fn remove(
    State(state): State<AppState>,
    HxRequest(hx): HxRequest,
    mut cart: SessionCart,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let result = cart.cart_mut().remove_item(form.product_id);
    let removed = result.map(|line| {
        let name = state
            .catalog()
            .get(line.product_id)
            .map_or_else(|| "Item".to_string(), |p| p.name.clone());
        Some(Notify::info(format!("{name} removed from cart")))
    });
    mutated(&state, hx, cart, removed).await
}

/// Get cart count badge (HTMX).
#[instrument(skip(cart))]
pub async fn count(cart: SessionCart) -> CartCountTemplate {
    CartCountTemplate {
        count: cart.cart().item_count(),
    }
}

/// Persist a line mutation and build the response.
///
/// A mutation aimed at a product with no line leaves the cart untouched and
/// is answered as if it succeeded.
async fn mutated(
    state: &AppState,
    hx: bool,
    cart: SessionCart,
    result: std::result::Result<Option<Notify>, CartError>,
) -> Result<Response> {
    let notify = match result {
        Ok(notify) => {
            cart.save().await?;
            notify
        }
        Err(CartError::ProductNotFound(product_id)) => {
            tracing::debug!(%product_id, "Cart has no line for product, ignoring");
            None
        }
        Err(e) => return Err(e.into()),
    };

    if !hx {
        return Ok(Redirect::to("/cart").into_response());
    }

    let view = CartView::new(state, cart.cart());
    let mut trigger = Trigger::new().cart_updated(view.item_count);
    if let Some(notify) = &notify {
        trigger = trigger.notify(notify);
    }

    Ok((trigger, CartItemsTemplate { cart: view }).into_response())
}
