//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page
//! reloads: each mutation returns the cart items fragment and fires a
//! `cart-updated` trigger so the header badge refreshes itself.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use bhojan_core::{Cart, order::format_rupees};

use crate::error::AppError;
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartLineView {
    pub id: String,
    pub name: String,
    pub qty: u32,
    pub unit_price: String,
    pub line_price: String,
    /// Line touched by the most recent mutation (transient highlight).
    pub highlighted: bool,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub total: String,
    pub item_count: u64,
}

impl CartView {
    /// Build display data from a cart snapshot, marking the line the
    /// last mutation touched.
    #[must_use]
    pub fn from_cart(cart: &Cart, highlight: Option<&str>) -> Self {
        Self {
            items: cart
                .lines()
                .iter()
                .map(|line| CartLineView {
                    id: line.id.clone(),
                    name: line.name.clone(),
                    qty: line.qty,
                    unit_price: format_rupees(line.price),
                    line_price: format_rupees(line.line_total()),
                    highlighted: highlight == Some(line.id.as_str()),
                })
                .collect(),
            total: format_rupees(cart.total()),
            item_count: cart.item_count(),
        }
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub item_id: String,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub item_id: String,
    pub delta: i64,
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

/// Render the cart items fragment with the `cart-updated` trigger set.
fn cart_fragment(cart: CartView) -> Response {
    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate { cart },
    )
        .into_response()
}

/// Get the cart items fragment (HTMX).
#[instrument(skip(state))]
pub async fn items(State(state): State<AppState>) -> impl IntoResponse {
    CartItemsTemplate {
        cart: CartView::from_cart(&state.cart().await, None),
    }
}

/// Add one unit of an item to the cart (HTMX).
///
/// The item must be on the currently displayed catalog; name and price
/// are snapshotted from the catalog entry.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Form(form): Form<AddToCartForm>,
) -> Result<Response, AppError> {
    let menu = state.menu().load_menu().await;
    let item = menu
        .iter()
        .find(|item| item.id == form.item_id)
        .ok_or_else(|| AppError::NotFound(format!("menu item {}", form.item_id)))?;

    let change = state.mutate_cart(|cart| cart.add(item)).await;
    Ok(cart_fragment(CartView::from_cart(
        &change.cart,
        change.changed_id.as_deref(),
    )))
}

/// Change a line's quantity by a delta (HTMX).
///
/// Reducing the quantity to zero or below removes the line.
#[instrument(skip(state))]
pub async fn update(State(state): State<AppState>, Form(form): Form<UpdateCartForm>) -> Response {
    let change = state
        .mutate_cart(|cart| cart.change_quantity(&form.item_id, form.delta))
        .await;
    cart_fragment(CartView::from_cart(&change.cart, change.changed_id.as_deref()))
}

/// Empty the cart (HTMX).
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Response {
    let change = state.mutate_cart(Cart::clear).await;
    cart_fragment(CartView::from_cart(&change.cart, None))
}

/// Get the cart count badge (HTMX).
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> impl IntoResponse {
    CartCountTemplate {
        count: state.cart().await.item_count(),
    }
}
