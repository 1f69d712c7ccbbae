//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                - Splash screen
//! GET  /menu            - Menu and cart page
//! GET  /health          - Health check
//!
//! # Cart (HTMX fragments)
//! GET  /cart/items      - Cart panel contents (fragment)
//! POST /cart/add        - Add an item (returns cart_items fragment)
//! POST /cart/update     - Change a line quantity (returns cart_items fragment)
//! POST /cart/clear      - Empty the cart (returns cart_items fragment)
//! GET  /cart/count      - Cart count badge (fragment)
//!
//! # Order
//! POST /order           - Validate, compose, and dispatch the order
//! ```

pub mod cart;
pub mod home;
pub mod order;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(cart::items))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Splash screen
        .route("/", get(home::splash))
        // Menu and cart page
        .route("/menu", get(home::menu))
        // Cart fragments
        .nest("/cart", cart_routes())
        // Order submission
        .route("/order", post(order::submit))
}
