//! Splash and menu page route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use bhojan_core::{MenuItem, order::format_rupees, types::location::CAPTURE_TIMEOUT_MS};

use crate::filters;
use crate::routes::cart::CartView;
use crate::state::AppState;

/// Menu item display data for templates.
#[derive(Clone)]
pub struct MenuItemView {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub price: String,
    pub img: String,
}

impl From<&MenuItem> for MenuItemView {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            desc: item.desc.clone(),
            price: format_rupees(item.price),
            img: item.img.clone(),
        }
    }
}

/// Splash screen template.
#[derive(Template, WebTemplate)]
#[template(path = "splash.html")]
pub struct SplashTemplate;

/// Menu and cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "menu.html")]
pub struct MenuTemplate {
    pub items: Vec<MenuItemView>,
    pub cart: CartView,
    /// Timeout handed to the browser's positioning request.
    pub capture_timeout_ms: u32,
}

/// Display the splash screen.
#[instrument]
pub async fn splash() -> impl IntoResponse {
    SplashTemplate
}

/// Display the menu with the cart panel.
///
/// The catalog comes from the menu source adapter and is never empty:
/// a failed or empty remote read substitutes the fallback catalog.
#[instrument(skip(state))]
pub async fn menu(State(state): State<AppState>) -> impl IntoResponse {
    let items = state
        .menu()
        .load_menu()
        .await
        .iter()
        .map(MenuItemView::from)
        .collect();
    let cart = CartView::from_cart(&state.cart().await, None);

    MenuTemplate {
        items,
        cart,
        capture_timeout_ms: CAPTURE_TIMEOUT_MS,
    }
}
