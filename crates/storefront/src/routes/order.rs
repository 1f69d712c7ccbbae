//! Order submission route handler.
//!
//! Runs the submission flow end to end: claim the submit guard, validate
//! the contact details and cart, resolve the delivery location (captured
//! coordinates or fallback address), compose the order summary, and hand
//! it off as a WhatsApp deep link. Every abort renders as status text and
//! returns the flow to the form; success clears the cart and draft.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::{Deserialize, Deserializer};
use tracing::{info, instrument, warn};

use bhojan_core::{
    CustomerDraft, GeolocationError, LocationState,
    order::{OrderError, place_order},
};

use crate::state::AppState;

/// Order submission form data.
///
/// `lat`/`lng` carry coordinates captured by the browser; `geo_error`
/// carries the geolocation failure code when capture failed. Browsers
/// post empty strings for untouched fields, which deserialize as `None`.
#[derive(Debug, Deserialize)]
pub struct OrderForm {
    pub customer_name: String,
    pub customer_mobile: String,
    #[serde(default, deserialize_with = "empty_to_none")]
    pub customer_address: Option<String>,
    #[serde(default, deserialize_with = "empty_to_none")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "empty_to_none")]
    pub lng: Option<f64>,
    #[serde(default, deserialize_with = "empty_to_none")]
    pub geo_error: Option<u8>,
}

/// Deserialize an optional form field, treating an empty or blank string
/// as absent.
fn empty_to_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<T>().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Order status fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/order_status.html")]
pub struct OrderStatusTemplate {
    pub message: String,
    /// Deep link to open when the order was dispatched; empty on abort.
    pub whatsapp_url: String,
    pub sent: bool,
}

impl OrderStatusTemplate {
    fn aborted(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            whatsapp_url: String::new(),
            sent: false,
        }
    }
}

/// Submit the order.
///
/// Failures (validation, positioning without fallback address, submission
/// already in flight) abort back to the form with a user-facing message
/// and leave the cart untouched. On success the composed summary is
/// dispatched as a `wa.me` deep link opened in a new browsing context,
/// the cart is cleared and mirrored to storage, and a transient
/// confirmation is shown.
#[instrument(skip(state, form))]
pub async fn submit(State(state): State<AppState>, Form(form): Form<OrderForm>) -> Response {
    // Mutual exclusion on the submit action: a double-press must not
    // dispatch two messaging handoffs.
    let Some(_guard) = state.try_begin_submit() else {
        return OrderStatusTemplate::aborted(OrderError::AlreadySending.to_string())
            .into_response();
    };

    let customer = CustomerDraft {
        name: form.customer_name.trim().to_string(),
        mobile: form.customer_mobile.trim().to_string(),
        address: form.customer_address.clone(),
    };

    let location = match (form.lat, form.lng) {
        (Some(lat), Some(lng)) => LocationState::Resolved { lat, lng },
        _ => LocationState::Unset,
    };

    if let Some(code) = form.geo_error {
        warn!(%code, "Location capture failed: {}", GeolocationError::from_code(code));
    }

    let cart = state.cart().await;
    let capture_failed = !location.is_resolved();

    let placed = match place_order(&customer, &cart, &location, capture_failed) {
        Ok(placed) => placed,
        Err(e) => return OrderStatusTemplate::aborted(e.to_string()).into_response(),
    };

    // Completed: the handoff is fire-and-forget, so the cart is cleared
    // as soon as the deep link is handed to the browser.
    state.mutate_cart(bhojan_core::Cart::clear).await;
    info!(lines = cart.len(), "Order dispatched to merchant WhatsApp");

    (
        // The badge listens for cart-updated, the cart panel for
        // order-completed (its own mutations swap it directly).
        AppendHeaders([("HX-Trigger", "cart-updated, order-completed")]),
        OrderStatusTemplate {
            message: "Order sent! Opening WhatsApp...".to_string(),
            whatsapp_url: placed.whatsapp_url,
            sent: true,
        },
    )
        .into_response()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_form_empty_optionals_deserialize_as_none() {
        let form: OrderForm = serde_urlencoded::from_str(
            "customer_name=Asha&customer_mobile=9876543210&customer_address=&lat=&lng=&geo_error=",
        )
        .unwrap();

        assert_eq!(form.customer_name, "Asha");
        assert!(form.customer_address.is_none());
        assert!(form.lat.is_none());
        assert!(form.geo_error.is_none());
    }

    #[test]
    fn test_order_form_coordinates_parse() {
        let form: OrderForm = serde_urlencoded::from_str(
            "customer_name=Asha&customer_mobile=9876543210&lat=12.9&lng=77.6",
        )
        .unwrap();

        assert_eq!(form.lat, Some(12.9));
        assert_eq!(form.lng, Some(77.6));
    }

    #[test]
    fn test_order_form_geo_error_code_parses() {
        let form: OrderForm = serde_urlencoded::from_str(
            "customer_name=Asha&customer_mobile=9876543210&geo_error=1",
        )
        .unwrap();

        assert_eq!(form.geo_error, Some(1));
    }
}
