//! Order validation, message composition, and dispatch URL.
//!
//! An order is not a committed transaction: it is a formatted text message
//! handed to an external messaging application through a `wa.me` deep
//! link. This module runs the pure part of the submission flow
//! (validation, location resolution, composition); opening the deep link
//! and resetting state afterwards is the storefront layer's job.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::cart::Cart;
use crate::types::customer::{CustomerDraft, CustomerError};
use crate::types::location::LocationState;

/// Merchant WhatsApp number, local part.
pub const MERCHANT_NUMBER_LOCAL: &str = "8080935258";

/// Country dialing code prepended to the local number for the deep link.
pub const MERCHANT_COUNTRY_CODE: &str = "91";

/// Reasons an order submission aborts back to the form.
///
/// None of these are fatal; every variant carries the user-facing status
/// text shown while the customer corrects the problem and retries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    /// Name or mobile number missing or invalid.
    #[error("{0}")]
    Contact(#[from] CustomerError),
    /// There is nothing in the cart.
    #[error("Your cart is empty. Please add items first.")]
    EmptyCart,
    /// Location capture failed and no fallback address was given.
    #[error("Could not get GPS. Allow location or enter a fallback address.")]
    NeedsAddress,
    /// Another submission is already in flight.
    #[error("An order is already being sent. Please wait.")]
    AlreadySending,
}

/// A composed order ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    /// Human-readable order summary, newline separated.
    pub message: String,
    /// `wa.me` deep link carrying the percent-encoded summary.
    pub whatsapp_url: String,
}

/// Round an amount to the nearest whole rupee, halves away from zero.
fn round_rupees(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount as a whole-rupee display string.
#[must_use]
pub fn format_rupees(amount: Decimal) -> String {
    format!("₹{}", round_rupees(amount))
}

/// Build the order summary text.
///
/// Line order: header, customer name, mobile, optional address, optional
/// map link, blank, items header, one line per cart line, blank, total,
/// blank, closing remark. Empty optional lines are dropped before joining
/// with newlines.
#[must_use]
pub fn compose_message(customer: &CustomerDraft, cart: &Cart, location: &LocationState) -> String {
    let mut lines: Vec<String> = vec![
        "*📦 New Order — BHOJAN*".to_string(),
        format!("*Customer:* {}", customer.name),
        format!("*Mobile:* {}", customer.mobile),
    ];

    if let Some(address) = customer.address() {
        lines.push(format!("*Address:* {address}"));
    }
    if let Some(maps_url) = location.maps_url() {
        lines.push(format!("*Location:* {maps_url}"));
    }

    lines.push(String::new());
    lines.push("*Items:*".to_string());
    for line in cart.lines() {
        lines.push(format!(
            "{} × {} — {}",
            line.name,
            line.qty,
            format_rupees(line.line_total())
        ));
    }

    lines.push(String::new());
    lines.push(format!("*Total:* {}", format_rupees(cart.total())));
    lines.push(String::new());
    lines.push("Please confirm and prepare for delivery. Thank you!".to_string());

    lines.join("\n")
}

/// Build the `wa.me` deep link for a composed message.
#[must_use]
pub fn whatsapp_url(message: &str) -> String {
    format!(
        "https://wa.me/{MERCHANT_COUNTRY_CODE}{MERCHANT_NUMBER_LOCAL}?text={}",
        urlencoding::encode(message)
    )
}

/// Validate and compose an order submission.
///
/// Runs the Validating and Composing steps of the submission flow:
/// requires a non-empty name and parseable mobile number, a non-empty
/// cart, and either resolved coordinates or a fallback address when
/// `capture_failed` is set.
///
/// # Errors
///
/// Returns the user-facing abort reason; the caller shows it and returns
/// the flow to the form with no side effects.
pub fn place_order(
    customer: &CustomerDraft,
    cart: &Cart,
    location: &LocationState,
    capture_failed: bool,
) -> Result<PlacedOrder, OrderError> {
    customer.validate()?;

    if cart.is_empty() {
        return Err(OrderError::EmptyCart);
    }

    if !location.is_resolved() && capture_failed && customer.address().is_none() {
        return Err(OrderError::NeedsAddress);
    }

    let message = compose_message(customer, cart, location);
    let whatsapp_url = whatsapp_url(&message);

    Ok(PlacedOrder {
        message,
        whatsapp_url,
    })
}

impl fmt::Display for PlacedOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::item::MenuItem;

    fn sample_cart() -> Cart {
        let mut cart = Cart::new();
        let paneer = MenuItem::new(
            "m1",
            "Paneer Butter Masala",
            "Creamy paneer with rich tomato gravy",
            Decimal::from(180),
            "",
        );
        cart.add(&paneer);
        cart.add(&paneer);
        cart
    }

    fn asha() -> CustomerDraft {
        CustomerDraft {
            name: "Asha".to_string(),
            mobile: "9876543210".to_string(),
            address: None,
        }
    }

    #[test]
    fn test_compose_message_with_resolved_location() {
        let location = LocationState::Resolved {
            lat: 12.9,
            lng: 77.6,
        };
        let message = compose_message(&asha(), &sample_cart(), &location);

        let lines: Vec<&str> = message.lines().collect();
        assert_eq!(lines[0], "*📦 New Order — BHOJAN*");
        assert_eq!(lines[1], "*Customer:* Asha");
        assert_eq!(lines[2], "*Mobile:* 9876543210");
        assert_eq!(lines[3], "*Location:* https://maps.google.com/?q=12.9,77.6");
        assert!(message.contains("Paneer Butter Masala × 2 — ₹360"));
        assert!(message.contains("*Total:* ₹360"));
        assert!(message.ends_with("Please confirm and prepare for delivery. Thank you!"));
    }

    #[test]
    fn test_compose_message_skips_absent_optionals() {
        let message = compose_message(&asha(), &sample_cart(), &LocationState::Unset);
        assert!(!message.contains("*Address:*"));
        assert!(!message.contains("*Location:*"));
    }

    #[test]
    fn test_compose_message_includes_address() {
        let customer = CustomerDraft {
            address: Some("12 MG Road".to_string()),
            ..asha()
        };
        let message = compose_message(&customer, &sample_cart(), &LocationState::Unset);
        assert!(message.contains("*Address:* 12 MG Road"));
    }

    #[test]
    fn test_whatsapp_url_targets_merchant() {
        let url = whatsapp_url("hello world");
        assert_eq!(url, "https://wa.me/918080935258?text=hello%20world");
    }

    #[test]
    fn test_place_order_happy_path() {
        let location = LocationState::Resolved {
            lat: 12.9,
            lng: 77.6,
        };
        let order = place_order(&asha(), &sample_cart(), &location, false).unwrap();

        assert!(order.whatsapp_url.starts_with("https://wa.me/918080935258?text="));
        assert!(order.message.contains("Paneer Butter Masala × 2 — ₹360"));
    }

    #[test]
    fn test_place_order_rejects_missing_contact() {
        let customer = CustomerDraft::default();
        let result = place_order(&customer, &sample_cart(), &LocationState::Unset, false);
        assert!(matches!(result, Err(OrderError::Contact(_))));
    }

    #[test]
    fn test_place_order_rejects_empty_cart() {
        let result = place_order(&asha(), &Cart::new(), &LocationState::Unset, false);
        assert_eq!(result.unwrap_err(), OrderError::EmptyCart);
    }

    #[test]
    fn test_place_order_capture_failure_needs_address() {
        let result = place_order(&asha(), &sample_cart(), &LocationState::Unset, true);
        assert_eq!(result.unwrap_err(), OrderError::NeedsAddress);
    }

    #[test]
    fn test_place_order_capture_failure_with_address_proceeds() {
        let customer = CustomerDraft {
            address: Some("12 MG Road".to_string()),
            ..asha()
        };
        let order = place_order(&customer, &sample_cart(), &LocationState::Unset, true).unwrap();
        assert!(order.message.contains("*Address:* 12 MG Road"));
        assert!(!order.message.contains("*Location:*"));
    }

    #[test]
    fn test_rounding_half_up() {
        assert_eq!(format_rupees(Decimal::new(3605, 1)), "₹361"); // 360.5
        assert_eq!(format_rupees(Decimal::new(3604, 1)), "₹360"); // 360.4
    }
}
