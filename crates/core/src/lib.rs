//! Bhojan Core - Shared domain library.
//!
//! This crate provides the domain types and order logic used by the
//! storefront binary:
//! - menu items, the cart and its quantity reconciliation rules
//! - delivery location state and geolocation failure classification
//! - the customer contact draft and its validation
//! - the order-message composer and WhatsApp deep-link builder
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP
//! clients, no persistence. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Menu, cart, location, and customer types
//! - [`order`] - Order validation, message composition, and dispatch URL

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod order;
pub mod types;

pub use types::*;
