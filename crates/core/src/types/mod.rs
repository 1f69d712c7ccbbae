//! Core types for Bhojan.
//!
//! This module provides the domain concepts shared by the storefront.

pub mod cart;
pub mod customer;
pub mod item;
pub mod location;

pub use cart::{Cart, CartLine, changed_line};
pub use customer::{CustomerDraft, CustomerError, MobileNumber};
pub use item::MenuItem;
pub use location::{GeolocationError, LocationState};
