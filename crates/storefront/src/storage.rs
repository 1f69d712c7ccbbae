//! Durable cart storage.
//!
//! Mirrors the in-memory cart to a single JSON file holding the array of
//! cart lines. The file is read once at startup and rewritten in full on
//! every cart mutation. Both directions are best-effort: a missing or
//! malformed file rehydrates as an empty cart, and a failed write is
//! logged without rolling back the in-memory mutation.

use std::fs;
use std::path::PathBuf;

use tracing::{error, warn};

use bhojan_core::Cart;

/// File-backed cart persistence.
#[derive(Debug, Clone)]
pub struct CartStorage {
    path: PathBuf,
}

impl CartStorage {
    /// Create storage backed by `path`.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the persisted cart.
    ///
    /// A missing file is a normal first run; corrupt contents are treated
    /// as absent. Neither surfaces as an error.
    #[must_use]
    pub fn load(&self) -> Cart {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Cart::new(),
            Err(e) => {
                warn!(path = %self.path.display(), "Failed to read cart file: {e}");
                return Cart::new();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(cart) => cart,
            Err(e) => {
                warn!(path = %self.path.display(), "Discarding malformed cart file: {e}");
                Cart::new()
            }
        }
    }

    /// Persist the cart, replacing the previous contents.
    ///
    /// Best-effort: failures are logged and the in-memory cart stays
    /// authoritative.
    pub fn save(&self, cart: &Cart) {
        let json = match serde_json::to_string(cart) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize cart: {e}");
                return;
            }
        };

        if let Err(e) = fs::write(&self.path, json) {
            error!(path = %self.path.display(), "Failed to save cart: {e}");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bhojan_core::MenuItem;
    use rust_decimal::Decimal;

    fn sample_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add(&MenuItem::new(
            "m1",
            "Paneer Butter Masala",
            "",
            Decimal::from(180),
            "",
        ));
        cart.add(&MenuItem::new("m4", "Masala Dosa", "", Decimal::from(90), ""));
        cart
    }

    #[test]
    fn test_save_then_load_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let storage = CartStorage::new(dir.path().join("foodie_cart.json"));

        let cart = sample_cart();
        storage.save(&cart);

        assert_eq!(storage.load(), cart);
    }

    #[test]
    fn test_load_missing_file_is_empty_cart() {
        let dir = tempfile::tempdir().unwrap();
        let storage = CartStorage::new(dir.path().join("absent.json"));

        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_load_corrupt_file_is_empty_cart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("foodie_cart.json");
        fs::write(&path, "{not json").unwrap();

        let storage = CartStorage::new(path);
        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_save_overwrites_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let storage = CartStorage::new(dir.path().join("foodie_cart.json"));

        let mut cart = sample_cart();
        storage.save(&cart);
        cart.clear();
        storage.save(&cart);

        assert!(storage.load().is_empty());
    }
}
