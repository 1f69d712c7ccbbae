//! Menu item type.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A sellable item from the menu catalog.
///
/// Items are immutable once loaded; their lifecycle is bound to a catalog
/// fetch (remote or fallback). The field names match the remote content
/// query projection (`name, desc, price, id, img`), so this type
/// deserializes straight out of the query result array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Unique, stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Short description shown on the menu card.
    pub desc: String,
    /// Price in whole rupees (currency-agnostic unit, non-negative).
    pub price: Decimal,
    /// Image URL.
    pub img: String,
}

impl MenuItem {
    /// Create a new menu item.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        desc: impl Into<String>,
        price: Decimal,
        img: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            desc: desc.into(),
            price,
            img: img.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_from_query_result() {
        let json = r#"{
            "id": "m1",
            "name": "Paneer Butter Masala",
            "desc": "Creamy paneer with rich tomato gravy",
            "price": 180,
            "img": "https://example.com/paneer.jpg"
        }"#;

        let item: MenuItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, "m1");
        assert_eq!(item.name, "Paneer Butter Masala");
        assert_eq!(item.price, Decimal::from(180));
    }

    #[test]
    fn test_deserialize_fractional_price() {
        let json = r#"{"id": "m2", "name": "Chai", "desc": "", "price": 12.5, "img": ""}"#;
        let item: MenuItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.price, Decimal::new(125, 1));
    }
}
