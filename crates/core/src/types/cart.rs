//! Cart and line-item types.
//!
//! The cart is an ordered collection of line items keyed by menu item id,
//! insertion order = first-add order. The total is derived on every read;
//! it is never stored alongside the lines.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::item::MenuItem;

/// One entry in the cart: a menu item and its ordered quantity.
///
/// Name and price are snapshotted from the menu item at add-time, so a
/// later catalog refresh does not change what the customer already put in
/// the cart.
///
/// Invariant: `qty >= 1`. A line whose quantity drops to zero is removed
/// from the cart, never retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Identifier of the menu item this line was created from.
    pub id: String,
    /// Display name snapshot.
    pub name: String,
    /// Unit price snapshot.
    pub price: Decimal,
    /// Ordered quantity, always at least 1.
    pub qty: u32,
}

impl CartLine {
    /// Line subtotal (`price * qty`).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.qty)
    }
}

/// Ordered collection of [`CartLine`], at most one line per item id.
///
/// Serializes transparently as a JSON array of lines, which is also the
/// persisted on-disk form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add one unit of `item` to the cart.
    ///
    /// If a line with the same id already exists its quantity is
    /// incremented by 1 in place; otherwise a new line is appended with
    /// quantity 1, snapshotting name and price from the item. Never fails.
    pub fn add(&mut self, item: &MenuItem) {
        if let Some(line) = self.lines.iter_mut().find(|line| line.id == item.id) {
            line.qty = line.qty.saturating_add(1);
            return;
        }

        self.lines.push(CartLine {
            id: item.id.clone(),
            name: item.name.clone(),
            price: item.price,
            qty: 1,
        });
    }

    /// Adjust the quantity of the line with `id` by `delta`.
    ///
    /// No-op if no such line exists. If the new quantity would be zero or
    /// negative the line is removed; otherwise the quantity is updated in
    /// place, preserving the line's position. Never fails.
    pub fn change_quantity(&mut self, id: &str, delta: i64) {
        let Some(index) = self.lines.iter().position(|line| line.id == id) else {
            return;
        };

        let new_qty = self
            .lines
            .get(index)
            .map_or(0, |line| i64::from(line.qty).saturating_add(delta));
        if new_qty <= 0 {
            self.lines.remove(index);
        } else if let Some(line) = self.lines.get_mut(index) {
            line.qty = u32::try_from(new_qty).unwrap_or(u32::MAX);
        }
    }

    /// Empty the cart unconditionally.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Cart total: sum of `price * qty` over all lines, recomputed on
    /// every call.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Total number of units across all lines (the header badge count).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.qty)).sum()
    }

    /// The lines in first-add order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }
}

/// Diff two cart snapshots and return the id of the line that changed.
///
/// Used to drive the transient highlight after a mutation: a newly added
/// line wins, otherwise the first line whose quantity differs from the
/// previous snapshot. Returns `None` when nothing changed (or a line was
/// only removed).
#[must_use]
pub fn changed_line<'a>(prev: &Cart, current: &'a Cart) -> Option<&'a str> {
    if current.len() > prev.len() {
        return current
            .lines()
            .iter()
            .find(|line| !prev.lines().iter().any(|p| p.id == line.id))
            .map(|line| line.id.as_str());
    }

    current
        .lines()
        .iter()
        .find(|line| {
            prev.lines()
                .iter()
                .any(|p| p.id == line.id && p.qty != line.qty)
        })
        .map(|line| line.id.as_str())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(id: &str, name: &str, price: u32) -> MenuItem {
        MenuItem::new(id, name, "", Decimal::from(price), "")
    }

    #[test]
    fn test_add_new_item_appends_line() {
        let mut cart = Cart::new();
        cart.add(&item("m1", "Paneer Butter Masala", 180));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].qty, 1);
        assert_eq!(cart.lines()[0].name, "Paneer Butter Masala");
    }

    #[test]
    fn test_add_existing_item_increments_in_place() {
        let mut cart = Cart::new();
        cart.add(&item("m1", "Paneer Butter Masala", 180));
        cart.add(&item("m2", "Veg Biryani", 150));
        cart.add(&item("m1", "Paneer Butter Masala", 180));

        assert_eq!(cart.len(), 2);
        // Position and price snapshot unchanged, quantity bumped by 1
        assert_eq!(cart.lines()[0].id, "m1");
        assert_eq!(cart.lines()[0].qty, 2);
        assert_eq!(cart.lines()[0].price, Decimal::from(180));
    }

    #[test]
    fn test_add_ignores_later_price_change() {
        let mut cart = Cart::new();
        cart.add(&item("m1", "Paneer Butter Masala", 180));
        // Catalog refresh changed the price; the snapshot must not move
        cart.add(&item("m1", "Paneer Butter Masala", 200));

        assert_eq!(cart.lines()[0].qty, 2);
        assert_eq!(cart.lines()[0].price, Decimal::from(180));
    }

    #[test]
    fn test_change_quantity_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add(&item("m1", "Paneer Butter Masala", 180));
        cart.change_quantity("missing", 1);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].qty, 1);
    }

    #[test]
    fn test_change_quantity_to_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add(&item("m1", "Paneer Butter Masala", 180));
        cart.change_quantity("m1", -1);

        assert!(cart.is_empty());
    }

    #[test]
    fn test_change_quantity_below_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add(&item("m1", "Paneer Butter Masala", 180));
        cart.change_quantity("m1", -5);

        assert!(cart.is_empty());
    }

    #[test]
    fn test_change_quantity_preserves_position() {
        let mut cart = Cart::new();
        cart.add(&item("m1", "Paneer Butter Masala", 180));
        cart.add(&item("m2", "Veg Biryani", 150));
        cart.change_quantity("m1", 3);

        assert_eq!(cart.lines()[0].id, "m1");
        assert_eq!(cart.lines()[0].qty, 4);
        assert_eq!(cart.lines()[1].id, "m2");
    }

    #[test]
    fn test_invariants_over_mixed_sequence() {
        let mut cart = Cart::new();
        cart.add(&item("m1", "Paneer Butter Masala", 180));
        cart.add(&item("m2", "Veg Biryani", 150));
        cart.add(&item("m1", "Paneer Butter Masala", 180));
        cart.change_quantity("m2", -1);
        cart.change_quantity("m1", -1);
        cart.change_quantity("m3", 7);
        cart.add(&item("m2", "Veg Biryani", 150));

        for line in cart.lines() {
            assert!(line.qty >= 1);
            assert_eq!(
                cart.lines().iter().filter(|l| l.id == line.id).count(),
                1,
                "duplicate line for {}",
                line.id
            );
        }
    }

    #[test]
    fn test_total_recomputed_from_lines() {
        let mut cart = Cart::new();
        assert_eq!(cart.total(), Decimal::ZERO);

        cart.add(&item("m1", "Paneer Butter Masala", 180));
        cart.add(&item("m1", "Paneer Butter Masala", 180));
        cart.add(&item("m4", "Masala Dosa", 90));
        assert_eq!(cart.total(), Decimal::from(450));

        cart.change_quantity("m4", -1);
        assert_eq!(cart.total(), Decimal::from(360));

        cart.clear();
        assert_eq!(cart.total(), Decimal::ZERO);
    }

    #[test]
    fn test_serde_roundtrip_preserves_order_and_values() {
        let mut cart = Cart::new();
        cart.add(&item("m2", "Veg Biryani", 150));
        cart.add(&item("m1", "Paneer Butter Masala", 180));
        cart.add(&item("m1", "Paneer Butter Masala", 180));

        let json = serde_json::to_string(&cart).unwrap();
        // Transparent serialization: a plain array of lines
        assert!(json.starts_with('['));

        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
        assert_eq!(restored.lines()[0].id, "m2");
    }

    #[test]
    fn test_changed_line_detects_addition() {
        let mut cart = Cart::new();
        cart.add(&item("m1", "Paneer Butter Masala", 180));
        let prev = cart.clone();
        cart.add(&item("m2", "Veg Biryani", 150));

        assert_eq!(changed_line(&prev, &cart), Some("m2"));
    }

    #[test]
    fn test_changed_line_detects_quantity_change() {
        let mut cart = Cart::new();
        cart.add(&item("m1", "Paneer Butter Masala", 180));
        cart.add(&item("m2", "Veg Biryani", 150));
        let prev = cart.clone();
        cart.change_quantity("m2", 1);

        assert_eq!(changed_line(&prev, &cart), Some("m2"));
    }

    #[test]
    fn test_changed_line_none_when_unchanged() {
        let mut cart = Cart::new();
        cart.add(&item("m1", "Paneer Butter Masala", 180));
        let prev = cart.clone();

        assert_eq!(changed_line(&prev, &cart), None);
    }

    #[test]
    fn test_changed_line_none_on_removal() {
        let mut cart = Cart::new();
        cart.add(&item("m1", "Paneer Butter Masala", 180));
        let prev = cart.clone();
        cart.change_quantity("m1", -1);

        assert_eq!(changed_line(&prev, &cart), None);
    }
}
