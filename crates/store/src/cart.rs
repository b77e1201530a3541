//! Ordered, id-keyed cart contents.
//!
//! `CartState` is immutable: every change returns a new value and leaves the
//! original untouched, so snapshots handed to subscribers never shift under
//! them. Clones share the underlying item slice.

use std::sync::Arc;

use gocart_core::{ProductId, Quantity};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::item::{CartItem, NewCartItem};

/// The items in the cart, in the order they were first added.
///
/// No two items share an `id`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CartState {
    items: Arc<[CartItem]>,
}

impl CartState {
    /// An empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from a list of items.
    ///
    /// Repeated ids are merged into the first occurrence, summing quantities,
    /// so the result is always keyed.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = CartItem>) -> Self {
        let mut merged: Vec<CartItem> = Vec::new();
        for item in items {
            if let Some(existing) = merged.iter_mut().find(|i| i.id == item.id) {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
            } else {
                merged.push(item);
            }
        }
        Self {
            items: merged.into(),
        }
    }

    /// The items, in cart order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Iterate over the items in cart order.
    pub fn iter(&self) -> std::slice::Iter<'_, CartItem> {
        self.items.iter()
    }

    /// Look up an item by product id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }

    /// Add one unit of `item`.
    ///
    /// A product already in the cart gets its quantity bumped in place;
    /// a new one is appended with quantity 1.
    #[must_use]
    pub fn with_added(&self, item: NewCartItem) -> Self {
        match self.position(&item.id) {
            Some(index) => self.with_quantity_at(index, Quantity::increment),
            None => {
                let mut items = self.items.to_vec();
                items.push(item.with_quantity(Quantity::ONE));
                Self {
                    items: items.into(),
                }
            }
        }
    }

    /// Add one unit of an item already in the cart.
    ///
    /// Returns `None` if no item has this id.
    #[must_use]
    pub fn with_incremented(&self, id: &ProductId) -> Option<Self> {
        self.position(id)
            .map(|index| self.with_quantity_at(index, Quantity::increment))
    }

    /// Remove one unit of an item, dropping the line when it was the last.
    ///
    /// Returns `None` if no item has this id.
    #[must_use]
    pub fn with_decremented(&self, id: &ProductId) -> Option<Self> {
        let index = self.position(id)?;
        let items = self
            .items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| {
                if i != index {
                    return Some(item.clone());
                }
                item.quantity.decrement().map(|quantity| CartItem {
                    quantity,
                    ..item.clone()
                })
            })
            .collect::<Vec<_>>();
        Some(Self {
            items: items.into(),
        })
    }

    fn with_quantity_at(&self, index: usize, f: impl FnOnce(Quantity) -> Quantity) -> Self {
        let mut items = self.items.to_vec();
        if let Some(item) = items.get_mut(index) {
            item.quantity = f(item.quantity);
        }
        Self {
            items: items.into(),
        }
    }
}

impl<'a> IntoIterator for &'a CartState {
    type Item = &'a CartItem;
    type IntoIter = std::slice::Iter<'a, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<CartItem> for CartState {
    fn from_iter<I: IntoIterator<Item = CartItem>>(iter: I) -> Self {
        Self::from_items(iter)
    }
}

// Persisted as a bare JSON array of items.
impl Serialize for CartState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.items.iter())
    }
}

impl<'de> Deserialize<'de> for CartState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<CartItem>::deserialize(deserializer).map(Self::from_items)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use gocart_core::Price;
    use rust_decimal::Decimal;

    use super::*;

    fn new_item(id: &str) -> NewCartItem {
        NewCartItem {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            image_url: format!("https://cdn.example/{id}.png"),
            price: Price::from_cents(1000),
        }
    }

    fn quantities(state: &CartState) -> Vec<(&str, u32)> {
        state
            .iter()
            .map(|item| (item.id.as_str(), item.quantity.get()))
            .collect()
    }

    #[test]
    fn test_add_new_item_starts_at_one() {
        let state = CartState::new().with_added(new_item("A"));
        assert_eq!(quantities(&state), vec![("A", 1)]);

        let item = state.get(&ProductId::new("A")).unwrap();
        assert_eq!(item.title, "Product A");
        assert_eq!(item.image_url, "https://cdn.example/A.png");
        assert_eq!(item.price, Price::from_cents(1000));
    }

    #[test]
    fn test_add_existing_item_bumps_quantity() {
        let state = CartState::new()
            .with_added(new_item("A"))
            .with_added(new_item("A"));
        assert_eq!(quantities(&state), vec![("A", 2)]);
    }

    #[test]
    fn test_increment() {
        let state = CartState::new().with_added(new_item("A"));
        let state = state.with_incremented(&ProductId::new("A")).unwrap();
        assert_eq!(quantities(&state), vec![("A", 2)]);
    }

    #[test]
    fn test_increment_unknown_id() {
        let state = CartState::new().with_added(new_item("A"));
        assert!(state.with_incremented(&ProductId::new("B")).is_none());
    }

    #[test]
    fn test_decrement_last_unit_removes_item() {
        let state = CartState::new().with_added(new_item("A"));
        let state = state.with_decremented(&ProductId::new("A")).unwrap();
        assert!(state.is_empty());
    }

    #[test]
    fn test_decrement_above_one() {
        let state = CartState::new()
            .with_added(new_item("A"))
            .with_added(new_item("A"));
        let state = state.with_decremented(&ProductId::new("A")).unwrap();
        assert_eq!(quantities(&state), vec![("A", 1)]);
    }

    #[test]
    fn test_decrement_unknown_id() {
        assert!(
            CartState::new()
                .with_decremented(&ProductId::new("A"))
                .is_none()
        );
    }

    #[test]
    fn test_order_preserved() {
        let state = CartState::new()
            .with_added(new_item("A"))
            .with_added(new_item("B"))
            .with_added(new_item("C"));
        let state = state.with_incremented(&ProductId::new("A")).unwrap();
        let state = state.with_added(new_item("B"));
        assert_eq!(quantities(&state), vec![("A", 2), ("B", 2), ("C", 1)]);

        // Removing from the middle keeps the rest in place.
        let state = state
            .with_decremented(&ProductId::new("C"))
            .unwrap()
            .with_added(new_item("D"));
        assert_eq!(quantities(&state), vec![("A", 2), ("B", 2), ("D", 1)]);
    }

    #[test]
    fn test_updates_do_not_touch_previous_snapshot() {
        let before = CartState::new().with_added(new_item("A"));
        let after = before.with_incremented(&ProductId::new("A")).unwrap();
        assert_eq!(quantities(&before), vec![("A", 1)]);
        assert_eq!(quantities(&after), vec![("A", 2)]);
    }

    #[test]
    fn test_from_items_merges_duplicates() {
        let a = new_item("A").with_quantity(Quantity::new(2).unwrap());
        let b = new_item("B").with_quantity(Quantity::ONE);
        let a_again = new_item("A").with_quantity(Quantity::new(3).unwrap());

        let state = CartState::from_items([a, b, a_again]);
        assert_eq!(quantities(&state), vec![("A", 5), ("B", 1)]);
    }

    #[test]
    fn test_serialization_roundtrip_keeps_order() {
        let state = CartState::new()
            .with_added(new_item("B"))
            .with_added(new_item("A"))
            .with_added(new_item("B"));
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.starts_with('['));

        let parsed: CartState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, state);
    }

    #[test]
    fn test_serialization_keeps_exact_prices() {
        let state: CartState = [
            "1234567.123456789012",
            "79228162514264337593543950335",
            "-5.5",
            "0",
        ]
        .into_iter()
        .map(|amount| NewCartItem {
            price: Price::new(Decimal::from_str(amount).unwrap()),
            ..new_item(amount)
        })
        .map(|item| item.with_quantity(Quantity::ONE))
        .collect();

        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains(r#""price":1234567.123456789012,"#));
        assert!(json.contains(r#""price":79228162514264337593543950335,"#));

        let parsed: CartState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, state);
        for item in &parsed {
            assert_eq!(item.price.to_string(), item.id.as_str());
        }
    }

    #[test]
    fn test_empty_serializes_as_empty_array() {
        assert_eq!(serde_json::to_string(&CartState::new()).unwrap(), "[]");
    }
}
