//! Cart manager.
//!
//! The cart owns an ordered list of [`LineItem`]s and a flat delivery fee.
//! Subtotal, fee and total are recomputed from the items on every read.
//! "Finish order" turns the cart into a [`CheckoutHandoff`], the one value the
//! checkout receives.

use monster_burger_core::{ItemId, Price};
use serde::{Deserialize, Serialize};

/// One product entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Unique within a cart.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Price of a single unit.
    #[serde(rename = "price")]
    pub unit_price: Price,
    /// Always at least 1.
    #[serde(rename = "qty", alias = "quantity", deserialize_with = "de_quantity")]
    pub quantity: u32,
    /// Free-text note, e.g. "Ponto: Ao ponto".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Extras or size shown under the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Image URL.
    #[serde(default)]
    pub image: String,
}

fn de_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    u32::deserialize(deserializer).map(|q| q.max(1))
}

impl LineItem {
    /// Create a line item. A zero quantity is raised to 1.
    #[must_use]
    pub fn new(id: ItemId, name: impl Into<String>, unit_price: Price, quantity: u32) -> Self {
        Self {
            id,
            name: name.into(),
            unit_price,
            quantity: quantity.max(1),
            note: None,
            subtitle: None,
            image: String::new(),
        }
    }

    /// Attach a note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Attach a subtitle.
    #[must_use]
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Attach an image URL.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// `unit_price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// Sum of line totals.
#[must_use]
pub fn subtotal_of(items: &[LineItem]) -> Price {
    items.iter().map(LineItem::line_total).sum()
}

/// The fee actually charged: nothing for an empty cart.
#[must_use]
pub fn applied_fee(items: &[LineItem], delivery_fee: Price) -> Price {
    if items.is_empty() {
        Price::ZERO
    } else {
        delivery_fee
    }
}

/// Read-only view of a cart's items and derived amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSnapshot {
    /// Items in display order.
    pub items: Vec<LineItem>,
    /// Subtotal of all items.
    pub subtotal: Price,
    /// Fee charged; zero for an empty cart.
    pub delivery_fee: Price,
    /// Amount the customer pays.
    pub total: Price,
}

impl CartSnapshot {
    /// Whether there is anything to order.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A shopping cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    items: Vec<LineItem>,
    delivery_fee: Price,
    note: String,
}

impl Cart {
    /// Create an empty cart charging `delivery_fee` once it has items.
    #[must_use]
    pub const fn new(delivery_fee: Price) -> Self {
        Self {
            items: Vec::new(),
            delivery_fee,
            note: String::new(),
        }
    }

    /// Create a cart pre-filled with `items`.
    ///
    /// Items repeating an earlier id are dropped so ids stay unique.
    #[must_use]
    pub fn with_items(delivery_fee: Price, items: impl IntoIterator<Item = LineItem>) -> Self {
        let mut cart = Self::new(delivery_fee);
        for item in items {
            cart.add(item);
        }
        cart
    }

    /// Append an item. Returns `false` and leaves the cart unchanged when an
    /// item with the same id is already present.
    pub fn add(&mut self, item: LineItem) -> bool {
        if self.items.iter().any(|it| it.id == item.id) {
            tracing::debug!(item_id = %item.id, "Ignoring duplicate cart item");
            return false;
        }
        self.items.push(item);
        true
    }

    /// Add one unit. Unknown ids are ignored.
    pub fn increment(&mut self, id: ItemId) {
        if let Some(item) = self.item_mut(id) {
            item.quantity = item.quantity.saturating_add(1);
            tracing::debug!(item_id = %id, quantity = item.quantity, "Incremented cart item");
        }
    }

    /// Remove one unit, never going below 1. Unknown ids are ignored.
    pub fn decrement(&mut self, id: ItemId) {
        if let Some(item) = self.item_mut(id) {
            item.quantity = item.quantity.saturating_sub(1).max(1);
            tracing::debug!(item_id = %id, quantity = item.quantity, "Decremented cart item");
        }
    }

    /// Delete the item. Unknown ids are ignored.
    pub fn remove(&mut self, id: ItemId) {
        let before = self.items.len();
        self.items.retain(|it| it.id != id);
        if self.items.len() != before {
            tracing::debug!(item_id = %id, remaining = self.items.len(), "Removed cart item");
        }
    }

    /// Replace the order-level note.
    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = note.into();
    }

    /// The order-level note as typed.
    #[must_use]
    pub fn note(&self) -> &str {
        &self.note
    }

    /// Items in display order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Look up an item.
    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&LineItem> {
        self.items.iter().find(|it| it.id == id)
    }

    fn item_mut(&mut self, id: ItemId) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|it| it.id == id)
    }

    /// Whether the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all items.
    #[must_use]
    pub fn unit_count(&self) -> u64 {
        self.items.iter().map(|it| u64::from(it.quantity)).sum()
    }

    /// Σ(price × quantity).
    #[must_use]
    pub fn subtotal(&self) -> Price {
        subtotal_of(&self.items)
    }

    /// The fee as displayed: the configured fee, or zero for an empty cart.
    #[must_use]
    pub fn delivery_fee(&self) -> Price {
        applied_fee(&self.items, self.delivery_fee)
    }

    /// Subtotal plus the applied fee.
    #[must_use]
    pub fn total(&self) -> Price {
        self.subtotal() + self.delivery_fee()
    }

    /// Current derived view.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.items.clone(),
            subtotal: self.subtotal(),
            delivery_fee: self.delivery_fee(),
            total: self.total(),
        }
    }

    /// Value passed to the checkout when the customer finishes the order.
    ///
    /// Carries the configured fee, not the applied one; the checkout decides
    /// whether it applies.
    #[must_use]
    pub fn handoff(&self) -> CheckoutHandoff {
        CheckoutHandoff {
            items: self.items.clone(),
            order_note: (!self.note.is_empty()).then(|| self.note.clone()),
            delivery_fee: Some(self.delivery_fee),
            subtotal: Some(self.subtotal()),
            total: Some(self.total()),
        }
    }
}

/// What the cart hands to the checkout.
///
/// Every amount is optional: a checkout opened without going through the cart
/// (or from an older client) still works by recomputing what is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutHandoff {
    /// Items in display order.
    #[serde(default)]
    pub items: Vec<LineItem>,
    /// Order-level note.
    #[serde(default, alias = "orderObs", skip_serializing_if = "Option::is_none")]
    pub order_note: Option<String>,
    /// Configured delivery fee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_fee: Option<Price>,
    /// Subtotal computed by the cart.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<Price>,
    /// Total computed by the cart.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<Price>,
}

impl CheckoutHandoff {
    /// Resolve the amounts the checkout shows.
    ///
    /// A missing fee counts as zero; a missing subtotal is recomputed from the
    /// items; a missing total is subtotal plus the fee when there are items.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        let fee = applied_fee(&self.items, self.delivery_fee.unwrap_or(Price::ZERO));
        let subtotal = self.subtotal.unwrap_or_else(|| subtotal_of(&self.items));
        let total = self.total.unwrap_or(subtotal + fee);

        CartSnapshot {
            items: self.items.clone(),
            subtotal,
            delivery_fee: fee,
            total,
        }
    }

    /// The trimmed order note, if anything is left after trimming.
    #[must_use]
    pub fn trimmed_note(&self) -> Option<&str> {
        self.order_note
            .as_deref()
            .map(str::trim)
            .filter(|note| !note.is_empty())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(id: u32, price: i64, qty: u32) -> LineItem {
        LineItem::new(ItemId::new(id), format!("Item {id}"), Price::from_reais(price), qty)
    }

    fn sample_cart() -> Cart {
        Cart::with_items(
            Price::from_reais(5),
            [item(1, 32, 1), item(2, 18, 1), item(3, 6, 2)],
        )
    }

    #[test]
    fn test_totals_for_sample_cart() {
        let cart = sample_cart();
        assert_eq!(cart.subtotal(), Price::from_reais(62));
        assert_eq!(cart.delivery_fee(), Price::from_reais(5));
        assert_eq!(cart.total(), Price::from_reais(67));
    }

    #[test]
    fn test_decrement_floors_at_one() {
        let mut cart = sample_cart();
        cart.decrement(ItemId::new(1));
        cart.decrement(ItemId::new(1));
        assert_eq!(cart.item(ItemId::new(1)).unwrap().quantity, 1);
        assert_eq!(cart.items().len(), 3);
    }

    #[test]
    fn test_increment_has_no_ceiling() {
        let mut cart = sample_cart();
        for _ in 0..500 {
            cart.increment(ItemId::new(3));
        }
        assert_eq!(cart.item(ItemId::new(3)).unwrap().quantity, 502);
        assert_eq!(cart.subtotal(), Price::from_reais(32 + 18 + 6 * 502));
    }

    #[test]
    fn test_increment_saturates() {
        let mut cart = Cart::with_items(Price::ZERO, [item(1, 1, u32::MAX)]);
        cart.increment(ItemId::new(1));
        assert_eq!(cart.item(ItemId::new(1)).unwrap().quantity, u32::MAX);
    }

    #[test]
    fn test_unknown_ids_are_ignored() {
        let mut cart = sample_cart();
        let before = cart.clone();
        cart.increment(ItemId::new(99));
        cart.decrement(ItemId::new(99));
        cart.remove(ItemId::new(99));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_operations_after_remove_are_noops() {
        let mut cart = sample_cart();
        cart.remove(ItemId::new(2));
        let after_remove = cart.clone();
        cart.increment(ItemId::new(2));
        cart.decrement(ItemId::new(2));
        cart.remove(ItemId::new(2));
        assert_eq!(cart, after_remove);
    }

    #[test]
    fn test_removing_last_item_zeroes_fee_and_total() {
        let mut cart = Cart::with_items(Price::from_reais(5), [item(1, 32, 1)]);
        cart.remove(ItemId::new(1));
        assert!(cart.is_empty());
        assert_eq!(cart.delivery_fee(), Price::ZERO);
        assert_eq!(cart.total(), Price::ZERO);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut cart = sample_cart();
        assert!(!cart.add(item(1, 100, 1)));
        assert_eq!(cart.subtotal(), Price::from_reais(62));
    }

    #[test]
    fn test_zero_quantity_raised_to_one() {
        assert_eq!(item(1, 10, 0).quantity, 1);
    }

    #[test]
    fn test_unit_count() {
        assert_eq!(sample_cart().unit_count(), 4);
    }

    #[test]
    fn test_handoff_carries_amounts_and_note() {
        let mut cart = sample_cart();
        cart.set_note("Sem cebola");
        let handoff = cart.handoff();
        assert_eq!(handoff.order_note.as_deref(), Some("Sem cebola"));
        assert_eq!(handoff.total, Some(Price::from_reais(67)));
        assert_eq!(handoff.snapshot(), cart.snapshot());
    }

    #[test]
    fn test_handoff_without_amounts_recomputes() {
        let handoff = CheckoutHandoff {
            items: vec![item(1, 10, 2)],
            delivery_fee: Some(Price::from_reais(5)),
            ..CheckoutHandoff::default()
        };
        let snapshot = handoff.snapshot();
        assert_eq!(snapshot.subtotal, Price::from_reais(20));
        assert_eq!(snapshot.total, Price::from_reais(25));
    }

    #[test]
    fn test_handoff_missing_fee_counts_as_zero() {
        let handoff = CheckoutHandoff {
            items: vec![item(1, 10, 1)],
            subtotal: Some(Price::from_reais(10)),
            ..CheckoutHandoff::default()
        };
        assert_eq!(handoff.snapshot().total, Price::from_reais(10));
    }

    #[test]
    fn test_handoff_empty_cart_ignores_fee() {
        let handoff = CheckoutHandoff {
            delivery_fee: Some(Price::from_reais(5)),
            ..CheckoutHandoff::default()
        };
        let snapshot = handoff.snapshot();
        assert_eq!(snapshot.delivery_fee, Price::ZERO);
        assert_eq!(snapshot.total, Price::ZERO);
    }

    #[test]
    fn test_handoff_accepts_storefront_field_names() {
        let json = r#"{
            "items": [{"id": 1, "name": "Monster Burger", "price": 32, "qty": 1, "image": ""}],
            "orderObs": "  caprichar no molho ",
            "deliveryFee": 5,
            "subtotal": 32,
            "total": 37
        }"#;
        let handoff: CheckoutHandoff = serde_json::from_str(json).unwrap();
        assert_eq!(handoff.items.len(), 1);
        assert_eq!(handoff.trimmed_note(), Some("caprichar no molho"));
        assert_eq!(handoff.snapshot().total, Price::from_reais(37));
    }

    #[test]
    fn test_blank_note_is_dropped() {
        let handoff = CheckoutHandoff {
            order_note: Some("   ".to_string()),
            ..CheckoutHandoff::default()
        };
        assert_eq!(handoff.trimmed_note(), None);
    }

    #[test]
    fn test_deserialized_zero_quantity_raised_to_one() {
        let json = r#"{"id": 1, "name": "X", "price": 10, "qty": 0}"#;
        let parsed: LineItem = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.quantity, 1);
    }
}
