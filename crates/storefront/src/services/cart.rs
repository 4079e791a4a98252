//! Per-session shopping cart.
//!
//! The cart lives in the session under [`session_keys::CART`]. A session
//! that has never touched the cart starts from the mock default cart.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use furnicraft_core::{ItemId, Price};

use crate::data::{CartLine, Item, MockBackend};
use crate::models::session_keys;

/// Cart totals shown in the nav badge and the order summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartSummary {
    /// Number of distinct lines, not units.
    pub count: usize,
    pub total: Price,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    #[must_use]
    pub const fn new(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    /// Read the cart from the session, seeding it with the default cart on
    /// first access.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn load(
        session: &Session,
        backend: &MockBackend,
    ) -> Result<Self, tower_sessions::session::Error> {
        if let Some(cart) = session.get::<Self>(session_keys::CART).await? {
            return Ok(cart);
        }
        let cart = Self::new(backend.default_cart().await);
        cart.save(session).await?;
        Ok(cart)
    }

    /// Read the cart without seeding it. Used for the nav badge.
    pub async fn peek(session: &Session) -> Option<Self> {
        session
            .get::<Self>(session_keys::CART)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to read cart from session: {}", e);
                None
            })
    }

    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn save(&self, session: &Session) -> Result<(), tower_sessions::session::Error> {
        session.insert(session_keys::CART, self).await
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: ItemId) -> bool {
        self.lines.iter().any(|line| line.item_id == id)
    }

    /// Add `quantity` units of `item`, incrementing an existing line.
    pub fn add(&mut self, item: &Item, quantity: u32) {
        let quantity = quantity.max(1);
        match self.lines.iter_mut().find(|line| line.item_id == item.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.lines.push(CartLine::for_item(item, quantity)),
        }
    }

    /// Set a line's quantity. Anything below 1 removes the line.
    ///
    /// Returns `false` if the item is not in the cart.
    pub fn set_quantity(&mut self, id: ItemId, quantity: i64) -> bool {
        let Some(pos) = self.lines.iter().position(|line| line.item_id == id) else {
            return false;
        };
        match u32::try_from(quantity) {
            Ok(q) if q >= 1 => self.lines[pos].quantity = q,
            Ok(_) => {
                self.lines.remove(pos);
            }
            Err(_) if quantity > 0 => self.lines[pos].quantity = u32::MAX,
            Err(_) => {
                self.lines.remove(pos);
            }
        }
        true
    }

    /// Returns `false` if the item was not in the cart.
    pub fn remove(&mut self, id: ItemId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.item_id != id);
        self.lines.len() != before
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary {
            count: self.lines.len(),
            total: self.lines.iter().map(CartLine::line_total).sum(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(id: u32, rupees: i64) -> Item {
        Item {
            id: ItemId::new(id),
            name: format!("Item {id}"),
            price: Price::from_rupees(rupees),
            description: String::new(),
            photos: vec![],
            category: "Living Room".to_string(),
            subcategory: "Sofas".to_string(),
        }
    }

    #[test]
    fn test_add_increments_existing_line() {
        let mut cart = Cart::default();
        cart.add(&item(1, 100), 1);
        cart.add(&item(1, 100), 2);
        cart.add(&item(2, 50), 1);

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.lines()[0].quantity, 3);
    }

    #[test]
    fn test_set_quantity_below_one_removes() {
        let mut cart = Cart::default();
        cart.add(&item(1, 100), 1);
        cart.add(&item(2, 100), 1);

        assert!(cart.set_quantity(ItemId::new(1), 4));
        assert_eq!(cart.lines()[0].quantity, 4);

        assert!(cart.set_quantity(ItemId::new(1), 0));
        assert!(!cart.contains(ItemId::new(1)));

        assert!(cart.set_quantity(ItemId::new(2), -3));
        assert!(cart.is_empty());

        assert!(!cart.set_quantity(ItemId::new(9), 2));
    }

    #[test]
    fn test_summary_totals() {
        let mut cart = Cart::default();
        cart.add(&item(1, 35_000), 2);
        cart.add(&item(2, 12_000), 1);

        for line in cart.lines() {
            assert_eq!(line.line_total(), line.price.times(line.quantity));
        }
        let summary = cart.summary();
        assert_eq!(summary.count, 2);
        assert_eq!(summary.total, Price::from_rupees(82_000));
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = Cart::default();
        cart.add(&item(1, 100), 1);
        cart.add(&item(2, 100), 1);

        assert!(cart.remove(ItemId::new(1)));
        assert!(!cart.remove(ItemId::new(1)));
        cart.clear();
        assert_eq!(cart.summary().total, Price::ZERO);
    }

    #[test]
    fn test_serializes_as_plain_line_list() {
        let mut cart = Cart::default();
        cart.add(&item(3, 100), 1);
        let json = serde_json::to_value(&cart).unwrap();
        assert!(json.is_array());
        let back: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(back, cart);
    }

    #[tokio::test]
    async fn test_unreadable_session_has_no_cart() {
        let session = crate::services::test_support::broken_session();
        assert_eq!(Cart::peek(&session).await, None);

        let backend = MockBackend::new(crate::data::Latency::NONE);
        assert!(Cart::load(&session, &backend).await.is_err());
    }
}
