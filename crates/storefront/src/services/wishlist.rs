//! Per-session wishlist: a set of item IDs under [`session_keys::WISHLIST`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use furnicraft_core::ItemId;

use crate::data::MockBackend;
use crate::models::session_keys;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wishlist(BTreeSet<ItemId>);

impl Wishlist {
    /// Read the wishlist, seeding it with the default wishlist on first
    /// access.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn load(
        session: &Session,
        backend: &MockBackend,
    ) -> Result<Self, tower_sessions::session::Error> {
        if let Some(wishlist) = session.get::<Self>(session_keys::WISHLIST).await? {
            return Ok(wishlist);
        }
        let wishlist = Self(backend.default_wishlist().await);
        wishlist.save(session).await?;
        Ok(wishlist)
    }

    /// Read the wishlist without seeding it.
    pub async fn peek(session: &Session) -> Option<Self> {
        session
            .get::<Self>(session_keys::WISHLIST)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to read wishlist from session: {}", e);
                None
            })
    }

    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn save(&self, session: &Session) -> Result<(), tower_sessions::session::Error> {
        session.insert(session_keys::WISHLIST, self).await
    }

    /// Add the item if absent, remove it if present. Returns whether the
    /// item is wishlisted afterwards.
    pub fn toggle(&mut self, id: ItemId) -> bool {
        if self.0.remove(&id) {
            false
        } else {
            self.0.insert(id);
            true
        }
    }

    pub fn remove(&mut self, id: ItemId) -> bool {
        self.0.remove(&id)
    }

    #[must_use]
    pub fn contains(&self, id: ItemId) -> bool {
        self.0.contains(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<ItemId> for Wishlist {
    fn from_iter<I: IntoIterator<Item = ItemId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_restores_set() {
        let original: Wishlist = [2, 12].into_iter().map(ItemId::new).collect();

        for id in [1, 2, 12, 40] {
            let mut wishlist = original.clone();
            let added = wishlist.toggle(ItemId::new(id));
            assert_eq!(added, !original.contains(ItemId::new(id)));
            wishlist.toggle(ItemId::new(id));
            assert_eq!(wishlist, original);
        }
    }

    #[test]
    fn test_remove() {
        let mut wishlist: Wishlist = [5].into_iter().map(ItemId::new).collect();
        assert!(wishlist.remove(ItemId::new(5)));
        assert!(!wishlist.remove(ItemId::new(5)));
        assert!(wishlist.is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_session_has_no_wishlist() {
        let session = crate::services::test_support::broken_session();
        assert_eq!(Wishlist::peek(&session).await, None);
    }
}
