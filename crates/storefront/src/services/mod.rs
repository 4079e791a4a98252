//! Business logic services for storefront.
//!
//! # Services
//!
//! - `auth` - login and signup against the mock user directory
//! - `cart` - the per-session cart
//! - `wishlist` - the per-session wishlist
//! - `orders` - checkout and customer cancellation
//! - `delivery` - confirmation codes and delivery availability
//! - `configurator` - sofa leg and colour selection
//! - `validation` - form presence checks

pub mod auth;
pub mod cart;
pub mod configurator;
pub mod delivery;
pub mod orders;
pub mod validation;
pub mod wishlist;

/// Sessions whose store always fails, for exercising error paths.
#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use tower_sessions::session::{Id, Record};
    use tower_sessions::session_store::{self, SessionStore};
    use tower_sessions::Session;

    #[derive(Debug)]
    struct BrokenStore;

    #[async_trait::async_trait]
    impl SessionStore for BrokenStore {
        async fn save(&self, _record: &Record) -> session_store::Result<()> {
            Err(session_store::Error::Backend("store offline".to_string()))
        }

        async fn load(&self, _id: &Id) -> session_store::Result<Option<Record>> {
            Err(session_store::Error::Backend("store offline".to_string()))
        }

        async fn delete(&self, _id: &Id) -> session_store::Result<()> {
            Err(session_store::Error::Backend("store offline".to_string()))
        }
    }

    /// A session with a cookie ID whose store cannot be reached.
    pub fn broken_session() -> Session {
        Session::new(Some(Id::default()), Arc::new(BrokenStore), None)
    }
}
