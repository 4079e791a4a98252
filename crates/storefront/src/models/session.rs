//! Session-related types.
//!
//! The logged-in identity is kept as two plain strings, `email` and `role`,
//! so the session looks the same as the browser session storage the site
//! has always used.

use tower_sessions::Session;

use furnicraft_core::{Email, Role};

/// Session-stored user identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub email: Email,
    pub role: Role,
}

impl CurrentUser {
    /// Read the identity from the session.
    ///
    /// Returns `None` when either key is missing or unparseable.
    pub async fn from_session(session: &Session) -> Option<Self> {
        let read = |key: &'static str| async move {
            session.get::<String>(key).await.unwrap_or_else(|e| {
                tracing::warn!("Failed to read {} from session: {}", key, e);
                None
            })
        };
        let email = read(keys::EMAIL).await?;
        let role = read(keys::ROLE).await?;
        Some(Self {
            email: Email::parse(&email).ok()?,
            role: role.parse().ok()?,
        })
    }

    /// Write both identity keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn store(&self, session: &Session) -> Result<(), tower_sessions::session::Error> {
        session.insert(keys::EMAIL, self.email.as_str()).await?;
        session.insert(keys::ROLE, self.role.as_str()).await
    }

    /// Remove both identity keys (logout).
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn clear(session: &Session) -> Result<(), tower_sessions::session::Error> {
        session.remove::<String>(keys::EMAIL).await?;
        session.remove::<String>(keys::ROLE).await?;
        Ok(())
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    #[must_use]
    pub fn is_delivery(&self) -> bool {
        self.role == Role::DeliveryMan
    }
}

/// Session keys.
pub mod keys {
    /// Logged-in email address.
    pub const EMAIL: &str = "email";

    /// Logged-in role (`USER`, `ADMIN` or `DELIVERY_MAN`).
    pub const ROLE: &str = "role";

    /// The visitor's cart lines.
    pub const CART: &str = "cart";

    /// The visitor's wishlisted item IDs.
    pub const WISHLIST: &str = "wishlist";

    /// A delivery person's availability.
    pub const DELIVERY_STATUS: &str = "delivery_status";
}
