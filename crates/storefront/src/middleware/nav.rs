//! Navigation shell extractor.
//!
//! Every page renders the same top bar: role-dependent links, cart and
//! wishlist badges, a search box and login/logout. [`Nav`] gathers what the
//! bar needs from the session so handlers only pass it through to their
//! template.

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, OriginalUri},
    http::request::Parts,
};
use tower_sessions::Session;

use furnicraft_core::Role;

use crate::models::CurrentUser;
use crate::services::{cart::Cart, wishlist::Wishlist};

/// Data for the top bar, precomputed for the templates.
#[derive(Debug, Clone, Default)]
pub struct Nav {
    pub logged_in: bool,
    pub email: String,
    pub role_label: String,
    /// Shopper links: orders, wishlist, cart.
    pub is_user: bool,
    /// Admin links: all orders, catalog management.
    pub is_admin: bool,
    /// Delivery dashboard link.
    pub is_delivery: bool,
    pub cart_count: usize,
    pub wishlist_count: usize,
    /// Path and query of the current page, for the login link's `from`.
    pub path: String,
}

impl Nav {
    /// Build the bar for `user` from the session's cart and wishlist.
    pub async fn load(session: &Session, user: Option<&CurrentUser>, path: String) -> Self {
        let Some(user) = user else {
            return Self {
                path,
                ..Self::default()
            };
        };
        let (cart_count, wishlist_count) = if user.role == Role::User {
            (
                Cart::peek(session).await.map_or(0, |c| c.summary().count),
                Wishlist::peek(session).await.map_or(0, |w| w.len()),
            )
        } else {
            (0, 0)
        };
        Self {
            logged_in: true,
            email: user.email.to_string(),
            role_label: user.role.label().to_string(),
            is_user: user.role == Role::User,
            is_admin: user.is_admin(),
            is_delivery: user.is_delivery(),
            cart_count,
            wishlist_count,
            path,
        }
    }

    /// Login link that returns here afterwards.
    #[must_use]
    pub fn login_href(&self) -> String {
        if self.path.is_empty() || self.path == "/" {
            "/auth/login".to_string()
        } else {
            format!("/auth/login?from={}", urlencoding::encode(&self.path))
        }
    }
}

/// Path and query of the request as the client sent it. Nested routers
/// strip their prefix from `parts.uri`, so the original URI wins.
pub(crate) fn path_and_query(parts: &Parts) -> String {
    let uri = parts
        .extensions
        .get::<OriginalUri>()
        .map_or(&parts.uri, |original| &original.0);
    uri.path_and_query()
        .map_or_else(|| uri.path().to_string(), |pq| pq.as_str().to_string())
}

impl<S> FromRequestParts<S> for Nav
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let path = path_and_query(parts);
        let Some(session) = parts.extensions.get::<Session>() else {
            return Ok(Self {
                path,
                ..Self::default()
            });
        };
        let user = CurrentUser::from_session(session).await;
        Ok(Self::load(session, user.as_ref(), path).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_href_keeps_destination() {
        let nav = Nav {
            path: "/items?q=sofa".to_string(),
            ..Nav::default()
        };
        assert_eq!(nav.login_href(), "/auth/login?from=%2Fitems%3Fq%3Dsofa");

        let nav = Nav {
            path: "/".to_string(),
            ..Nav::default()
        };
        assert_eq!(nav.login_href(), "/auth/login");
    }
}
