//! End-to-end tests for the FurniCraft storefront.
//!
//! The tests drive the real router in process: no server, no network. A
//! [`TestContext`] plays one browser, carrying the session cookie between
//! requests the way a cookie jar would.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p furnicraft-integration-tests
//! ```
//!
//! # Test Files
//!
//! - `auth` - login, signup, logout and the login redirect
//! - `roles` - page access per role
//! - `shopping` - catalog browsing, cart, wishlist and checkout
//! - `staff` - admin order and catalog management, delivery dashboard

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use tower::ServiceExt;

use furnicraft_storefront::{
    app,
    config::StorefrontConfig,
    data::{Latency, MockBackend},
    middleware::session::SESSION_COOKIE_NAME,
    state::AppState,
};

/// Largest response body the tests will read.
const BODY_LIMIT: usize = 4 * 1024 * 1024;

/// A response reduced to what the tests look at.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    /// `Location` header of a redirect.
    pub location: Option<String>,
    pub body: String,
}

impl TestResponse {
    /// Whether this is a redirect to a URL starting with `prefix`.
    #[must_use]
    pub fn redirects_to(&self, prefix: &str) -> bool {
        self.status.is_redirection()
            && self
                .location
                .as_deref()
                .is_some_and(|location| location.starts_with(prefix))
    }

    /// The redirect target with its query string decoded, for matching
    /// banner messages.
    #[must_use]
    pub fn decoded_location(&self) -> String {
        self.location
            .as_deref()
            .map(|l| urlencoding::decode(l).map_or_else(|_| l.to_string(), |d| d.into_owned()))
            .unwrap_or_default()
    }
}

/// One browser session against a freshly seeded store.
pub struct TestContext {
    app: Router,
    cookie: Option<String>,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// A store with the seed data and no artificial latency.
    #[must_use]
    pub fn new() -> Self {
        let state = AppState::with_backend(
            StorefrontConfig::default(),
            MockBackend::new(Latency::NONE),
        );
        Self {
            app: app(state),
            cookie: None,
        }
    }

    /// A second browser on the same store, with no cookie.
    #[must_use]
    pub fn stranger(&self) -> Self {
        Self {
            app: self.app.clone(),
            cookie: None,
        }
    }

    /// Whether the browser holds a session cookie.
    #[must_use]
    pub const fn has_session(&self) -> bool {
        self.cookie.is_some()
    }

    /// Send a GET request.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the router fails.
    pub async fn get(&mut self, path: &str) -> TestResponse {
        let request = self
            .request("GET", path)
            .body(Body::empty())
            .expect("valid request");
        self.send(request).await
    }

    /// Send a urlencoded form POST.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the router fails.
    pub async fn post(&mut self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        let request = self
            .request("POST", path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .expect("valid request");
        self.send(request).await
    }

    /// GET the target of a redirect.
    ///
    /// # Panics
    ///
    /// Panics if `response` is not a redirect.
    pub async fn follow(&mut self, response: &TestResponse) -> TestResponse {
        let location = response
            .location
            .clone()
            .expect("response should be a redirect");
        self.get(&location).await
    }

    /// Log in with `email` and assert the login went through.
    ///
    /// # Panics
    ///
    /// Panics if the login is rejected.
    pub async fn login(&mut self, email: &str) {
        let response = self
            .post("/auth/login", &[("email", email), ("password", "secret")])
            .await;
        assert!(
            response.redirects_to("/") && !response.redirects_to("/auth"),
            "login as {email} failed: {response:?}"
        );
    }

    fn request(&self, method: &str, path: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(path);
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        for value in response.headers().get_all(header::SET_COOKIE) {
            if let Ok(raw) = value.to_str() {
                self.store_cookie(raw);
            }
        }

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = to_bytes(response.into_body(), BODY_LIMIT)
            .await
            .expect("readable body");

        TestResponse {
            status,
            location,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    fn store_cookie(&mut self, raw: &str) {
        let Some(pair) = raw.split(';').next() else {
            return;
        };
        let Some((name, value)) = pair.split_once('=') else {
            return;
        };
        if name.trim() != SESSION_COOKIE_NAME {
            return;
        }
        let expired = raw.to_ascii_lowercase().contains("max-age=0");
        self.cookie = if value.is_empty() || expired {
            None
        } else {
            Some(pair.trim().to_string())
        };
    }
}
