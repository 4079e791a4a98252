//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Session layer (tower-sessions with in-memory store)
//!
//! The extractors in [`auth`] and [`nav`] read the session that the
//! session layer attaches to each request.

pub mod auth;
pub mod nav;
pub mod request_id;
pub mod session;

pub use auth::{AuthRejection, OptionalAuth, RequireAdmin, RequireAuth, RequireDelivery};
pub use nav::Nav;
pub use request_id::{RequestId, request_id_middleware};
pub use session::create_session_layer;
