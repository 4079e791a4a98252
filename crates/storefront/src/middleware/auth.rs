//! Authentication extractors and role guards.
//!
//! Being logged in means the session carries the `email` and `role` keys.
//! Anonymous visitors to protected pages are sent to the login page with
//! the page they wanted in `from`; logged-in visitors with the wrong role
//! get a 403 page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use furnicraft_core::Role;

use super::nav::{Nav, path_and_query};
use crate::models::CurrentUser;

/// Extractor that requires a logged-in user of any role.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.email)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

/// Error returned when a guard rejects the request.
pub enum AuthRejection {
    /// Not logged in: go to the login page, then come back to `from`.
    RedirectToLogin { from: String },
    /// Logged in with a role that may not see the page.
    Forbidden(Box<ForbiddenTemplate>),
    /// No session layer in front of the handler.
    MissingSession,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin { from } => {
                Redirect::to(&format!("/auth/login?from={}", urlencoding::encode(&from)))
                    .into_response()
            }
            Self::Forbidden(page) => (StatusCode::FORBIDDEN, *page).into_response(),
            Self::MissingSession => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

/// Shown to logged-in users who lack the page's role.
#[derive(Template, WebTemplate)]
#[template(path = "error/forbidden.html")]
pub struct ForbiddenTemplate {
    pub nav: Nav,
    pub required: &'static str,
}

async fn require_user(parts: &Parts) -> Result<(&Session, CurrentUser), AuthRejection> {
    // Get the session from extensions (set by SessionManagerLayer)
    let session = parts
        .extensions
        .get::<Session>()
        .ok_or(AuthRejection::MissingSession)?;

    let user = CurrentUser::from_session(session)
        .await
        .ok_or_else(|| AuthRejection::RedirectToLogin {
            from: path_and_query(parts),
        })?;
    Ok((session, user))
}

async fn require_role(parts: &Parts, role: Role) -> Result<CurrentUser, AuthRejection> {
    let (session, user) = require_user(parts).await?;
    if user.role != role {
        tracing::warn!(email = %user.email, role = %user.role.as_str(), path = %parts.uri.path(), "Role check failed");
        let nav = Nav::load(session, Some(&user), path_and_query(parts)).await;
        return Err(AuthRejection::Forbidden(Box::new(ForbiddenTemplate {
            nav,
            required: role.label(),
        })));
    }
    Ok(user)
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let (_, user) = require_user(parts).await?;
        Ok(Self(user))
    }
}

/// Extractor that requires the ADMIN role.
pub struct RequireAdmin(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_role(parts, Role::Admin).await.map(Self)
    }
}

/// Extractor that requires the DELIVERY_MAN role.
pub struct RequireDelivery(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireDelivery
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_role(parts, Role::DeliveryMan).await.map(Self)
    }
}

/// Extractor that optionally gets the current user.
///
/// Unlike `RequireAuth`, this does not reject the request if nobody is
/// logged in.
pub struct OptionalAuth(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => CurrentUser::from_session(session).await,
            None => None,
        };

        Ok(Self(user))
    }
}
