//! Authentication route handlers.
//!
//! Login and signup check the mock user directory and record the visitor's
//! email and role in the session. Passwords are collected on signup but
//! never stored.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::data::User;
use crate::error::{clear_sentry_user, set_sentry_user};
use crate::middleware::Nav;
use crate::models::CurrentUser;
use crate::services::auth::{AuthError, AuthService};
use crate::services::{cart::Cart, wishlist::Wishlist};
use crate::state::AppState;

use super::{local_path, redirect_error};

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    /// Accepted and ignored.
    #[serde(default)]
    pub password: String,
    /// Page to return to after login.
    pub from: Option<String>,
}

/// Signup form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub password_confirm: String,
}

// =============================================================================
// Query Types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub from: Option<String>,
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub nav: Nav,
    pub from: String,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub nav: Nav,
    pub error: Option<String>,
}

// =============================================================================
// Helpers
// =============================================================================

/// Write the identity keys and seed the shopper's cart and wishlist so the
/// nav badges are right from the first page.
async fn start_session(
    state: &AppState,
    session: &Session,
    user: &User,
) -> Result<(), tower_sessions::session::Error> {
    // Fresh session ID on login
    session.cycle_id().await?;

    let current = CurrentUser {
        email: user.email.clone(),
        role: user.role,
    };
    current.store(session).await?;
    if !current.is_admin() && !current.is_delivery() {
        Cart::load(session, state.backend()).await?;
        Wishlist::load(session, state.backend()).await?;
    }
    set_sentry_user(current.email.as_str(), current.role.as_str());
    Ok(())
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(nav: Nav, Query(query): Query<LoginQuery>) -> impl IntoResponse {
    LoginTemplate {
        nav,
        from: local_path(query.from.as_deref(), ""),
        error: query.error,
        success: query.success,
    }
}

/// Handle login form submission.
///
/// An unknown email leaves the session untouched.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let destination = local_path(form.from.as_deref(), "/");
    let retry = match form.from.as_deref() {
        Some(from) if from.starts_with('/') => {
            format!("/auth/login?from={}", urlencoding::encode(from))
        }
        _ => "/auth/login".to_string(),
    };

    match AuthService::new(state.backend()).login(&form.email).await {
        Ok(user) => {
            if let Err(e) = start_session(&state, &session, &user).await {
                tracing::error!("Failed to set session: {}", e);
                return redirect_error(&retry, "Login failed. Please try again.").into_response();
            }
            tracing::info!(role = %user.role, "Logged in");
            Redirect::to(&destination).into_response()
        }
        Err(e) => {
            tracing::warn!("Login failed: {}", e);
            redirect_error(&retry, &e.user_message()).into_response()
        }
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the signup page.
pub async fn register_page(
    nav: Nav,
    Query(query): Query<super::MessageQuery>,
) -> impl IntoResponse {
    RegisterTemplate {
        nav,
        error: query.error,
    }
}

/// Handle signup form submission.
///
/// Registers the email as a shopper and logs them in.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Response {
    let result = AuthService::new(state.backend())
        .register(&form.email, &form.password, &form.password_confirm)
        .await;

    match result {
        Ok(user) => {
            if let Err(e) = start_session(&state, &session, &user).await {
                tracing::error!("Failed to set session: {}", e);
                return redirect_error("/auth/login", "Account created. Please log in.")
                    .into_response();
            }
            tracing::info!("Account created");
            Redirect::to("/").into_response()
        }
        Err(e) => {
            if matches!(e, AuthError::Data(_)) {
                tracing::error!("Signup failed: {}", e);
            } else {
                tracing::warn!("Signup rejected: {}", e);
            }
            redirect_error("/auth/register", &e.user_message()).into_response()
        }
    }
}

// =============================================================================
// Logout
// =============================================================================

/// Handle logout.
///
/// Only the identity keys are removed; the cart stays with the session.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Response {
    if let Err(e) = CurrentUser::clear(&session).await {
        tracing::error!("Failed to clear session: {}", e);
    }
    clear_sentry_user();
    Redirect::to("/auth/login").into_response()
}
