//! Authentication service.
//!
//! Checks emails against the mock user directory. There are no passwords
//! to verify: knowing a registered email is enough to log in.

mod error;

pub use error::AuthError;

use furnicraft_core::{Email, Role};

use crate::data::{DataError, MockBackend, User};

/// Authentication service over the mock user directory.
pub struct AuthService<'a> {
    backend: &'a MockBackend,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(backend: &'a MockBackend) -> Self {
        Self { backend }
    }

    /// Look up the user for a login attempt.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for any email that is not
    /// registered, malformed ones included.
    pub async fn login(&self, email: &str) -> Result<User, AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;
        self.backend
            .find_user(&email)
            .await
            .ok_or(AuthError::InvalidCredentials)
    }

    /// Register a new shopper account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingField` for a blank password,
    /// `AuthError::PasswordMismatch` if the confirmation differs,
    /// `AuthError::InvalidEmail` for a malformed email and
    /// `AuthError::UserAlreadyExists` if the email is taken.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        password_confirm: &str,
    ) -> Result<User, AuthError> {
        if password.is_empty() {
            return Err(AuthError::MissingField("password"));
        }
        if password != password_confirm {
            return Err(AuthError::PasswordMismatch);
        }
        let email = Email::parse(email)?;

        self.backend
            .register_user(email, Role::User)
            .await
            .map_err(|e| match e {
                DataError::Duplicate(_) => AuthError::UserAlreadyExists,
                other => AuthError::Data(other),
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::data::Latency;

    use super::*;

    #[tokio::test]
    async fn test_login_known_email() {
        let backend = MockBackend::new(Latency::NONE);
        let user = AuthService::new(&backend)
            .login(" ADMIN@example.com ")
            .await
            .unwrap();
        assert_eq!(user.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let backend = MockBackend::new(Latency::NONE);
        let err = AuthService::new(&backend)
            .login("stranger@example.com")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert_eq!(err.user_message(), "Invalid credentials");
    }

    #[tokio::test]
    async fn test_login_malformed_email_is_unknown() {
        let backend = MockBackend::new(Latency::NONE);
        for raw in ["bob", "", "a@b@c"] {
            let err = AuthService::new(&backend).login(raw).await.unwrap_err();
            assert!(matches!(err, AuthError::InvalidCredentials), "{raw:?}");
        }
    }

    #[tokio::test]
    async fn test_register_checks_passwords_first() {
        let backend = MockBackend::new(Latency::NONE);
        let auth = AuthService::new(&backend);

        let err = auth
            .register("new@example.com", "secret1", "secret2")
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Passwords do not match");

        let err = auth
            .register("rajesh@example.com", "pw", "pw")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserAlreadyExists));

        let user = auth.register("new@example.com", "pw", "pw").await.unwrap();
        assert_eq!(user.role, Role::User);
        assert!(auth.login("new@example.com").await.is_ok());
    }
}
