//! Authentication error types.

use thiserror::Error;

use crate::data::DataError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] furnicraft_core::EmailError),

    /// Email not in the user directory.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Email already registered.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Password and confirmation differ.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// A required signup field is blank.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// Mock data layer error.
    #[error("data error: {0}")]
    Data(#[from] DataError),
}

impl AuthError {
    /// Message shown on the login or signup form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidEmail(_) => "Invalid email address".to_string(),
            Self::InvalidCredentials => "Invalid credentials".to_string(),
            Self::UserAlreadyExists => "An account with this email already exists".to_string(),
            Self::PasswordMismatch => "Passwords do not match".to_string(),
            Self::MissingField(field) => format!("Please enter your {field}"),
            Self::Data(_) => "Signup failed. Please try again.".to_string(),
        }
    }
}
