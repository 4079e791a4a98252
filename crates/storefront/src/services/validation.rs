//! Form presence checks.

use thiserror::Error;

/// A form was submitted with a required field blank. The message is shown
/// to the visitor as is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub &'static str);

/// Fail with `message` unless every field has non-whitespace content.
///
/// # Errors
///
/// Returns `ValidationError(message)` if any field is blank.
pub fn require_all(fields: &[&str], message: &'static str) -> Result<(), ValidationError> {
    if fields.iter().any(|f| f.trim().is_empty()) {
        return Err(ValidationError(message));
    }
    Ok(())
}

/// Trimmed value, or `None` for a blank field.
#[must_use]
pub fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_all() {
        assert!(require_all(&["a", "b"], "x").is_ok());
        assert_eq!(
            require_all(&["a", "  "], "All fields are required."),
            Err(ValidationError("All fields are required."))
        );
        assert!(require_all(&[], "x").is_ok());
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank("  Sofa "), Some("Sofa".to_string()));
        assert_eq!(non_blank(" \t"), None);
    }
}
