//! Core error types for feincms3-rs.
//!
//! [`Feincms3Error`] covers configuration, lookup, validation, serialization,
//! IO and cache failures. Plugin validation produces [`ValidationError`]s that
//! can carry per-field messages, the way model forms report them.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// Represents a validation error with optional field-level errors.
///
/// # Examples
///
/// ```
/// use feincms3_rs_core::error::ValidationError;
///
/// let err = ValidationError::new("Enter a valid URL.", "invalid");
/// assert_eq!(err.to_string(), "Enter a valid URL.");
///
/// let err = ValidationError::for_field("url", err);
/// assert!(err.to_string().starts_with("url: "));
/// ```
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The primary error message.
    pub message: String,
    /// A short code identifying the type of validation failure (e.g. "required", "invalid").
    pub code: String,
    /// Per-field validation errors, keyed by field name.
    pub field_errors: HashMap<String, Vec<Self>>,
}

impl ValidationError {
    /// Creates a new `ValidationError` with a message and code.
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            field_errors: HashMap::new(),
        }
    }

    /// Creates a `ValidationError` containing per-field errors.
    pub fn with_field_errors(field_errors: HashMap<String, Vec<Self>>) -> Self {
        Self {
            message: String::new(),
            code: String::new(),
            field_errors,
        }
    }

    /// Wraps a single error as the only error of the named field.
    pub fn for_field(field: impl Into<String>, error: Self) -> Self {
        let mut field_errors = HashMap::new();
        field_errors.insert(field.into(), vec![error]);
        Self::with_field_errors(field_errors)
    }

    /// Returns the errors recorded for `field`, if any.
    pub fn errors_for(&self, field: &str) -> &[Self] {
        self.field_errors.get(field).map_or(&[], Vec::as_slice)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.message.is_empty() {
            write!(f, "{}", self.message)?;
        } else if !self.field_errors.is_empty() {
            let mut fields: Vec<_> = self.field_errors.iter().collect();
            fields.sort_by(|a, b| a.0.cmp(b.0));
            let mut first = true;
            for (field, errors) in fields {
                for error in errors {
                    if !first {
                        write!(f, "; ")?;
                    }
                    write!(f, "{field}: {error}")?;
                    first = false;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// The primary error type for feincms3-rs.
///
/// Embed resolution never surfaces errors to its callers. Everything else
/// (settings loading, cache backends, URL reversal, plugin validation)
/// reports through this enum.
#[derive(Error, Debug)]
pub enum Feincms3Error {
    /// A lookup (URL name, application, page) found nothing.
    #[error("Not found: {0}")]
    NotFound(String),

    /// One or more fields failed validation.
    #[error("Validation error: {0}")]
    ValidationError(ValidationError),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The project is improperly configured.
    #[error("Improperly configured: {0}")]
    ImproperlyConfigured(String),

    /// A cache backend failed to read or write an entry.
    #[error("Cache error: {0}")]
    CacheError(String),

    /// An error occurred during serialization or deserialization.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<ValidationError> for Feincms3Error {
    fn from(err: ValidationError) -> Self {
        Self::ValidationError(err)
    }
}

/// A convenience type alias for `Result<T, Feincms3Error>`.
pub type Feincms3Result<T> = Result<T, Feincms3Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display_simple() {
        let err = ValidationError::new("This field is required.", "required");
        assert_eq!(err.to_string(), "This field is required.");
    }

    #[test]
    fn test_validation_error_display_field_errors_sorted() {
        let mut field_errors = HashMap::new();
        field_errors.insert(
            "url".to_string(),
            vec![ValidationError::new("Enter a valid URL.", "invalid")],
        );
        field_errors.insert(
            "html".to_string(),
            vec![ValidationError::new("This field is required.", "required")],
        );
        let err = ValidationError::with_field_errors(field_errors);
        assert_eq!(
            err.to_string(),
            "html: This field is required.; url: Enter a valid URL."
        );
    }

    #[test]
    fn test_errors_for_field() {
        let err = ValidationError::for_field("url", ValidationError::new("bad", "invalid"));
        assert_eq!(err.errors_for("url").len(), 1);
        assert_eq!(err.errors_for("url")[0].code, "invalid");
        assert!(err.errors_for("html").is_empty());
    }

    #[test]
    fn test_feincms3_error_display() {
        let err = Feincms3Error::NotFound("article-detail".into());
        assert_eq!(err.to_string(), "Not found: article-detail");
    }

    #[test]
    fn test_validation_error_conversion() {
        let err: Feincms3Error = ValidationError::new("x", "required").into();
        assert!(matches!(err, Feincms3Error::ValidationError(_)));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: Feincms3Error = io_err.into();
        assert!(err.to_string().contains("file missing"));
    }
}
