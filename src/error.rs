//! Error handling for ScopeView-RS
//!
//! This module defines the crate's error type and a Result alias. The
//! reactive core itself is mostly infallible: numeric problems surface as
//! NaN/infinite coordinates (see [`InvalidValuePolicy`](crate::config::InvalidValuePolicy)),
//! so the variants here cover validation at the viewmodel boundary,
//! binding lifecycle misuse and configuration I/O.

use thiserror::Error;

/// Main error type for ScopeView-RS operations
#[derive(Error, Debug)]
pub enum ScopeError {
    /// A scale factor of zero or a non-finite scale factor was rejected
    #[error("Invalid scale factor: {0}")]
    InvalidScaleFactor(f64),

    /// A conversion or viewmodel parameter was rejected
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// An operation was attempted on a binding that has been disposed
    #[error("Binding has been disposed")]
    BindingDisposed,

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ScopeError>,
    },
}

impl ScopeError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ScopeError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<serde_json::Error> for ScopeError {
    fn from(err: serde_json::Error) -> Self {
        ScopeError::Serialization(err.to_string())
    }
}

/// Result type alias for ScopeView-RS operations
pub type Result<T> = std::result::Result<T, ScopeError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

/// Validate a scale factor before it enters a linear mapping.
///
/// Zero would make the inverse mapping divide by zero; NaN and infinities
/// would poison every coordinate derived from it.
pub fn validate_scale_factor(value: f64) -> Result<f64> {
    if value == 0.0 || !value.is_finite() {
        Err(ScopeError::InvalidScaleFactor(value))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ScopeError::InvalidParameter("reference position".to_string());
        assert_eq!(err.to_string(), "Invalid parameter: reference position");
    }

    #[test]
    fn test_error_with_context() {
        let err = ScopeError::BindingDisposed;
        let with_ctx = err.with_context("Failed to reassert cursor binding");
        assert!(with_ctx
            .to_string()
            .contains("Failed to reassert cursor binding"));
        assert!(with_ctx.to_string().contains("disposed"));
    }

    #[test]
    fn test_result_ext_context() {
        let result: Result<()> = Err(ScopeError::Config("missing file".to_string()));
        let err = result.context("Loading display config").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Loading display config: Configuration error: missing file"
        );
    }

    #[test]
    fn test_validate_scale_factor() {
        assert_eq!(validate_scale_factor(2.5).unwrap(), 2.5);
        assert_eq!(validate_scale_factor(-1.0).unwrap(), -1.0);
        assert!(matches!(
            validate_scale_factor(0.0),
            Err(ScopeError::InvalidScaleFactor(v)) if v == 0.0
        ));
        assert!(validate_scale_factor(f64::NAN).is_err());
        assert!(validate_scale_factor(f64::INFINITY).is_err());
    }
}
