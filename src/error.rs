//! Structured error types for configuration and resource operations.

use serde::Serialize;
use thiserror::Error;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Configuration errors (non-fatal)
    MissingConfigSource,
    InvalidValue,

    // Resource errors
    ResourceNotFound,
    UnknownCategory,
    ResourceIndexUninitialized,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::MissingConfigSource => "MISSING_CONFIG_SOURCE",
            ErrorCode::InvalidValue => "INVALID_VALUE",
            ErrorCode::ResourceNotFound => "RESOURCE_NOT_FOUND",
            ErrorCode::UnknownCategory => "UNKNOWN_CATEGORY",
            ErrorCode::ResourceIndexUninitialized => "RESOURCE_INDEX_UNINITIALIZED",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw configuration value that could not be converted.
///
/// Carries the field name it was read from so the failure can be reported
/// against the offending key.
#[derive(Debug, Clone, Error, Serialize, PartialEq, Eq)]
#[error("Invalid {field}: {value} - {reason}")]
pub struct ValidationError {
    pub field: String,
    pub value: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &str, value: &str, reason: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        ErrorCode::InvalidValue
    }
}

/// Errors raised by the resource index.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// No category with this name was registered by `initialize`.
    #[error("Unknown resource category: {0}")]
    UnknownCategory(String),

    /// The name could not be located through any search step.
    #[error("Resource not found: {name} (category {category})")]
    NotFound { category: String, name: String },

    /// `initialize` had nothing to index and no previous declarations.
    #[error("No resource configuration provided and no previous configuration cached")]
    Uninitialized,
}

impl ResourceError {
    pub fn not_found(category: &str, name: &str) -> Self {
        Self::NotFound {
            category: category.to_string(),
            name: name.to_string(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ResourceError::UnknownCategory(_) => ErrorCode::UnknownCategory,
            ResourceError::NotFound { .. } => ErrorCode::ResourceNotFound,
            ResourceError::Uninitialized => ErrorCode::ResourceIndexUninitialized,
        }
    }
}

/// Result type for validator operations.
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// Result type for resource operations.
pub type ResourceResult<T> = std::result::Result<T, ResourceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_message() {
        let err = ValidationError::new("WINDOW_WIDTH", "-3", "must be positive");
        assert_eq!(err.to_string(), "Invalid WINDOW_WIDTH: -3 - must be positive");
        assert_eq!(err.code(), ErrorCode::InvalidValue);
    }

    #[test]
    fn test_resource_error_codes() {
        assert_eq!(
            ResourceError::not_found("icons", "x.png").code(),
            ErrorCode::ResourceNotFound
        );
        assert_eq!(
            ResourceError::Uninitialized.code(),
            ErrorCode::ResourceIndexUninitialized
        );
        assert_eq!(
            ResourceError::UnknownCategory("fonts".into()).code(),
            ErrorCode::UnknownCategory
        );
    }

    #[test]
    fn test_error_code_serializes_screaming_snake() {
        let json = serde_json::to_string(&ErrorCode::MissingConfigSource).unwrap();
        assert_eq!(json, "\"MISSING_CONFIG_SOURCE\"");
        assert_eq!(ErrorCode::MissingConfigSource.to_string(), "MISSING_CONFIG_SOURCE");
    }
}
