//! Error handling for the validation library
//!
//! Infrastructure failures (unparsable payloads, schema export problems, bad
//! configuration) are reported as [`ValidationError`]. Rejections of a payload
//! are never errors: they travel back to the caller inside a [`Verdict`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message reported when an operation name has no registered legend
pub const INVALID_ENTITY_TYPE: &str = "invalid entity type";

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Enum representing different validation error types
#[derive(Error, Debug)]
pub enum ValidationError {
    /// No legend is registered under the requested operation name
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// A legend could not be turned into a structural schema
    #[error("Schema compilation failed: {0}")]
    SchemaCompilation(String),

    /// Payload is not well-formed JSON
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Payload size exceeds maximum
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Command line arguments could not be understood
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Reading the payload failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing a verdict failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single structural violation as reported to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictError {
    /// Human-readable description of the violation
    pub message: String,
    /// JSON pointer of the offending field, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    /// Schema keyword that failed (`required`, `maximum`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
}

impl VerdictError {
    /// Create an error carrying only a message
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
            property: None,
            attribute: None,
        }
    }

    /// Attach the instance path of the offending field
    pub fn at<S: Into<String>>(mut self, property: S) -> Self {
        self.property = Some(property.into());
        self
    }

    /// Attach the failing schema keyword
    pub fn attribute<S: Into<String>>(mut self, attribute: S) -> Self {
        self.attribute = Some(attribute.into());
        self
    }
}

/// Outcome of validating one entry: `{valid, errors}` on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub valid: bool,
    pub errors: Vec<VerdictError>,
}

impl Verdict {
    /// A passing verdict with no errors
    pub fn valid() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    /// A failing verdict carrying the given errors
    pub fn invalid<I>(errors: I) -> Self
    where
        I: IntoIterator<Item = VerdictError>,
    {
        Self {
            valid: false,
            errors: errors.into_iter().collect(),
        }
    }

    /// Verdict for an empty or non-empty error list
    pub fn from_errors(errors: Vec<VerdictError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// The verdict returned for unregistered operation names
    pub fn invalid_entity_type() -> Self {
        Self::invalid([VerdictError::new(INVALID_ENTITY_TYPE)])
    }

    /// Convert an infrastructure error into a failing verdict
    pub fn from_error(error: &ValidationError) -> Self {
        match error {
            ValidationError::UnknownOperation(_) => Self::invalid_entity_type(),
            other => Self::invalid([VerdictError::new(other.to_string())]),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Messages of all errors, in order
    pub fn messages(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.message.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invalid_entity_type_shape() {
        let verdict = Verdict::invalid_entity_type();
        assert_eq!(
            serde_json::to_value(&verdict).unwrap(),
            json!({ "valid": false, "errors": [{ "message": "invalid entity type" }] })
        );
    }

    #[test]
    fn test_unknown_operation_maps_to_invalid_entity_type() {
        let err = ValidationError::UnknownOperation("nonexistent:op".to_string());
        assert_eq!(Verdict::from_error(&err), Verdict::invalid_entity_type());
        assert_eq!(err.to_string(), "Unknown operation: nonexistent:op");
    }

    #[test]
    fn test_from_errors() {
        assert!(Verdict::from_errors(Vec::new()).is_valid());

        let verdict = Verdict::from_errors(vec![VerdictError::new("too big")
            .at("/limit")
            .attribute("maximum")]);
        assert!(!verdict.is_valid());
        assert_eq!(verdict.messages(), vec!["too big"]);
        assert_eq!(verdict.errors[0].property.as_deref(), Some("/limit"));
    }

    #[test]
    fn test_verdict_round_trips_through_json() {
        let raw = json!({
            "valid": false,
            "errors": [{ "message": "is required", "property": "/taskId", "attribute": "required" }]
        });
        let verdict: Verdict = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(verdict.errors[0].attribute.as_deref(), Some("required"));
        assert_eq!(serde_json::to_value(&verdict).unwrap(), raw);
    }
}
