//! # Payload Validation Library
//!
//! Per-operation payload sanitization and validation for the helpdesk RPC
//! API. Every operation (`tasks:close`, `profiles:retrieve`, ...) has a legend
//! describing the fields it accepts. Incoming entries are cleaned against
//! that legend before a structural validator checks them.
//!
//! ## Features
//!
//! - A catalog of reusable field types with required/optional variants
//! - Legends for every task, comment, catalogue and profile operation
//! - Sanitization that strips unknown fields, coerces loose numbers and
//!   booleans, and fills declared defaults
//! - Structural validation through compiled Draft 7 JSON Schemas
//! - Verdicts that serialize straight into an API response

pub mod catalog;
mod errors;
pub mod legend;
pub mod payload;
pub mod sanitizers;
pub mod schema;
pub mod structural;
pub mod types;
pub mod validator;

pub use catalog::{BaseType, TypeCatalog};
pub use errors::{ValidationError, ValidationResult, Verdict, VerdictError, INVALID_ENTITY_TYPE};
pub use legend::LegendRegistry;
pub use payload::parse_payload;
pub use sanitizers::{SanitizeReport, Sanitizer};
pub use schema::ObjectSchema;
pub use structural::JsonSchemaValidator;
pub use types::Descriptor;
pub use validator::{validate, StructuralValidator, Target, Validator};

/// Re-export commonly used items for convenience
pub mod prelude {
    pub use crate::catalog::{BaseType, TypeCatalog};
    pub use crate::errors::{ValidationError, ValidationResult, Verdict, VerdictError};
    pub use crate::legend::LegendRegistry;
    pub use crate::sanitizers;
    pub use crate::schema::ObjectSchema;
    pub use crate::structural::JsonSchemaValidator;
    pub use crate::types;
    pub use crate::validator::{StructuralValidator, Validator};
}

/// Version of the validation library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Limit for max request payload size (10 MB)
pub const DEFAULT_MAX_PAYLOAD_SIZE: usize = 10 * 1024 * 1024;

/// Default maximum depth for nested objects
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Environment prefix for configuration variables
pub const ENV_PREFIX: &str = "PAYLOAD_VALIDATION";

/// Configuration for the validation library
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Maximum payload size in bytes
    pub max_payload_size: usize,
    /// Maximum depth for nested objects
    pub max_depth: usize,
    /// Pretty-print verdicts in the command line tool
    pub pretty_output: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_payload_size: DEFAULT_MAX_PAYLOAD_SIZE,
            max_depth: DEFAULT_MAX_DEPTH,
            pretty_output: false,
        }
    }
}

impl ValidationConfig {
    /// Build a configuration from `PAYLOAD_VALIDATION_*` environment variables
    ///
    /// Unset or malformed variables fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_payload_size: config_rs::get_env_or(
                &config_rs::get_prefixed_var(ENV_PREFIX, "MAX_PAYLOAD_SIZE"),
                defaults.max_payload_size,
            ),
            max_depth: config_rs::get_env_or(
                &config_rs::get_prefixed_var(ENV_PREFIX, "MAX_DEPTH"),
                defaults.max_depth,
            ),
            pretty_output: config_rs::get_env_flag(
                &config_rs::get_prefixed_var(ENV_PREFIX, "PRETTY"),
                defaults.pretty_output,
            ),
        }
    }
}

/// Get a new default configuration
pub fn default_config() -> ValidationConfig {
    ValidationConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = default_config();
        assert_eq!(config.max_payload_size, DEFAULT_MAX_PAYLOAD_SIZE);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert!(!config.pretty_output);
    }

    #[test]
    fn test_config_from_env() {
        std::env::set_var("PAYLOAD_VALIDATION_MAX_DEPTH", "3");
        std::env::set_var("PAYLOAD_VALIDATION_MAX_PAYLOAD_SIZE", "not a size");
        std::env::set_var("PAYLOAD_VALIDATION_PRETTY", "on");

        let config = ValidationConfig::from_env();
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.max_payload_size, DEFAULT_MAX_PAYLOAD_SIZE);
        assert!(config.pretty_output);

        std::env::remove_var("PAYLOAD_VALIDATION_MAX_DEPTH");
        std::env::remove_var("PAYLOAD_VALIDATION_MAX_PAYLOAD_SIZE");
        std::env::remove_var("PAYLOAD_VALIDATION_PRETTY");
    }
}
