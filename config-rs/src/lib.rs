//! config-rs/lib.rs
//! Shared configuration utilities for consistent tool configuration
//! Provides environment lookups with logged fallbacks to defaults

use std::env;
use std::fmt::Display;
use std::str::FromStr;

/// Load variables from a `.env` file in the working directory, if present
///
/// # Returns
/// `true` when a file was found and loaded
pub fn load_dotenv() -> bool {
    match dotenv::dotenv() {
        Ok(path) => {
            log::debug!("Loaded environment from {}", path.display());
            true
        }
        Err(_) => false,
    }
}

/// Build a prefixed environment variable name
///
/// # Arguments
/// * `prefix` - The tool prefix (e.g., "PAYLOAD_VALIDATION")
/// * `key` - The setting name (e.g., "MAX_DEPTH")
///
/// # Returns
/// The upper-cased variable name, e.g. `PAYLOAD_VALIDATION_MAX_DEPTH`
pub fn get_prefixed_var(prefix: &str, key: &str) -> String {
    format!("{}_{}", prefix.to_uppercase(), key.to_uppercase())
}

/// Get a typed value from the environment with proper fallback
///
/// # Arguments
/// * `var_name` - The environment variable to read
/// * `default` - The value to use if the variable is unset or invalid
///
/// # Returns
/// The parsed value, or `default`
pub fn get_env_or<T>(var_name: &str, default: T) -> T
where
    T: FromStr + Display,
{
    match env::var(var_name) {
        Ok(raw) => raw.trim().parse::<T>().unwrap_or_else(|_| {
            log::warn!("Invalid value in {}, using default {}", var_name, default);
            default
        }),
        Err(_) => default,
    }
}

/// Parse a flag spelling such as `1`, `true`, `yes` or `off`
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Get a boolean flag from the environment with proper fallback
pub fn get_env_flag(var_name: &str, default: bool) -> bool {
    match env::var(var_name) {
        Ok(raw) => parse_flag(&raw).unwrap_or_else(|| {
            log::warn!("Invalid flag in {}, using default {}", var_name, default);
            default
        }),
        Err(_) => default,
    }
}
