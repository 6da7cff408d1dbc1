//! Input sanitization utilities
//!
//! This module brings untrusted entries in line with a legend ahead of
//! structural validation. See [`entry`] for the recursive pass and
//! [`coerce`] for the loose primitive conversions it relies on.

pub mod coerce;
pub mod entry;

pub use coerce::{coerce_boolean, coerce_number, loose_boolean, loose_number};
pub use entry::{clean_object, sanitized, Sanitizer};

/// What a sanitization pass changed, as dotted field paths
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanitizeReport {
    /// Fields removed because the legend does not declare them
    pub stripped: Vec<String>,
    /// Fields whose value was coerced to a number or boolean
    pub coerced: Vec<String>,
    /// Fields filled in from a declared default
    pub defaulted: Vec<String>,
}

impl SanitizeReport {
    /// Whether any changes were made during sanitization
    pub fn was_modified(&self) -> bool {
        !(self.stripped.is_empty() && self.coerced.is_empty() && self.defaulted.is_empty())
    }

    /// Short human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "{} stripped, {} coerced, {} defaulted",
            self.stripped.len(),
            self.coerced.len(),
            self.defaulted.len()
        )
    }
}
