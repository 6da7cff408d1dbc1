//! Validation entry point
//!
//! [`Validator::validate`] resolves the legend for an operation (or takes a
//! schema directly), sanitizes the entry against it and hands both to a
//! [`StructuralValidator`] whose verdict is returned verbatim.

use serde_json::Value;

use crate::errors::Verdict;
use crate::legend::LegendRegistry;
use crate::sanitizers::Sanitizer;
use crate::schema::ObjectSchema;
use crate::ValidationConfig;

/// Generic structural check of an entry against a schema
///
/// Implementations evaluate required fields, numeric ranges, string
/// lengths, enum membership and patterns, and report every violation.
pub trait StructuralValidator {
    fn validate(&self, entry: &Value, schema: &ObjectSchema) -> Verdict;
}

impl<F> StructuralValidator for F
where
    F: Fn(&Value, &ObjectSchema) -> Verdict,
{
    fn validate(&self, entry: &Value, schema: &ObjectSchema) -> Verdict {
        self(entry, schema)
    }
}

/// What an entry is validated against
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    /// An operation name looked up in the legend registry
    Operation(&'a str),
    /// A schema supplied directly by the caller
    Schema(&'a ObjectSchema),
}

impl<'a> From<&'a str> for Target<'a> {
    fn from(operation: &'a str) -> Self {
        Target::Operation(operation)
    }
}

impl<'a> From<&'a String> for Target<'a> {
    fn from(operation: &'a String) -> Self {
        Target::Operation(operation.as_str())
    }
}

impl<'a> From<&'a ObjectSchema> for Target<'a> {
    fn from(schema: &'a ObjectSchema) -> Self {
        Target::Schema(schema)
    }
}

/// Sanitizes and validates entries against registered legends
#[derive(Debug, Clone)]
pub struct Validator<'r> {
    legends: &'r LegendRegistry,
    sanitizer: Sanitizer,
}

impl<'r> Validator<'r> {
    /// Create a validator over a legend registry with default settings
    pub fn new(legends: &'r LegendRegistry) -> Self {
        Self {
            legends,
            sanitizer: Sanitizer::default(),
        }
    }

    /// Create a validator using the depth limit from `config`
    pub fn with_config(legends: &'r LegendRegistry, config: &ValidationConfig) -> Self {
        Self {
            legends,
            sanitizer: Sanitizer::new(config.max_depth),
        }
    }

    pub fn legends(&self) -> &'r LegendRegistry {
        self.legends
    }

    /// Sanitize `entry` and run `structural` over it
    ///
    /// `entry` is modified in place. Unknown operation names short-circuit
    /// with an "invalid entity type" verdict before anything else runs.
    pub fn validate<'a, S>(&self, structural: &S, target: impl Into<Target<'a>>, entry: &mut Value) -> Verdict
    where
        S: StructuralValidator + ?Sized,
    {
        let target = target.into();
        let (label, schema) = match target {
            Target::Operation(operation) => match self.legends.require(operation) {
                Ok(schema) => (operation, schema),
                Err(err) => {
                    log::warn!("Rejecting payload: {}", err);
                    return Verdict::from_error(&err);
                }
            },
            Target::Schema(schema) => ("<schema>", schema),
        };

        let report = self.sanitizer.clean(entry, schema);
        if report.was_modified() {
            log::debug!("Sanitized {} entry: {}", label, report.summary());
        }

        let verdict = structural.validate(entry, schema);
        log::debug!(
            "Validated {} entry: valid={} errors={}",
            label,
            verdict.valid,
            verdict.errors.len()
        );
        verdict
    }
}

/// Validate `entry` against an operation or schema using `legends`
pub fn validate<'a, S>(
    structural: &S,
    legends: &LegendRegistry,
    target: impl Into<Target<'a>>,
    entry: &mut Value,
) -> Verdict
where
    S: StructuralValidator + ?Sized,
{
    Validator::new(legends).validate(structural, target, entry)
}
