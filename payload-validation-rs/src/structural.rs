//! JSON Schema backed structural validation
//!
//! [`JsonSchemaValidator`] exports a legend to a Draft 7 JSON Schema document
//! and checks entries with the `jsonschema` crate. Compiled schemas are cached
//! by their exported text, so each legend is compiled once per validator.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use jsonschema::{Draft, JSONSchema};
use serde_json::Value;

use crate::errors::{ValidationError, ValidationResult, Verdict, VerdictError};
use crate::schema::ObjectSchema;
use crate::validator::StructuralValidator;

/// Structural validator built on compiled Draft 7 schemas
#[derive(Default)]
pub struct JsonSchemaValidator {
    compiled: RwLock<HashMap<String, Arc<JSONSchema>>>,
}

impl fmt::Debug for JsonSchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonSchemaValidator")
            .field("compiled", &self.compiled_count())
            .finish()
    }
}

impl JsonSchemaValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct schemas compiled so far
    pub fn compiled_count(&self) -> usize {
        self.compiled.read().map(|cache| cache.len()).unwrap_or(0)
    }

    /// Compile (or fetch from cache) the JSON Schema for a legend
    pub fn compile(&self, schema: &ObjectSchema) -> ValidationResult<Arc<JSONSchema>> {
        let document = schema.to_json_schema();
        let key = document.to_string();

        if let Ok(cache) = self.compiled.read() {
            if let Some(compiled) = cache.get(&key) {
                return Ok(Arc::clone(compiled));
            }
        }

        let compiled = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&document)
            .map_err(|e| ValidationError::SchemaCompilation(e.to_string()))?;
        let compiled = Arc::new(compiled);

        if let Ok(mut cache) = self.compiled.write() {
            cache.insert(key, Arc::clone(&compiled));
        }
        Ok(compiled)
    }

    /// Check `entry` against `schema`, failing only if the schema cannot compile
    pub fn try_validate(&self, entry: &Value, schema: &ObjectSchema) -> ValidationResult<Verdict> {
        let compiled = self.compile(schema)?;

        let errors: Vec<VerdictError> = match compiled.validate(entry) {
            Ok(()) => Vec::new(),
            Err(errors) => errors
                .map(|error| {
                    let mut violation = VerdictError::new(error.to_string());
                    let instance_path = error.instance_path.to_string();
                    if !instance_path.is_empty() {
                        violation = violation.at(instance_path);
                    }
                    let schema_path = error.schema_path.to_string();
                    if let Some(keyword) = schema_path.rsplit('/').next().filter(|k| !k.is_empty()) {
                        violation = violation.attribute(keyword);
                    }
                    violation
                })
                .collect(),
        };

        Ok(Verdict::from_errors(errors))
    }
}

impl StructuralValidator for JsonSchemaValidator {
    fn validate(&self, entry: &Value, schema: &ObjectSchema) -> Verdict {
        match self.try_validate(entry, schema) {
            Ok(verdict) => verdict,
            Err(err) => {
                log::error!("Structural validation unavailable: {}", err);
                Verdict::from_error(&err)
            }
        }
    }
}
