//! Entry sanitization
//!
//! Brings an untrusted entry in line with a legend before structural
//! validation: unknown fields are removed, loosely typed numbers and flags
//! are coerced, nested objects and arrays are cleaned recursively, and
//! declared defaults fill in missing fields.
//!
//! Sanitization is best effort. Nothing here rejects a value; anything that
//! cannot be normalized stays as it is for the structural validator to judge.

use serde_json::{Map, Value};

use super::coerce::{coerce_boolean, coerce_number};
use super::SanitizeReport;
use crate::schema::ObjectSchema;
use crate::types::{Descriptor, FilterBranch, Kind};
use crate::DEFAULT_MAX_DEPTH;

/// Recursive entry sanitizer
#[derive(Debug, Clone, Copy)]
pub struct Sanitizer {
    max_depth: usize,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl Sanitizer {
    /// Create a sanitizer that descends at most `max_depth` nested objects
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Sanitize `entry` in place against `schema`
    ///
    /// The entry is modified destructively. Entries that are not JSON
    /// objects are left untouched.
    pub fn clean(&self, entry: &mut Value, schema: &ObjectSchema) -> SanitizeReport {
        let mut report = SanitizeReport::default();
        if let Value::Object(map) = entry {
            self.clean_map(map, schema, "", 0, &mut report);
        }
        report
    }

    fn clean_map(
        &self,
        map: &mut Map<String, Value>,
        schema: &ObjectSchema,
        path: &str,
        depth: usize,
        report: &mut SanitizeReport,
    ) {
        map.retain(|name, _| {
            let known = schema.contains(name);
            if !known {
                let field = join(path, name);
                log::debug!("Stripping unknown field {}", field);
                report.stripped.push(field);
            }
            known
        });

        for (name, value) in map.iter_mut() {
            if let Some(descriptor) = schema.get(name) {
                let field = join(path, name);
                self.clean_value(value, descriptor, &field, depth, report);
            }
        }

        for (name, descriptor) in schema.properties() {
            if map.contains_key(name) {
                continue;
            }
            if let Some(default) = descriptor.default_value() {
                let field = join(path, name);
                log::debug!("Applying default to {}", field);
                map.insert(name.clone(), default.clone());
                report.defaulted.push(field);
            }
        }
    }

    fn clean_value(
        &self,
        value: &mut Value,
        descriptor: &Descriptor,
        path: &str,
        depth: usize,
        report: &mut SanitizeReport,
    ) {
        match descriptor.kind() {
            // Only the integer/array/null combination of SerialFilter is
            // handled; other filter shapes fall through untouched.
            Kind::Filter(filter) => {
                if filter.accepts(FilterBranch::Null) && value.is_null() {
                    return;
                }
                if filter.accepts(FilterBranch::Integer) && coerce_number(value) {
                    note_coerced(report, path);
                } else if filter.accepts(FilterBranch::Array) {
                    if let Value::Array(items) = value {
                        self.clean_items(items, &filter.items, path, depth, report);
                    }
                }
            }
            Kind::Integer { .. } => {
                if coerce_number(value) {
                    note_coerced(report, path);
                }
            }
            Kind::Boolean => {
                if coerce_boolean(value) {
                    note_coerced(report, path);
                }
            }
            Kind::Object(nested) => {
                if let Value::Object(map) = value {
                    if self.descend(depth, path) {
                        self.clean_map(map, nested, path, depth + 1, report);
                    }
                }
            }
            Kind::Array(array) => {
                if let Value::Array(items) = value {
                    self.clean_items(items, &array.items, path, depth, report);
                }
            }
            Kind::String { .. } | Kind::Enum { .. } => {}
        }
    }

    fn clean_items(
        &self,
        items: &mut [Value],
        item: &Descriptor,
        path: &str,
        depth: usize,
        report: &mut SanitizeReport,
    ) {
        match item.kind() {
            Kind::Object(nested) => {
                if !self.descend(depth, path) {
                    return;
                }
                for (index, element) in items.iter_mut().enumerate() {
                    if let Value::Object(map) = element {
                        let element_path = format!("{}[{}]", path, index);
                        self.clean_map(map, nested, &element_path, depth + 1, report);
                    }
                }
            }
            Kind::Integer { .. } => {
                for (index, element) in items.iter_mut().enumerate() {
                    if coerce_number(element) {
                        note_coerced(report, &format!("{}[{}]", path, index));
                    }
                }
            }
            _ => {}
        }
    }

    fn descend(&self, depth: usize, path: &str) -> bool {
        if depth >= self.max_depth {
            log::warn!(
                "Not sanitizing {} beyond maximum nesting depth {}",
                path,
                self.max_depth
            );
            false
        } else {
            true
        }
    }
}

fn note_coerced(report: &mut SanitizeReport, path: &str) {
    log::debug!("Coerced {}", path);
    report.coerced.push(path.to_string());
}

fn join(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", path, name)
    }
}

/// Sanitize `entry` in place against `schema` with the default depth limit
pub fn clean_object(entry: &mut Value, schema: &ObjectSchema) -> SanitizeReport {
    Sanitizer::default().clean(entry, schema)
}

/// Sanitized copy of `entry`, leaving the original untouched
pub fn sanitized(entry: &Value, schema: &ObjectSchema) -> (Value, SanitizeReport) {
    let mut copy = entry.clone();
    let report = clean_object(&mut copy, schema);
    (copy, report)
}
