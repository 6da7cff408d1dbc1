//! Bounded payload reading

use std::io::Read;

use serde_json::Value;

use crate::errors::{ValidationError, ValidationResult};

/// Read and parse a JSON payload of at most `max_size` bytes
///
/// The payload must be a JSON object; legends only describe objects.
pub fn parse_payload<R: Read>(reader: R, max_size: usize) -> ValidationResult<Value> {
    let mut buffer = Vec::new();
    reader.take(max_size as u64 + 1).read_to_end(&mut buffer)?;

    if buffer.len() > max_size {
        return Err(ValidationError::PayloadTooLarge(format!(
            "payload exceeds {} bytes",
            max_size
        )));
    }

    let value: Value = serde_json::from_slice(&buffer)?;
    if !value.is_object() {
        return Err(ValidationError::InvalidPayload(format!(
            "expected a JSON object, got {}",
            json_type(&value)
        )));
    }
    Ok(value)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
