//! Loose primitive coercion
//!
//! Network clients frequently send numbers and flags as strings. These
//! helpers decide whether a value is *loosely* numeric or boolean and produce
//! the genuine JSON value it stands for. They never fail: a value that cannot
//! be coerced is reported as such and left for the structural validator.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Number, Value};

lazy_static! {
    static ref DECIMAL_LITERAL: Regex =
        Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$").unwrap();
    static ref RADIX_LITERAL: Regex = Regex::new(r"^0(?:[xX][0-9a-fA-F]+|[oO][0-7]+|[bB][01]+)$").unwrap();
}

/// Parse a numeric string the way loose equality does
///
/// Surrounding whitespace is ignored and a blank string stands for zero.
/// Decimal, exponent and `0x`/`0o`/`0b` literals are understood. Results that
/// are not finite are rejected because JSON cannot carry them.
pub fn parse_loose_number(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    let parsed = if DECIMAL_LITERAL.is_match(trimmed) {
        trimmed.parse::<f64>().ok()
    } else if RADIX_LITERAL.is_match(trimmed) {
        let radix = match trimmed.as_bytes()[1] {
            b'x' | b'X' => 16,
            b'o' | b'O' => 8,
            _ => 2,
        };
        u64::from_str_radix(&trimmed[2..], radix).ok().map(|n| n as f64)
    } else {
        None
    };

    parsed.filter(|n| n.is_finite())
}

/// Build a JSON number, preferring the integer representation
pub fn number_value(n: f64) -> Option<Value> {
    if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
        Some(Value::Number(Number::from(n as i64)))
    } else {
        Number::from_f64(n).map(Value::Number)
    }
}

/// The number a value is loosely equal to, if any
///
/// Numbers stand for themselves, strings are parsed with
/// [`parse_loose_number`] and booleans count as `1`/`0`. Null, arrays and
/// objects are never loosely numeric.
pub fn loose_number(value: &Value) -> Option<Value> {
    match value {
        Value::Number(_) => Some(value.clone()),
        Value::String(s) => parse_loose_number(s).and_then(number_value),
        Value::Bool(b) => number_value(if *b { 1.0 } else { 0.0 }),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// The boolean a value spells, for the accepted spellings only
///
/// `"1"`, `1` and `"true"` mean `true`; `"0"`, `0` and `"false"` mean
/// `false`. Genuine booleans stand for themselves.
pub fn loose_boolean(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.as_str() {
            "1" | "true" => Some(true),
            "0" | "false" => Some(false),
            _ => None,
        },
        Value::Number(n) => match n.as_f64() {
            Some(x) if x == 1.0 => Some(true),
            Some(x) if x == 0.0 => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Replace a loosely numeric value with its number
///
/// Returns `true` when the value was rewritten.
pub fn coerce_number(value: &mut Value) -> bool {
    match loose_number(value) {
        Some(number) if number != *value => {
            *value = number;
            true
        }
        _ => false,
    }
}

/// Replace a boolean spelling with the boolean it stands for
///
/// Returns `true` when the value was rewritten.
pub fn coerce_boolean(value: &mut Value) -> bool {
    match loose_boolean(value) {
        Some(flag) if *value != Value::Bool(flag) => {
            *value = Value::Bool(flag);
            true
        }
        _ => false,
    }
}
