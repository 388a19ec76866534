//! JSON text output.
//!
//! Compact output has no whitespace at all; pretty output puts each member
//! on its own line. Object members are written in insertion order.
//!
//! Strings are escaped on the way out: `"` and `\`, the short escapes
//! `\b \f \n \r \t`, and `\u00XX` for the remaining control bytes. Numbers
//! use Rust's shortest round-trip formatting, so `23.0` prints as `23`.
//! Non-finite numbers cannot be represented in JSON and are written as
//! `null`.

use std::fmt::Write as _;

use super::limits::Limits;
use super::types::Value;
use crate::error::{JsonError, JsonResult};

/// Serialize a Value to compact JSON text.
pub fn to_json_string(value: &Value) -> String {
    let mut output = String::new();
    serialize_value(value, None, 0, &mut output);
    output
}

/// Serialize a Value to indented, multi-line JSON text.
pub fn to_json_string_pretty(value: &Value, indent: usize) -> String {
    let mut output = String::new();
    serialize_value(value, Some(indent), 0, &mut output);
    output
}

/// Serialize compactly, refusing trees nested deeper than
/// `limits.max_nesting_depth`.
///
/// Parsed trees are already bounded, but trees assembled by merge or
/// unflatten are not.
pub fn to_json_string_checked(value: &Value, limits: &Limits) -> JsonResult<String> {
    check_depth(value, 0, limits.max_nesting_depth)?;
    Ok(to_json_string(value))
}

/// Fail with `DepthExceeded` as soon as a container sits below `limit`.
fn check_depth(value: &Value, depth: u64, limit: u64) -> JsonResult<()> {
    let children: Box<dyn Iterator<Item = &Value>> = match value {
        Value::Array(arr) => Box::new(arr.iter()),
        Value::Object(obj) => Box::new(obj.values()),
        _ => return Ok(()),
    };
    let depth = depth + 1;
    if depth > limit {
        return Err(JsonError::DepthExceeded { depth, limit });
    }
    for child in children {
        check_depth(child, depth, limit)?;
    }
    Ok(())
}

/// Format a number the way the serializer writes it.
pub fn serialize_number(value: f64) -> String {
    if value.is_finite() {
        value.to_string()
    } else {
        "null".to_string()
    }
}

fn newline(indent: Option<usize>, level: usize, output: &mut String) {
    if let Some(width) = indent {
        output.push('\n');
        output.extend(std::iter::repeat(' ').take(width * level));
    }
}

fn serialize_value(value: &Value, indent: Option<usize>, level: usize, output: &mut String) {
    match value {
        Value::Null => output.push_str("null"),
        Value::Bool(true) => output.push_str("true"),
        Value::Bool(false) => output.push_str("false"),
        Value::Number(n) => output.push_str(&serialize_number(*n)),
        Value::String(s) => serialize_string(s, output),
        Value::Array(arr) if arr.is_empty() => output.push_str("[]"),
        Value::Array(arr) => {
            output.push('[');
            for (i, item) in arr.iter().enumerate() {
                if i > 0 {
                    output.push(',');
                }
                newline(indent, level + 1, output);
                serialize_value(item, indent, level + 1, output);
            }
            newline(indent, level, output);
            output.push(']');
        }
        Value::Object(obj) if obj.is_empty() => output.push_str("{}"),
        Value::Object(obj) => {
            output.push('{');
            for (i, (key, item)) in obj.iter().enumerate() {
                if i > 0 {
                    output.push(',');
                }
                newline(indent, level + 1, output);
                serialize_string(key, output);
                output.push(':');
                if indent.is_some() {
                    output.push(' ');
                }
                serialize_value(item, indent, level + 1, output);
            }
            newline(indent, level, output);
            output.push('}');
        }
    }
}

/// Serialize a string with proper JSON escaping.
fn serialize_string(s: &str, output: &mut String) {
    output.push('"');
    for ch in s.chars() {
        match ch {
            '"' => output.push_str("\\\""),
            '\\' => output.push_str("\\\\"),
            '\x08' => output.push_str("\\b"),
            '\x0C' => output.push_str("\\f"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            c if c < '\x20' => {
                // Writing to a String cannot fail.
                let _ = write!(output, "\\u{:04x}", c as u32);
            }
            c => output.push(c),
        }
    }
    output.push('"');
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&to_json_string(self))
    }
}
