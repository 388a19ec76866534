//! Conversion between nested objects and flat `a.b.c -> leaf` maps.
//!
//! Only objects are expanded. Arrays, like every other non-object, are
//! recorded whole under their path, so flattening is lossless and
//! `unflatten(flatten(v)) == v` for any tree without arrays, empty objects,
//! or `.` in keys.

use crate::error::{JsonError, JsonResult};
use crate::json::{Limits, Map, Value};

/// Flatten `value` with an empty prefix.
pub fn flatten(value: &Value) -> Map {
    flatten_with_prefix(value, "")
}

/// Flatten `value`, joining keys with `.` onto `prefix`.
///
/// A non-object `value` yields a single entry keyed by `prefix` itself. An
/// empty object yields nothing.
pub fn flatten_with_prefix(value: &Value, prefix: &str) -> Map {
    let mut out = Map::new();
    flatten_into(value, prefix, &mut out);
    out
}

fn flatten_into(value: &Value, prefix: &str, out: &mut Map) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_into(child, &path, out);
            }
        }
        leaf => {
            out.insert(prefix.to_string(), leaf.clone());
        }
    }
}

/// Rebuild a nested object from a flat map.
///
/// Each key is split on `.`; intermediate objects are created as needed and
/// the value is stored under the last segment. If an intermediate segment
/// already holds a non-object (as with `{"a": 1, "a.b": 2}`), it is replaced
/// by an object, so later keys win.
///
/// The result is as deep as the longest key. Use [`unflatten_with_limits`]
/// for keys from untrusted input.
pub fn unflatten(flat: &Map) -> Value {
    let mut root = Map::new();
    for (path, value) in flat {
        insert_path(&mut root, path, value.clone());
    }
    Value::Object(root)
}

/// [`unflatten`] with a nesting bound.
///
/// Fails with `DepthExceeded` before building anything if some key, plus
/// the nesting of its value, would produce a tree deeper than
/// `limits.max_nesting_depth`.
pub fn unflatten_with_limits(flat: &Map, limits: &Limits) -> JsonResult<Value> {
    for (path, value) in flat {
        let depth = (path.split('.').count() as u64).saturating_add(value.depth());
        if depth > limits.max_nesting_depth {
            tracing::debug!(
                target: "jsontree::flatten",
                depth,
                limit = limits.max_nesting_depth,
                "unflatten key too deep"
            );
            return Err(JsonError::DepthExceeded {
                depth,
                limit: limits.max_nesting_depth,
            });
        }
    }
    Ok(unflatten(flat))
}

fn insert_path(root: &mut Map, path: &str, value: Value) {
    let mut node = root;
    let mut segments = path.split('.').peekable();
    while let Some(segment) = segments.next() {
        if segments.peek().is_none() {
            node.insert(segment.to_string(), value);
            return;
        }
        let slot = node
            .entry(segment.to_string())
            .or_insert_with(Value::object);
        if !slot.is_object() {
            *slot = Value::object();
        }
        let Value::Object(child) = slot else {
            return;
        };
        node = child;
    }
}
