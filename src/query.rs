//! Dot-path queries.
//!
//! A path is `segment(.segment)*`. Against an object a segment is a key;
//! against an array it must be a base-10 index made only of ASCII digits.
//! There is no escaping, so keys containing `.` cannot be addressed. The
//! empty path addresses the root.

use crate::error::{JsonError, JsonResult};
use crate::json::Value;

fn path_error(segment: &str) -> JsonError {
    JsonError::PathError {
        segment: segment.to_string(),
    }
}

/// Parse an array index segment. Signs, whitespace and empty strings are
/// not indices.
fn parse_index(segment: &str) -> Option<usize> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    // "".split('.') yields one empty segment; the empty path has none.
    path.split('.').filter(move |_| !path.is_empty())
}

fn step<'v>(current: &'v Value, segment: &str) -> JsonResult<&'v Value> {
    match current {
        Value::Object(map) => map.get(segment),
        Value::Array(arr) => parse_index(segment).and_then(|i| arr.get(i)),
        _ => None,
    }
    .ok_or_else(|| path_error(segment))
}

fn step_mut<'v>(current: &'v mut Value, segment: &str) -> JsonResult<&'v mut Value> {
    match current {
        Value::Object(map) => map.get_mut(segment),
        Value::Array(arr) => parse_index(segment).and_then(|i| arr.get_mut(i)),
        _ => None,
    }
    .ok_or_else(|| path_error(segment))
}

/// Resolve `path` against `root`.
///
/// Fails with `PathError` naming the first segment that could not be
/// resolved: a missing key, an out-of-bounds or malformed index, or a
/// segment applied to a scalar.
pub fn query<'v>(root: &'v Value, path: &str) -> JsonResult<&'v Value> {
    segments(path).try_fold(root, step)
}

/// Mutable variant of [`query`].
pub fn query_mut<'v>(root: &'v mut Value, path: &str) -> JsonResult<&'v mut Value> {
    segments(path).try_fold(root, step_mut)
}
