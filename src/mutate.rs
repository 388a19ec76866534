//! In-place structural mutation of objects.
//!
//! Every operation validates its target before writing, so a failed call
//! leaves the tree untouched.

use crate::error::{JsonError, JsonResult};
use crate::json::{Map, Value};

fn object_mut<'v>(root: &'v mut Value) -> JsonResult<&'v mut Map> {
    match root {
        Value::Object(map) => Ok(map),
        other => Err(JsonError::NotAnObject(other.type_name())),
    }
}

/// Replace the value of an existing key.
///
/// This is update-only: a missing key fails with `KeyNotFound` rather than
/// being inserted. A non-object root fails with `NotAnObject`.
pub fn update(root: &mut Value, key: &str, value: Value) -> JsonResult<()> {
    let slot = object_mut(root)?
        .get_mut(key)
        .ok_or_else(|| JsonError::KeyNotFound(key.to_string()))?;
    *slot = value;
    tracing::trace!(target: "jsontree::mutate", key, "updated");
    Ok(())
}

/// Insert or replace a key, returning the previous value if there was one.
pub fn insert(root: &mut Value, key: &str, value: Value) -> JsonResult<Option<Value>> {
    Ok(object_mut(root)?.insert(key.to_string(), value))
}

/// Remove a key from an object.
///
/// Removing an absent key is a no-op. Returns whether a key was removed.
/// The remaining members keep their relative order.
pub fn delete(root: &mut Value, key: &str) -> JsonResult<bool> {
    let removed = object_mut(root)?.shift_remove(key).is_some();
    tracing::trace!(target: "jsontree::mutate", key, removed, "delete");
    Ok(removed)
}

/// Deep-merge `source` into `target`.
///
/// Where both sides hold an object under the same key the merge recurses;
/// otherwise the source value overwrites the target value. If either side
/// is not an object at the top level, `source` replaces `target` wholesale.
pub fn merge(target: &mut Value, source: Value) {
    match (target, source) {
        (Value::Object(dst), Value::Object(src)) => {
            for (key, value) in src {
                match dst.get_mut(&key) {
                    Some(existing) if existing.is_object() && value.is_object() => {
                        merge(existing, value);
                    }
                    Some(existing) => *existing = value,
                    None => {
                        dst.insert(key, value);
                    }
                }
            }
        }
        (target, source) => *target = source,
    }
}
