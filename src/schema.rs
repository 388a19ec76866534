//! Shallow schema validation.
//!
//! A schema is an object whose values are placeholders: only their kind
//! matters. `{"name": "", "age": 0}` requires a string `name` and a number
//! `age`. Nested structure and array element kinds are not inspected, and
//! keys present in the document but absent from the schema are allowed.

use crate::error::{JsonError, JsonResult};
use crate::json::{Kind, Map, Value};

/// One reason a document does not satisfy a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaViolation {
    /// The schema requires a key the document lacks.
    MissingKey(String),
    /// The key exists with a different kind.
    KindMismatch {
        /// Offending key
        key: String,
        /// Kind of the schema placeholder
        expected: Kind,
        /// Kind found in the document
        found: Kind,
    },
}

impl std::fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingKey(key) => write!(f, "missing key {key:?}"),
            Self::KindMismatch {
                key,
                expected,
                found,
            } => write!(f, "key {key:?}: expected {expected}, found {found}"),
        }
    }
}

fn objects<'v>(json: &'v Value, schema: &'v Value) -> JsonResult<(&'v Map, &'v Map)> {
    match (json, schema) {
        (Value::Object(doc), Value::Object(schema)) => Ok((doc, schema)),
        _ => Err(JsonError::UnsupportedSchema),
    }
}

/// True if every schema key is present in `json` with the same kind.
///
/// Fails with `UnsupportedSchema` unless both arguments are objects.
pub fn validate_schema(json: &Value, schema: &Value) -> JsonResult<bool> {
    let (doc, schema) = objects(json, schema)?;
    Ok(schema
        .iter()
        .all(|(key, expected)| doc.get(key).is_some_and(|v| v.kind() == expected.kind())))
}

/// Every violation of `schema` by `json`, in schema key order.
pub fn check_schema(json: &Value, schema: &Value) -> JsonResult<Vec<SchemaViolation>> {
    let (doc, schema) = objects(json, schema)?;
    let violations = schema
        .iter()
        .filter_map(|(key, placeholder)| match doc.get(key) {
            None => Some(SchemaViolation::MissingKey(key.clone())),
            Some(v) if v.kind() != placeholder.kind() => Some(SchemaViolation::KindMismatch {
                key: key.clone(),
                expected: placeholder.kind(),
                found: v.kind(),
            }),
            Some(_) => None,
        })
        .collect();
    Ok(violations)
}
