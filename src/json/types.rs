//! JSON value types.
//!
//! A [`Value`] is a tree: arrays and objects own their children outright,
//! so there is no sharing and no cycles. `Clone` performs a deep copy.
//!
//! Objects are [`IndexMap`]s and keep insertion order. A parsed document
//! serializes with its members in source order.

use indexmap::IndexMap;

use crate::error::{JsonError, JsonResult};

/// Object payload: keys in insertion order, unique.
pub type Map = IndexMap<String, Value>;

/// A JSON value.
///
/// Equality is structural, see [`crate::json::equality`]. Numbers compare
/// with IEEE semantics, so `Value` is `PartialEq` but not `Eq`.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// JSON null literal
    #[default]
    Null,
    /// JSON boolean (true/false)
    Bool(bool),
    /// JSON number; integers and fractions alike are stored as f64
    Number(f64),
    /// JSON string
    String(String),
    /// JSON array of values
    Array(Vec<Value>),
    /// JSON object with insertion-ordered keys
    Object(Map),
}

/// Variant tag of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// `null`
    Null,
    /// `true` / `false`
    Bool,
    /// Any number
    Number,
    /// Any string
    String,
    /// Any array
    Array,
    /// Any object
    Object,
}

impl Kind {
    /// Lowercase name used in messages.
    pub fn name(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Bool => "boolean",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    /// A new empty object.
    pub fn object() -> Self {
        Value::Object(Map::new())
    }

    /// A new empty array.
    pub fn array() -> Self {
        Value::Array(Vec::new())
    }

    /// The variant tag of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    /// Returns the type name as a string for error messages.
    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    /// Returns true if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true if this is a boolean value.
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns true if this is a number value.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Returns true if this is a string value.
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns true if this is an array value.
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns true if this is an object value.
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    fn mismatch(&self, expected: Kind) -> JsonError {
        JsonError::TypeMismatch {
            expected: expected.name(),
            found: self.type_name(),
        }
    }

    /// The boolean payload, or `TypeMismatch`.
    pub fn as_bool(&self) -> JsonResult<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            _ => Err(self.mismatch(Kind::Bool)),
        }
    }

    /// The number payload, or `TypeMismatch`.
    pub fn as_f64(&self) -> JsonResult<f64> {
        match self {
            Value::Number(n) => Ok(*n),
            _ => Err(self.mismatch(Kind::Number)),
        }
    }

    /// The string payload, or `TypeMismatch`.
    pub fn as_str(&self) -> JsonResult<&str> {
        match self {
            Value::String(s) => Ok(s),
            _ => Err(self.mismatch(Kind::String)),
        }
    }

    /// The array payload, or `TypeMismatch`.
    pub fn as_array(&self) -> JsonResult<&Vec<Value>> {
        match self {
            Value::Array(a) => Ok(a),
            _ => Err(self.mismatch(Kind::Array)),
        }
    }

    /// Mutable array payload, or `TypeMismatch`.
    pub fn as_array_mut(&mut self) -> JsonResult<&mut Vec<Value>> {
        match self {
            Value::Array(a) => Ok(a),
            _ => Err(self.mismatch(Kind::Array)),
        }
    }

    /// The object payload, or `TypeMismatch`.
    pub fn as_object(&self) -> JsonResult<&Map> {
        match self {
            Value::Object(o) => Ok(o),
            _ => Err(self.mismatch(Kind::Object)),
        }
    }

    /// Mutable object payload, or `TypeMismatch`.
    pub fn as_object_mut(&mut self) -> JsonResult<&mut Map> {
        match self {
            Value::Object(o) => Ok(o),
            _ => Err(self.mismatch(Kind::Object)),
        }
    }

    /// Get a value from an object by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Get a value from an array by index.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        match self {
            Value::Array(arr) => arr.get(index),
            _ => None,
        }
    }

    /// Number of children for arrays and objects, `None` for scalars.
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::Array(a) => Some(a.len()),
            Value::Object(o) => Some(o.len()),
            _ => None,
        }
    }

    /// Nesting depth: scalars are 0, `[]` and `{}` are 1.
    pub fn depth(&self) -> u64 {
        match self {
            Value::Array(a) => 1 + a.iter().map(Value::depth).max().unwrap_or(0),
            Value::Object(o) => 1 + o.values().map(Value::depth).max().unwrap_or(0),
            _ => 0,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Object(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Object(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
