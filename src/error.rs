//! Error handling for jsontree.
//!
//! Every fallible operation returns [`JsonResult`]. Each variant carries a
//! stable numeric code so that callers (and the CLI) can classify failures
//! without matching on message text.
//!
//! Codes are grouped by family:
//!
//! - 1xx: parsing (syntax and resource limits)
//! - 2xx: tree operations (access, query, mutation, schema)
//! - 3xx: file I/O helpers and configuration loading

use thiserror::Error;

/// All failure kinds produced by the library.
///
/// Failures are fail-fast: an operation returning an error has not
/// partially mutated its target, and the parser never returns a partial tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum JsonError {
    /// Malformed input (code 100)
    #[error("syntax error at byte {position}: {message}")]
    Syntax {
        /// Byte offset of the offending token
        position: usize,
        /// Human-readable description
        message: String,
    },

    /// Nesting deeper than the configured limit (code 101)
    #[error("nesting depth {depth} exceeds limit {limit}")]
    DepthExceeded {
        /// Depth reached
        depth: u64,
        /// Configured maximum
        limit: u64,
    },

    /// Input larger than the configured limit (code 102)
    #[error("input of {0} bytes exceeds limit {1}")]
    InputTooLarge(u64, u64),

    /// String longer than the configured limit (code 103)
    #[error("string of {0} bytes exceeds limit {1}")]
    StringTooLong(u64, u64),

    /// Object with more members than the configured limit (code 104)
    #[error("object with {0} fields exceeds limit {1}")]
    TooManyFields(u64, u64),

    /// Array with more elements than the configured limit (code 105)
    #[error("array of {0} elements exceeds limit {1}")]
    ArrayTooLong(u64, u64),

    /// Accessor does not match the stored variant (code 200)
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// Requested variant
        expected: &'static str,
        /// Stored variant
        found: &'static str,
    },

    /// Update targeted a key that does not exist (code 201)
    #[error("key not found: {0:?}")]
    KeyNotFound(String),

    /// Path segment could not be resolved (code 202)
    #[error("path segment {segment:?} could not be resolved")]
    PathError {
        /// The segment that failed
        segment: String,
    },

    /// Structural operation applied to a non-object (code 203)
    #[error("expected an object, found {0}")]
    NotAnObject(&'static str),

    /// Schema validation requires both sides to be objects (code 204)
    #[error("schema and document must both be objects")]
    UnsupportedSchema,

    /// File read or write failed (code 300)
    #[error("i/o error on {path}: {message}")]
    Io {
        /// File involved
        path: String,
        /// Underlying error text
        message: String,
    },

    /// Limits configuration could not be loaded (code 301)
    #[error("invalid limits config: {0}")]
    Config(String),
}

impl JsonError {
    /// Build a syntax error at `position`.
    pub fn syntax(position: usize, message: impl Into<String>) -> Self {
        JsonError::Syntax {
            position,
            message: message.into(),
        }
    }

    /// Get the numeric error code.
    pub fn code(&self) -> u32 {
        match self {
            JsonError::Syntax { .. } => 100,
            JsonError::DepthExceeded { .. } => 101,
            JsonError::InputTooLarge(_, _) => 102,
            JsonError::StringTooLong(_, _) => 103,
            JsonError::TooManyFields(_, _) => 104,
            JsonError::ArrayTooLong(_, _) => 105,
            JsonError::TypeMismatch { .. } => 200,
            JsonError::KeyNotFound(_) => 201,
            JsonError::PathError { .. } => 202,
            JsonError::NotAnObject(_) => 203,
            JsonError::UnsupportedSchema => 204,
            JsonError::Io { .. } => 300,
            JsonError::Config(_) => 301,
        }
    }

    /// Get the error name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            JsonError::Syntax { .. } => "SyntaxError",
            JsonError::DepthExceeded { .. } => "DepthExceeded",
            JsonError::InputTooLarge(_, _) => "InputTooLarge",
            JsonError::StringTooLong(_, _) => "StringTooLong",
            JsonError::TooManyFields(_, _) => "TooManyFields",
            JsonError::ArrayTooLong(_, _) => "ArrayTooLong",
            JsonError::TypeMismatch { .. } => "TypeMismatch",
            JsonError::KeyNotFound(_) => "KeyNotFound",
            JsonError::PathError { .. } => "PathError",
            JsonError::NotAnObject(_) => "NotAnObject",
            JsonError::UnsupportedSchema => "UnsupportedSchema",
            JsonError::Io { .. } => "IoError",
            JsonError::Config(_) => "ConfigError",
        }
    }

    /// True for errors raised while parsing text.
    pub fn is_parse_error(&self) -> bool {
        (100..200).contains(&self.code())
    }
}

/// Result type for jsontree operations.
pub type JsonResult<T> = Result<T, JsonError>;
