//! Resource limits for parsing and checked serialization.
//!
//! The parser is recursive, so nesting depth must be bounded to keep
//! hostile input from exhausting the call stack. The remaining limits cap
//! memory use for untrusted documents.
//!
//! Limits are plain data and can be loaded from a JSON config file; any
//! field left out keeps its [`Limits::standard`] value.

use serde::Deserialize;

use crate::error::{JsonError, JsonResult};

/// Resource limits for JSON parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Limits {
    /// Maximum total input size in bytes
    pub max_input_size: u64,
    /// Maximum nesting depth for arrays/objects
    pub max_nesting_depth: u64,
    /// Maximum decoded string length in bytes
    pub max_string_length: u64,
    /// Maximum number of members in one object
    pub max_object_fields: u64,
    /// Maximum number of elements in one array
    pub max_array_length: u64,
}

impl Limits {
    /// Default limits: generous sizes, with a depth bound that parsing,
    /// serializing and dropping stay within on a 2 MiB thread stack in an
    /// unoptimized build.
    pub const fn standard() -> Self {
        Self {
            max_input_size: 256 * 1024 * 1024, // 256 MiB
            max_nesting_depth: 128,
            max_string_length: 64 * 1024 * 1024, // 64 MiB
            max_object_fields: u64::MAX,
            max_array_length: u64::MAX,
        }
    }

    /// Tight limits for untrusted input.
    pub const fn restricted() -> Self {
        Self {
            max_input_size: 1024 * 1024,  // 1 MiB
            max_nesting_depth: 32,        // 32 levels
            max_string_length: 64 * 1024, // 64 KiB
            max_object_fields: 1024,      // 1024 fields
            max_array_length: 10_000,     // 10,000 elements
        }
    }

    /// No limits at all. Deeply nested input may overflow the stack.
    pub const fn unbounded() -> Self {
        Self {
            max_input_size: u64::MAX,
            max_nesting_depth: u64::MAX,
            max_string_length: u64::MAX,
            max_object_fields: u64::MAX,
            max_array_length: u64::MAX,
        }
    }

    /// Same limits with a different nesting depth.
    pub const fn with_max_depth(mut self, depth: u64) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    /// Load limits from a JSON config document such as
    /// `{"max_nesting_depth": 64}`.
    pub fn from_json_str(config: &str) -> JsonResult<Self> {
        serde_json::from_str(config).map_err(|e| JsonError::Config(e.to_string()))
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::standard()
    }
}
