//! JSON parsing, serialization and the value model.
//!
//! # Architecture
//!
//! - [`types`] - The [`Value`] tree and its [`Kind`] tag
//! - [`limits`] - Resource limits (nesting depth, sizes)
//! - [`lexer`] - Tokenizer with UTF-8/escape handling
//! - [`parser`] - Recursive descent parser
//! - [`serialize`] - Compact and pretty output
//! - [`equality`] - Deep structural comparison
//!
//! # Example
//!
//! ```
//! use jsontree::json::{parse, to_json_string, Value};
//!
//! let value = parse(br#"{"b": 2, "a": [1, true]}"#).unwrap();
//! assert_eq!(value.get("b"), Some(&Value::Number(2.0)));
//!
//! // Members keep their source order
//! assert_eq!(to_json_string(&value), r#"{"b":2,"a":[1,true]}"#);
//! ```

pub mod equality;
pub mod lexer;
pub mod limits;
pub mod parser;
pub mod serialize;
pub mod types;

// Re-export commonly used items
pub use equality::deep_equals;
pub use limits::Limits;
pub use parser::{parse, parse_with_limits};
pub use serialize::{to_json_string, to_json_string_checked, to_json_string_pretty};
pub use types::{Kind, Map, Value};

/// Parse a `&str` with [`Limits::standard`].
pub fn parse_str(input: &str) -> crate::JsonResult<Value> {
    parse(input.as_bytes())
}
