//! jsontree - a JSON value tree and the operations around it.
//!
//! Text goes in through a recursive-descent parser and comes out as a
//! [`Value`] tree; everything else works on that tree.
//!
//! # Architecture
//!
//! - [`json`] - Value model, parser, serializer, structural equality
//! - [`query`] - Dot-path lookups (`skills.1`)
//! - [`mutate`] - Update, insert, delete and deep merge on objects
//! - [`flatten`] - Nested object <-> flat `a.b.c` map
//! - [`schema`] - Shallow key/kind validation
//! - [`io`] - File helpers
//! - [`error`] - Typed errors with stable codes
//!
//! # Example
//!
//! ```
//! use jsontree::{parse_str, query, Value};
//!
//! let doc = parse_str(
//!     r#"{"name":"Elina","age":23,"skills":["Coding","Music"],"active":true}"#,
//! ).unwrap();
//! assert_eq!(query(&doc, "skills.1").unwrap(), &Value::from("Music"));
//! assert_eq!(doc.get("age"), Some(&Value::Number(23.0)));
//! ```

// Library code must not panic on malformed input.
// Tests are checked separately with `cargo test`.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod error;
pub mod flatten;
pub mod io;
pub mod json;
pub mod mutate;
pub mod query;
pub mod schema;

// Re-export commonly used types
pub use error::{JsonError, JsonResult};
pub use flatten::{flatten, flatten_with_prefix, unflatten, unflatten_with_limits};
pub use json::{
    deep_equals, parse, parse_str, parse_with_limits, to_json_string, to_json_string_checked,
    to_json_string_pretty, Kind, Limits, Map, Value,
};
pub use mutate::{delete, insert, merge, update};
pub use query::{query, query_mut};
pub use schema::{check_schema, validate_schema, SchemaViolation};
