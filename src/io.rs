//! File helpers: load a document from disk, write one back.

use std::fs;
use std::path::Path;

use crate::error::{JsonError, JsonResult};
use crate::json::{parse_with_limits, to_json_string, to_json_string_pretty, Limits, Value};

fn io_error(path: &Path, e: &std::io::Error) -> JsonError {
    JsonError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}

/// Read and parse a JSON file with [`Limits::standard`].
pub fn read_file(path: impl AsRef<Path>) -> JsonResult<Value> {
    read_file_with_limits(path, Limits::standard())
}

/// Read and parse a JSON file with custom limits.
pub fn read_file_with_limits(path: impl AsRef<Path>, limits: Limits) -> JsonResult<Value> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|e| io_error(path, &e))?;
    tracing::debug!(target: "jsontree::io", path = %path.display(), bytes = data.len(), "read");
    parse_with_limits(&data, limits)
}

/// Serialize `value` to `path`. `indent` selects pretty output; the file
/// always ends with a newline.
pub fn write_file(path: impl AsRef<Path>, value: &Value, indent: Option<usize>) -> JsonResult<()> {
    let path = path.as_ref();
    let mut text = match indent {
        Some(width) => to_json_string_pretty(value, width),
        None => to_json_string(value),
    };
    text.push('\n');
    fs::write(path, &text).map_err(|e| io_error(path, &e))?;
    tracing::debug!(target: "jsontree::io", path = %path.display(), bytes = text.len(), "wrote");
    Ok(())
}
