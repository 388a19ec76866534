//! CLI integration tests.
//!
//! Tests the jsontree commands by invoking the binary as a subprocess.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

fn jsontree_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_jsontree"))
}

fn run_command(args: &[&str], input: &str) -> (i32, String, String) {
    let bin = jsontree_path();
    let mut child = Command::new(&bin)
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap_or_else(|e| panic!("Failed to spawn jsontree at {:?}: {}", bin, e));

    {
        let stdin = child.stdin.as_mut().unwrap();
        stdin.write_all(input.as_bytes()).unwrap();
    }

    let output = child.wait_with_output().unwrap();
    let code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (code, stdout, stderr)
}

fn write_temp(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path.to_str().unwrap().to_string()
}

const PROFILE: &str = r#"{"name":"Elina","age":23,"skills":["Coding","Music"],"active":true}"#;

// ============================================================================
// fmt
// ============================================================================

#[test]
fn cli_fmt_compact_from_stdin() {
    let (code, stdout, _) = run_command(&["fmt"], "{ \"a\" : [ 1 , 2.5 ] ,\n \"b\": null }");
    assert_eq!(code, 0);
    assert_eq!(stdout, "{\"a\":[1,2.5],\"b\":null}\n");
}

#[test]
fn cli_fmt_pretty_indent() {
    let (code, stdout, _) = run_command(&["fmt", "--pretty", "--indent", "4"], r#"{"a":[1]}"#);
    assert_eq!(code, 0);
    assert_eq!(stdout, "{\n    \"a\": [\n        1\n    ]\n}\n");
}

#[test]
fn cli_fmt_out_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.json");
    let (code, stdout, _) = run_command(&["fmt", "--out", out.to_str().unwrap()], "[true, false]");
    assert_eq!(code, 0);
    assert!(stdout.is_empty());
    assert_eq!(fs::read_to_string(&out).unwrap(), "[true,false]\n");
}

#[test]
fn cli_fmt_reads_file_argument() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_temp(dir.path(), "doc.json", PROFILE);
    let (code, stdout, _) = run_command(&["fmt", &file], "");
    assert_eq!(code, 0);
    assert_eq!(stdout.trim_end(), PROFILE);
}

#[test]
fn cli_fmt_syntax_error() {
    let (code, stdout, stderr) = run_command(&["fmt"], r#"{"a":1,}"#);
    assert_eq!(code, 2);
    assert!(stdout.is_empty());
    assert!(stderr.starts_with("error: syntax error"), "stderr: {stderr}");
}

#[test]
fn cli_max_depth_override() {
    let (code, _, stderr) = run_command(&["--max-depth", "2", "fmt"], "[[[1]]]");
    assert_eq!(code, 2);
    assert!(stderr.contains("depth"), "stderr: {stderr}");

    let (code, _, _) = run_command(&["--max-depth", "3", "fmt"], "[[[1]]]");
    assert_eq!(code, 0);
}

#[test]
fn cli_limits_file() {
    let dir = tempfile::tempdir().unwrap();
    let limits = write_temp(dir.path(), "limits.json", r#"{"max_array_length": 2}"#);
    let (code, _, stderr) = run_command(&["--limits", &limits, "fmt"], "[1, 2, 3]");
    assert_eq!(code, 2);
    assert!(stderr.starts_with("error:"));
}

#[test]
fn cli_malformed_limits_file_reported_as_config() {
    let dir = tempfile::tempdir().unwrap();
    let limits = write_temp(dir.path(), "limits.json", r#"{"max_depth": 2}"#);
    let (code, stdout, stderr) = run_command(&["--limits", &limits, "fmt"], "[1]");
    assert_eq!(code, 2);
    assert!(stdout.is_empty());
    assert!(stderr.starts_with("error: invalid limits config"), "stderr: {stderr}");
}

// ============================================================================
// get / set / delete
// ============================================================================

#[test]
fn cli_get_path() {
    let (code, stdout, _) = run_command(&["get", "skills.1"], PROFILE);
    assert_eq!(code, 0);
    assert_eq!(stdout, "\"Music\"\n");
}

#[test]
fn cli_get_missing_path() {
    let (code, _, stderr) = run_command(&["get", "skills.9"], PROFILE);
    assert_eq!(code, 2);
    assert!(stderr.contains("\"9\""), "stderr: {stderr}");
}

#[test]
fn cli_set_existing_key() {
    let (code, stdout, _) = run_command(&["set", "age", "24"], PROFILE);
    assert_eq!(code, 0);
    assert_eq!(
        stdout.trim_end(),
        r#"{"name":"Elina","age":24,"skills":["Coding","Music"],"active":true}"#
    );
}

#[test]
fn cli_set_missing_key_fails() {
    let (code, stdout, stderr) = run_command(&["set", "city", "\"Oslo\""], PROFILE);
    assert_eq!(code, 2);
    assert!(stdout.is_empty());
    assert!(stderr.contains("city"));
}

#[test]
fn cli_delete_key() {
    let (code, stdout, _) = run_command(&["delete", "skills"], PROFILE);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim_end(), r#"{"name":"Elina","age":23,"active":true}"#);
}

// ============================================================================
// merge / flatten / unflatten
// ============================================================================

#[test]
fn cli_merge_files() {
    let dir = tempfile::tempdir().unwrap();
    let target = write_temp(dir.path(), "a.json", r#"{"x":{"a":1},"y":1}"#);
    let source = write_temp(dir.path(), "b.json", r#"{"x":{"b":2},"z":3}"#);
    let (code, stdout, _) = run_command(&["merge", &target, &source], "");
    assert_eq!(code, 0);
    assert_eq!(stdout.trim_end(), r#"{"x":{"a":1,"b":2},"y":1,"z":3}"#);
}

#[test]
fn cli_flatten_unflatten() {
    let nested = r#"{"a":{"b":1,"c":{"d":true}},"e":"x"}"#;
    let (code, flat, _) = run_command(&["flatten"], nested);
    assert_eq!(code, 0);
    assert_eq!(flat.trim_end(), r#"{"a.b":1,"a.c.d":true,"e":"x"}"#);

    let (code, back, _) = run_command(&["unflatten"], &flat);
    assert_eq!(code, 0);
    assert_eq!(back.trim_end(), nested);
}

#[test]
fn cli_unflatten_rejects_keys_deeper_than_limit() {
    let key = vec!["a"; 200_000].join(".");
    let input = format!("{{\"{key}\": 1}}");
    let (code, stdout, stderr) = run_command(&["unflatten"], &input);
    assert_eq!(code, 2);
    assert!(stdout.is_empty());
    assert!(stderr.contains("nesting depth 200000 exceeds limit"), "stderr: {stderr}");

    let (code, stdout, _) = run_command(&["--max-depth", "3", "unflatten"], r#"{"a.b.c": 1}"#);
    assert_eq!(code, 0);
    assert_eq!(stdout, "{\"a\":{\"b\":{\"c\":1}}}\n");
}

#[test]
fn cli_unflatten_requires_object() {
    let (code, _, stderr) = run_command(&["unflatten"], "[1]");
    assert_eq!(code, 2);
    assert!(stderr.contains("expected object"), "stderr: {stderr}");
}

// ============================================================================
// validate / eq
// ============================================================================

#[test]
fn cli_validate_ok() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write_temp(dir.path(), "schema.json", r#"{"name":"","age":0}"#);
    let (code, stdout, _) = run_command(&["validate", &schema], PROFILE);
    assert_eq!(code, 0);
    assert_eq!(stdout, "valid\n");
}

#[test]
fn cli_validate_reports_violations() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write_temp(
        dir.path(),
        "schema.json",
        r#"{"name":0,"email":"","active":false}"#,
    );
    let (code, stdout, _) = run_command(&["validate", &schema], PROFILE);
    assert_eq!(code, 1);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "key \"name\": expected number, found string",
            "missing key \"email\"",
        ]
    );
}

#[test]
fn cli_validate_non_object_schema() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write_temp(dir.path(), "schema.json", "[]");
    let (code, _, stderr) = run_command(&["validate", &schema], PROFILE);
    assert_eq!(code, 2);
    assert!(stderr.starts_with("error:"));
}

#[test]
fn cli_eq() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_temp(dir.path(), "a.json", r#"{"a":1,"b":[1,2]}"#);
    let b = write_temp(dir.path(), "b.json", r#"{"b":[1,2],"a":1.0}"#);
    let c = write_temp(dir.path(), "c.json", r#"{"b":[2,1],"a":1}"#);

    let (code, stdout, _) = run_command(&["eq", &a, &b], "");
    assert_eq!(code, 0);
    assert_eq!(stdout, "equal\n");

    let (code, stdout, _) = run_command(&["eq", &a, &c], "");
    assert_eq!(code, 1);
    assert_eq!(stdout, "different\n");
}

#[test]
fn cli_eq_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_temp(dir.path(), "a.json", "1");
    let missing = dir.path().join("nope.json");
    let (code, _, stderr) = run_command(&["eq", &a, missing.to_str().unwrap()], "");
    assert_eq!(code, 2);
    assert!(stderr.contains("nope.json"));
}

// ============================================================================
// Global flags
// ============================================================================

#[test]
fn cli_time_logs_to_stderr() {
    let (code, stdout, stderr) = run_command(&["--time", "fmt"], "[]");
    assert_eq!(code, 0);
    assert_eq!(stdout, "[]\n");
    assert!(stderr.contains("elapsed_us"), "stderr: {stderr}");
}

#[test]
fn cli_version() {
    let (code, stdout, _) = run_command(&["--version"], "");
    assert_eq!(code, 0);
    assert!(stdout.starts_with("jsontree"));
}
