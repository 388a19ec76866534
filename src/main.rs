//! jsontree CLI.
//!
//! Every library operation as a subcommand. Documents are read from a file
//! argument or stdin; results go to stdout.

use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use jsontree::io::{read_file_with_limits, write_file};
use jsontree::{
    check_schema, deep_equals, delete, flatten, merge, parse_str, parse_with_limits, query,
    to_json_string_checked, to_json_string_pretty, unflatten_with_limits, update, JsonError,
    JsonResult, Limits, Value,
};

#[derive(Parser)]
#[command(name = "jsontree")]
#[command(about = "Parse, query and reshape JSON documents", long_about = None)]
#[command(version)]
struct Cli {
    /// Log elapsed time for the command at info level
    #[arg(long, global = true)]
    time: bool,

    /// Override the maximum nesting depth
    #[arg(long, global = true, value_name = "N")]
    max_depth: Option<u64>,

    /// Load parser limits from a JSON file
    #[arg(long, global = true, value_name = "FILE")]
    limits: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and reserialize a document
    Fmt {
        file: Option<PathBuf>,
        /// Indented output
        #[arg(long)]
        pretty: bool,
        /// Spaces per level with --pretty
        #[arg(long, default_value_t = 2, requires = "pretty")]
        indent: usize,
        /// Write to FILE instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// Print the value at a dot path
    Get { path: String, file: Option<PathBuf> },

    /// Replace the value of an existing top-level key
    Set {
        key: String,
        /// New value as JSON text
        value: String,
        file: Option<PathBuf>,
    },

    /// Remove a top-level key
    Delete { key: String, file: Option<PathBuf> },

    /// Deep-merge SOURCE into TARGET
    Merge { target: PathBuf, source: PathBuf },

    /// Flatten nested objects into dotted keys
    Flatten { file: Option<PathBuf> },

    /// Expand dotted keys into nested objects
    Unflatten { file: Option<PathBuf> },

    /// Check a document against a shallow schema
    Validate {
        schema: PathBuf,
        file: Option<PathBuf>,
    },

    /// Compare two documents structurally
    Eq { a: PathBuf, b: PathBuf },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Self::Fmt { .. } => "fmt",
            Self::Get { .. } => "get",
            Self::Set { .. } => "set",
            Self::Delete { .. } => "delete",
            Self::Merge { .. } => "merge",
            Self::Flatten { .. } => "flatten",
            Self::Unflatten { .. } => "unflatten",
            Self::Validate { .. } => "validate",
            Self::Eq { .. } => "eq",
        }
    }
}

/// Result of a command that ran to completion.
enum Outcome {
    Success,
    /// Validation or comparison came out negative
    Failed,
}

fn init_tracing(time: bool) {
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if time {
        if let Ok(directive) = "jsontree::cli=info".parse() {
            filter = filter.add_directive(directive);
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_limits(cli: &Cli) -> JsonResult<Limits> {
    let mut limits = match &cli.limits {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|e| JsonError::Io {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
            Limits::from_json_str(&text)?
        }
        None => Limits::standard(),
    };
    if let Some(depth) = cli.max_depth {
        limits = limits.with_max_depth(depth);
    }
    Ok(limits)
}

/// Read a document from `file`, or stdin when absent.
fn load(file: Option<&Path>, limits: Limits) -> JsonResult<Value> {
    match file {
        Some(path) => read_file_with_limits(path, limits),
        None => {
            let mut data = Vec::new();
            std::io::stdin()
                .read_to_end(&mut data)
                .map_err(|e| JsonError::Io {
                    path: "<stdin>".to_string(),
                    message: e.to_string(),
                })?;
            parse_with_limits(&data, limits)
        }
    }
}

/// Print `value` compactly, refusing trees deeper than `limits` allow.
fn emit(value: &Value, limits: &Limits) -> JsonResult<()> {
    println!("{}", to_json_string_checked(value, limits)?);
    Ok(())
}

fn run(command: Commands, limits: Limits) -> JsonResult<Outcome> {
    match command {
        Commands::Fmt {
            file,
            pretty,
            indent,
            out,
        } => {
            let value = load(file.as_deref(), limits)?;
            let indent = pretty.then_some(indent);
            match out {
                Some(path) => write_file(&path, &value, indent)?,
                None => match indent {
                    Some(width) => println!("{}", to_json_string_pretty(&value, width)),
                    None => emit(&value, &limits)?,
                },
            }
        }
        Commands::Get { path, file } => {
            let value = load(file.as_deref(), limits)?;
            emit(query(&value, &path)?, &limits)?;
        }
        Commands::Set { key, value, file } => {
            let new_value = parse_str(&value)?;
            let mut doc = load(file.as_deref(), limits)?;
            update(&mut doc, &key, new_value)?;
            emit(&doc, &limits)?;
        }
        Commands::Delete { key, file } => {
            let mut doc = load(file.as_deref(), limits)?;
            delete(&mut doc, &key)?;
            emit(&doc, &limits)?;
        }
        Commands::Merge { target, source } => {
            let mut doc = load(Some(&target), limits)?;
            merge(&mut doc, load(Some(&source), limits)?);
            emit(&doc, &limits)?;
        }
        Commands::Flatten { file } => {
            let doc = load(file.as_deref(), limits)?;
            emit(&Value::Object(flatten(&doc)), &limits)?;
        }
        Commands::Unflatten { file } => {
            let doc = load(file.as_deref(), limits)?;
            let tree = unflatten_with_limits(doc.as_object()?, &limits)?;
            emit(&tree, &limits)?;
        }
        Commands::Validate { schema, file } => {
            let schema = load(Some(&schema), limits)?;
            let doc = load(file.as_deref(), limits)?;
            let violations = check_schema(&doc, &schema)?;
            if !violations.is_empty() {
                for violation in &violations {
                    println!("{violation}");
                }
                return Ok(Outcome::Failed);
            }
            println!("valid");
        }
        Commands::Eq { a, b } => {
            let equal = deep_equals(&load(Some(&a), limits)?, &load(Some(&b), limits)?);
            println!("{}", if equal { "equal" } else { "different" });
            if !equal {
                return Ok(Outcome::Failed);
            }
        }
    }
    Ok(Outcome::Success)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.time);

    let limits = match load_limits(&cli) {
        Ok(limits) => limits,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };

    let name = cli.command.name();
    let start = Instant::now();
    let result = run(cli.command, limits);
    if cli.time {
        tracing::info!(
            target: "jsontree::cli",
            command = name,
            elapsed_us = start.elapsed().as_micros() as u64,
            "finished"
        );
    }

    match result {
        Ok(Outcome::Success) => ExitCode::SUCCESS,
        Ok(Outcome::Failed) => ExitCode::from(1),
        Err(e) => {
            tracing::debug!(target: "jsontree::cli", code = e.code(), name = e.name(), "command failed");
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}
