//! JSON I/O handling for CLI
//!
//! - Input: one JSON value from a file or stdin
//! - Output: one JSON object per response on stdout
//! - UTF-8 only

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use super::errors::{CliError, CliResult};
use crate::schema::FieldIssue;

/// Read a JSON payload from `path`, or from stdin when `None`
pub fn read_payload(path: Option<&Path>) -> CliResult<Value> {
    let content = match path {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| CliError::io_error(format!("Failed to read {}: {}", path.display(), e)))?,
        None => {
            let mut buf = String::new();
            io::stdin().lock().read_to_string(&mut buf)?;
            buf
        }
    };

    if content.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }

    Ok(serde_json::from_str(&content)?)
}

/// Write a success response to stdout
pub fn write_response(data: impl Serialize) -> CliResult<()> {
    write_value(&serde_json::json!({
        "status": "ok",
        "data": data
    }))
}

/// Write a validation error response to stdout
pub fn write_rejection(code: &str, entity: &str, issues: &[FieldIssue]) -> CliResult<()> {
    write_value(&serde_json::json!({
        "status": "error",
        "code": code,
        "entity": entity,
        "issues": issues
    }))
}

/// Write plain text to stdout
pub fn write_text(text: &str) -> CliResult<()> {
    let mut stdout = io::stdout();
    write!(stdout, "{}", text)?;
    stdout.flush()?;

    Ok(())
}

fn write_value(value: &Value) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}
