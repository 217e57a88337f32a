//! JSON output for the CLI
//!
//! Every command prints exactly one JSON object on stdout:
//! `{"status":"ok","data":...}` or `{"status":"error","code":...,"message":...}`.

use std::io::{self, Write};

use serde_json::Value;

use super::errors::CliResult;

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    write_response_to(&mut io::stdout(), data)
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    write_error_to(&mut io::stdout(), code, message)
}

pub fn write_response_to<W: Write>(sink: &mut W, data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });
    write_line(sink, &response)
}

pub fn write_error_to<W: Write>(sink: &mut W, code: &str, message: &str) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    });
    write_line(sink, &response)
}

fn write_line<W: Write>(sink: &mut W, response: &Value) -> CliResult<()> {
    serde_json::to_writer(&mut *sink, response)?;
    writeln!(sink)?;
    sink.flush()?;
    Ok(())
}
