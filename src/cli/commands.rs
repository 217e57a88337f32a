//! CLI command implementations
//!
//! Each command loads a table, builds a JSON value and returns it; the
//! caller prints it. Tables are read in double precision.

use std::path::Path;

use serde::Serialize;
use serde_json::{json, Value};

use crate::codec::{self, ParseOptions};
use crate::config::TfsConfig;
use crate::frame::{Column, ColumnData, ColumnReport, DataType, Real, ScalarValue, Table};
use crate::observability::Logger;

use super::args::{Cli, Command};
use super::errors::CliResult;
use super::io::{write_error, write_response};

/// Output of `inspect`
#[derive(Debug, Clone, Serialize)]
pub struct TableSummary {
    pub columns: Vec<ColumnReport>,
    pub row_count: usize,
    pub properties: Vec<PropertySummary>,
    /// Rows reachable through the row index, 0 without one
    pub indexed_rows: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PropertySummary {
    pub key: String,
    pub kind: DataType,
    pub value: Value,
}

/// Run a parsed command line, printing the response
pub fn run_command(cli: Cli) -> CliResult<()> {
    let result = load_config(cli.config.as_deref()).and_then(|config| {
        Logger::set_min_severity(config.min_severity()?);
        execute(cli.command, &config)
    });

    match result {
        Ok(data) => write_response(data),
        Err(e) => {
            write_error(e.code_str(), e.message())?;
            Err(e)
        }
    }
}

/// Execute `command` under `config` and return its JSON response data
pub fn execute(command: Command, config: &TfsConfig) -> CliResult<Value> {
    match command {
        Command::Inspect { path, index } => inspect(&path, index, config),
        Command::Verify { path } => verify(&path, config),
        Command::Rewrite { input, output } => rewrite(&input, &output, config),
        Command::Column { path, name } => column(&path, &name, config),
        Command::Property { path, key } => property(&path, &key, config),
    }
}

/// Load the configuration, or the defaults when no file is given
pub fn load_config(path: Option<&Path>) -> CliResult<TfsConfig> {
    match path {
        Some(path) => Ok(TfsConfig::load(path)?),
        None => Ok(TfsConfig::default()),
    }
}

fn load_table(path: &Path, options: ParseOptions) -> CliResult<Table> {
    Ok(codec::load(path, options)?)
}

pub fn inspect(path: &Path, index: Option<String>, config: &TfsConfig) -> CliResult<Value> {
    let mut options = config.parse_options();
    if index.is_some() {
        options.index_column = index;
    }
    let table = load_table(path, options)?;
    Ok(serde_json::to_value(summarize(&table))?)
}

pub fn verify(path: &Path, config: &TfsConfig) -> CliResult<Value> {
    let table = load_table(path, config.parse_options())?;
    Ok(serde_json::to_value(table.verify())?)
}

pub fn rewrite(input: &Path, output: &Path, config: &TfsConfig) -> CliResult<Value> {
    let table = load_table(input, config.parse_options())?;
    codec::save(&table, output)?;
    Ok(json!({
        "output": output.display().to_string(),
        "columns": table.column_count(),
        "rows": table.row_count(),
        "properties": table.property_count(),
    }))
}

pub fn column(path: &Path, name: &str, config: &TfsConfig) -> CliResult<Value> {
    let table = load_table(path, config.parse_options())?;
    let column = table.get_column(name)?;
    Ok(json!({
        "name": column.name(),
        "kind": column.kind(),
        "values": column_values(column),
    }))
}

pub fn property(path: &Path, key: &str, config: &TfsConfig) -> CliResult<Value> {
    let table = load_table(path, config.parse_options())?;
    let value = table.get_property(key)?;
    Ok(json!({
        "key": key,
        "kind": value.kind(),
        "value": scalar_json(value),
        "text": value.to_string(),
    }))
}

pub fn summarize<R: Real>(table: &Table<R>) -> TableSummary {
    let report = table.verify();
    TableSummary {
        columns: report.columns,
        row_count: report.row_count,
        properties: table
            .properties()
            .map(|(key, value)| PropertySummary {
                key: key.to_string(),
                kind: value.kind(),
                value: scalar_json(value),
            })
            .collect(),
        indexed_rows: table.row_index().len(),
    }
}

/// JSON form of a scalar. Non-finite floats become `null`.
pub fn scalar_json<R: Real>(value: &ScalarValue<R>) -> Value {
    match value {
        ScalarValue::Int(v) => json!(v),
        ScalarValue::Float(v) => json!(v.to_f64()),
        ScalarValue::Bool(v) => json!(v),
        ScalarValue::Complex(c) => json!({ "re": c.re.to_f64(), "im": c.im.to_f64() }),
        ScalarValue::String(s) => json!(s),
    }
}

pub fn column_values<R: Real>(column: &Column<R>) -> Value {
    match column.data() {
        ColumnData::Int(v) => json!(v),
        ColumnData::Float(v) => json!(v.iter().map(|x| x.to_f64()).collect::<Vec<f64>>()),
        ColumnData::String(v) => json!(v),
        ColumnData::Bool(v) => json!(v),
    }
}
