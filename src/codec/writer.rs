//! TFS writer
//!
//! Output layout, one line each:
//!
//! ```text
//! @ <key right-aligned to 32> <tag right-aligned to 4> <value>
//! * <name right-aligned to 15> ...
//! $ <tag right-aligned to 15> ...
//!   <value right-aligned to 15> ...
//! ```
//!
//! Properties come first in insertion order, then the header and type
//! lines, then one line per row. Every header, type and row field is
//! followed by one space.
//!
//! Fields are separated by whitespace only, so names, keys and string
//! cells must be non-empty and free of whitespace. Tables that break this,
//! or whose columns differ in length, are refused before any output.

use std::io::Write;

use crate::frame::{Real, ScalarValue, Table, FIELD_WIDTH};
use crate::observability::ObservationScope;

use super::errors::{CodecError, CodecResult};

/// Width of the key field on property lines
pub const KEY_WIDTH: usize = 32;

/// Width of the tag field on property lines
pub const TAG_WIDTH: usize = 4;

/// Writes tables to a byte sink
pub struct TfsWriter<W: Write> {
    sink: W,
    lines_written: usize,
}

impl<W: Write> TfsWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            lines_written: 0,
        }
    }

    /// Writes `table` and flushes the sink.
    ///
    /// # Errors
    ///
    /// `RaggedTable` if any column length differs from the row count,
    /// `Unrepresentable` if a name, key or cell would not read back intact.
    /// Nothing is written in either case.
    pub fn write_table<R: Real>(&mut self, table: &Table<R>) -> CodecResult<()> {
        let rows = table.row_count().to_string();
        let scope = ObservationScope::with_fields("TFS_SERIALIZE", &[("rows", rows.as_str())]);
        match self.write_all_lines(table) {
            Ok(()) => {
                let lines = self.lines_written.to_string();
                scope.complete_with_fields(&[("lines", lines.as_str())]);
                Ok(())
            }
            Err(e) => {
                scope.fail(&e.to_string());
                Err(e)
            }
        }
    }

    fn write_all_lines<R: Real>(&mut self, table: &Table<R>) -> CodecResult<()> {
        check_rectangular(table)?;
        check_representable(table)?;

        for (key, value) in table.properties() {
            self.write_line(&render_property(key, value))?;
        }
        self.write_line(&render_header(table))?;
        self.write_line(&render_types(table))?;
        for row in 0..table.row_count() {
            self.write_line(&render_row(table, row)?)?;
        }

        self.sink
            .flush()
            .map_err(|e| CodecError::io("flushing TFS output", e))
    }

    fn write_line(&mut self, line: &str) -> CodecResult<()> {
        self.sink
            .write_all(line.as_bytes())
            .and_then(|()| self.sink.write_all(b"\n"))
            .map_err(|e| CodecError::io("writing TFS output", e))?;
        self.lines_written += 1;
        Ok(())
    }

    /// Lines written across every table so far
    pub fn lines_written(&self) -> usize {
        self.lines_written
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}

fn check_rectangular<R: Real>(table: &Table<R>) -> CodecResult<()> {
    let rows = table.row_count();
    match table.columns().iter().find(|c| c.len() != rows) {
        Some(column) => Err(CodecError::RaggedTable {
            column: column.name().to_string(),
            len: column.len(),
            rows,
        }),
        None => Ok(()),
    }
}

fn check_representable<R: Real>(table: &Table<R>) -> CodecResult<()> {
    for (key, value) in table.properties() {
        check_token("property key", key)?;
        if let ScalarValue::String(text) = value {
            if text.contains(|c| c == '\n' || c == '\r') {
                return Err(unrepresentable("property value", text, "contains a line break"));
            }
        }
    }

    for column in table.columns() {
        check_token("column name", column.name())?;
        if let Ok(cells) = column.as_strings() {
            for cell in cells {
                check_token(&format!("cell of column '{}'", column.name()), cell)?;
            }
        }
    }
    Ok(())
}

/// A header name, property key or string cell is read back as exactly one
/// whitespace-separated token.
fn check_token(what: &str, text: &str) -> CodecResult<()> {
    if text.is_empty() {
        return Err(unrepresentable(what, text, "is empty"));
    }
    if text.chars().any(char::is_whitespace) {
        return Err(unrepresentable(what, text, "contains whitespace"));
    }
    Ok(())
}

fn unrepresentable(what: &str, text: &str, reason: &'static str) -> CodecError {
    CodecError::Unrepresentable {
        what: what.to_string(),
        text: text.to_string(),
        reason,
    }
}

pub fn render_property<R: Real>(key: &str, value: &ScalarValue<R>) -> String {
    format!(
        "@ {:>kw$} {:>tw$} {}",
        key,
        value.kind().tag(),
        value,
        kw = KEY_WIDTH,
        tw = TAG_WIDTH
    )
}

pub fn render_header<R: Real>(table: &Table<R>) -> String {
    let mut line = String::from("* ");
    for name in table.column_names() {
        line.push_str(&format!("{:>width$} ", name, width = FIELD_WIDTH));
    }
    line
}

pub fn render_types<R: Real>(table: &Table<R>) -> String {
    let mut line = String::from("$ ");
    for column in table.columns() {
        line.push_str(&format!("{:>width$} ", column.kind().tag(), width = FIELD_WIDTH));
    }
    line
}

pub fn render_row<R: Real>(table: &Table<R>, row: usize) -> CodecResult<String> {
    let mut line = String::from("  ");
    for column in table.columns() {
        column.print_at(row, &mut line)?;
    }
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex;

    fn write(table: &Table) -> String {
        let mut writer = TfsWriter::new(Vec::new());
        writer.write_table(table).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_property_line_layout() {
        let line = render_property::<f64>("Q1", &ScalarValue::Float(62.31));
        assert_eq!(line, format!("@ {}Q1  %le 62.31", " ".repeat(30)));

        let line = render_property::<f64>("N", &ScalarValue::Int(3));
        assert!(line.ends_with("N   %d 3"));
    }

    #[test]
    fn test_complex_property_written_as_string() {
        let line = render_property::<f64>("Z", &ScalarValue::Complex(Complex::new(1.0, -2.0)));
        assert!(line.ends_with("Z   %s (1,-2)"));
    }

    #[test]
    fn test_full_layout() {
        let mut table: Table = Table::new();
        table.insert_property("Comment", "hello");
        table.add_column("X", vec![1i64, 22]).unwrap();
        table.add_column("NAME", vec!["a", "b"]).unwrap();

        let text = write(&table);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("@ "));
        assert!(lines[0].ends_with("Comment   %s hello"));
        assert_eq!(lines[1], format!("* {:>15} {:>15} ", "X", "NAME"));
        assert_eq!(lines[2], format!("$ {:>15} {:>15} ", "%d", "%s"));
        assert_eq!(lines[3], format!("  {:>15} {:>15} ", "1", "a"));
        assert_eq!(lines[4], format!("  {:>15} {:>15} ", "22", "b"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_bool_column_layout() {
        let mut table: Table = Table::new();
        table.add_column("ON", vec![true, false]).unwrap();
        let text = write(&table);
        assert!(text.contains(&format!("$ {:>15} ", "%b")));
        assert!(text.contains(&format!("  {:>15} ", "True")));
        assert!(text.contains(&format!("  {:>15} ", "False")));
    }

    #[test]
    fn test_empty_table() {
        let text = write(&Table::new());
        assert_eq!(text, "* \n$ \n");
    }

    #[test]
    fn test_ragged_table_rejected() {
        let mut table: Table = Table::new();
        table.add_column("A", vec![1i64, 2]).unwrap();
        table.add_column("B", vec![1i64]).unwrap();

        let mut writer = TfsWriter::new(Vec::new());
        let err = writer.write_table(&table).unwrap_err();
        assert_eq!(err.code(), "TFS_RAGGED_TABLE");
        assert!(writer.into_inner().is_empty());
    }

    #[test]
    fn test_unrepresentable_text_rejected() {
        let mut table: Table = Table::new();
        table.add_column("NAME", vec!["IP1", ""]).unwrap();
        let mut writer = TfsWriter::new(Vec::new());
        let err = writer.write_table(&table).unwrap_err();
        assert_eq!(err.code(), "TFS_UNREPRESENTABLE");
        assert!(writer.into_inner().is_empty());

        let mut table: Table = Table::new();
        table.add_column("BET X", vec![1i64]).unwrap();
        assert!(TfsWriter::new(Vec::new()).write_table(&table).is_err());

        let mut table: Table = Table::new();
        table.insert_property("NOTE", "two\nlines");
        assert!(TfsWriter::new(Vec::new()).write_table(&table).is_err());
    }

    #[test]
    fn test_lines_written() {
        let mut table: Table = Table::new();
        table.add_column("A", vec![1i64, 2, 3]).unwrap();
        let mut writer = TfsWriter::new(Vec::new());
        writer.write_table(&table).unwrap();
        assert_eq!(writer.lines_written(), 5);
    }
}
