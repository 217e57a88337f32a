//! TFS reader
//!
//! Reads a TFS text stream line by line into a [`Table`].
//!
//! The reader is a small state machine:
//!
//! ```text
//! ReadingMetadata --('*' or '$' line)--> ReadingSchema
//! ReadingSchema   --(both lines seen)--> ReadingRows
//! ReadingRows     --(end of input)-----> Done
//! ```
//!
//! Before the schema is complete, the first character of a line decides
//! its role: `@` property, `*` column names, `$` column types. The line that
//! completes the schema creates the columns; every later non-blank line is a
//! data row. Blank lines are skipped in every phase.

use std::collections::HashSet;
use std::io::BufRead;

use crate::frame::{parse_bool, parse_int, parse_real, DataType, Real, ScalarValue, Table};
use crate::observability::{Logger, ObservationScope};

use super::errors::{CodecError, CodecResult};
use super::options::ParseOptions;

/// Where the reader is in the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsePhase {
    /// No column header or type line seen yet
    ReadingMetadata,
    /// One of the header and type lines seen
    ReadingSchema,
    /// Columns created, lines are data rows
    ReadingRows,
    /// Input consumed, table handed out
    Done,
}

/// Incremental TFS parser
///
/// Lines can be fed one at a time with [`feed_line`](Self::feed_line) and
/// the table taken with [`finish`](Self::finish), or a whole source can be
/// consumed with [`read`](Self::read).
pub struct TfsReader<R: Real = f64> {
    options: ParseOptions,
    phase: ParsePhase,
    line_number: usize,
    table: Table<R>,
    header: Option<Vec<String>>,
    types: Option<Vec<DataType>>,
    ragged_rows: usize,
    ignored_lines: usize,
}

impl<R: Real> TfsReader<R> {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            phase: ParsePhase::ReadingMetadata,
            line_number: 0,
            table: Table::new(),
            header: None,
            types: None,
            ragged_rows: 0,
            ignored_lines: 0,
        }
    }

    pub fn phase(&self) -> ParsePhase {
        self.phase
    }

    /// Number of lines fed so far
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Rows whose value count differed from the column count
    pub fn ragged_rows(&self) -> usize {
        self.ragged_rows
    }

    /// Consumes every line of `source` and returns the table.
    pub fn read<B: BufRead>(mut self, source: B) -> CodecResult<Table<R>> {
        let scope = ObservationScope::new("TFS_PARSE");
        let result = self.read_lines(source);
        match &result {
            Ok(table) => {
                let columns = table.column_count().to_string();
                let rows = table.row_count().to_string();
                let properties = table.property_count().to_string();
                scope.complete_with_fields(&[
                    ("columns", columns.as_str()),
                    ("rows", rows.as_str()),
                    ("properties", properties.as_str()),
                ]);
            }
            Err(e) => scope.fail(&e.to_string()),
        }
        result
    }

    fn read_lines<B: BufRead>(&mut self, source: B) -> CodecResult<Table<R>> {
        for line in source.lines() {
            let line = line.map_err(|e| CodecError::io("reading TFS input", e))?;
            self.feed_line(&line)?;
        }
        self.finish()
    }

    /// Processes one line, without its terminator.
    pub fn feed_line(&mut self, line: &str) -> CodecResult<()> {
        self.line_number += 1;
        if line.trim().is_empty() {
            return Ok(());
        }
        match self.phase {
            ParsePhase::ReadingMetadata | ParsePhase::ReadingSchema => self.read_preamble(line),
            ParsePhase::ReadingRows => self.read_row(line),
            ParsePhase::Done => Err(CodecError::malformed(
                self.line_number,
                "line after the end of input",
            )),
        }
    }

    /// Ends the input: validates the schema, builds the row index and hands
    /// out the table.
    pub fn finish(&mut self) -> CodecResult<Table<R>> {
        if self.phase == ParsePhase::Done {
            return Err(CodecError::malformed(self.line_number, "input already finished"));
        }
        if self.phase != ParsePhase::ReadingRows {
            let missing = match (self.header.is_some(), self.types.is_some()) {
                (false, true) => "column header line",
                (true, false) => "column type line",
                _ => "column header and type lines",
            };
            return Err(CodecError::malformed(
                self.line_number.max(1),
                format!("end of input before the {}", missing),
            ));
        }

        if self.ragged_rows > 0 {
            let ragged = self.ragged_rows.to_string();
            let columns = self.table.column_count().to_string();
            Logger::warn(
                "TFS_ROWS_RAGGED",
                &[("rows", ragged.as_str()), ("columns", columns.as_str())],
            );
        }
        if self.ignored_lines > 0 {
            let ignored = self.ignored_lines.to_string();
            Logger::info("TFS_LINES_IGNORED", &[("lines", ignored.as_str())]);
        }

        if let Some(name) = self.options.index_column() {
            self.table.build_row_index(name)?;
        }

        self.phase = ParsePhase::Done;
        Ok(std::mem::take(&mut self.table))
    }

    // ---- Metadata and schema ----

    fn read_preamble(&mut self, line: &str) -> CodecResult<()> {
        match line.as_bytes()[0] {
            b'@' => self.read_property(&line[1..]),
            b'*' => self.read_header(&line[1..]),
            b'$' => self.read_types(&line[1..]),
            _ if self.options.strict_structure => Err(CodecError::malformed(
                self.line_number,
                "unrecognized line before the column header",
            )),
            _ => {
                self.ignored_lines += 1;
                let number = self.line_number.to_string();
                Logger::trace("TFS_LINE_IGNORED", &[("line", number.as_str())]);
                Ok(())
            }
        }
    }

    /// `@ KEY TAG VALUE...`
    fn read_property(&mut self, body: &str) -> CodecResult<()> {
        let tokens: Vec<&str> = body.split_whitespace().collect();
        if tokens.len() < 2 {
            if self.options.strict_structure {
                return Err(CodecError::malformed(
                    self.line_number,
                    "property line needs a key and a type tag",
                ));
            }
            let number = self.line_number.to_string();
            Logger::warn("TFS_PROPERTY_SKIPPED", &[("line", number.as_str())]);
            return Ok(());
        }

        let key = tokens[0];
        let tag = tokens[1];
        let rest = &tokens[2..];
        let kind = self.kind_of_tag(tag)?;
        let mode = self.options.numbers;
        let first = rest.first().copied().unwrap_or("");

        let value: ScalarValue<R> = match kind {
            DataType::Int => ScalarValue::Int(
                parse_int(first)
                    .resolve(mode, first, DataType::Int)
                    .map_err(|e| CodecError::malformed(self.line_number, e.to_string()))?,
            ),
            DataType::Float => ScalarValue::Float(
                parse_real::<R>(first)
                    .resolve(mode, first, DataType::Float)
                    .map_err(|e| CodecError::malformed(self.line_number, e.to_string()))?,
            ),
            DataType::Bool => ScalarValue::Bool(
                parse_bool(first)
                    .resolve(mode, first, DataType::Bool)
                    .map_err(|e| CodecError::malformed(self.line_number, e.to_string()))?,
            ),
            DataType::Complex | DataType::String => ScalarValue::String(rest.join(" ")),
        };

        self.table.insert_property(key, value);
        Ok(())
    }

    /// `* NAME NAME ...`
    fn read_header(&mut self, body: &str) -> CodecResult<()> {
        if self.header.is_some() {
            return Err(CodecError::malformed(self.line_number, "duplicate column header line"));
        }

        let mut seen = HashSet::new();
        let mut names = Vec::new();
        for name in body.split_whitespace() {
            if !seen.insert(name) {
                return Err(CodecError::malformed(
                    self.line_number,
                    format!("duplicate column name '{}'", name),
                ));
            }
            names.push(name.to_string());
        }

        self.header = Some(names);
        self.phase = ParsePhase::ReadingSchema;
        self.check_initialized()
    }

    /// `$ TAG TAG ...`
    fn read_types(&mut self, body: &str) -> CodecResult<()> {
        if self.types.is_some() {
            return Err(CodecError::malformed(self.line_number, "duplicate column type line"));
        }

        let mut kinds = Vec::new();
        for tag in body.split_whitespace() {
            kinds.push(self.kind_of_tag(tag)?);
        }

        self.types = Some(kinds);
        self.phase = ParsePhase::ReadingSchema;
        self.check_initialized()
    }

    fn kind_of_tag(&self, tag: &str) -> CodecResult<DataType> {
        match DataType::from_known_tag(tag) {
            Some(kind) => Ok(kind),
            None if self.options.strict_structure => Err(CodecError::malformed(
                self.line_number,
                format!("unknown type tag '{}'", tag),
            )),
            None => Ok(DataType::String),
        }
    }

    /// Creates the columns once both the header and type lines are known.
    fn check_initialized(&mut self) -> CodecResult<()> {
        let (Some(names), Some(kinds)) = (self.header.as_ref(), self.types.as_ref()) else {
            return Ok(());
        };
        if names.len() != kinds.len() {
            return Err(CodecError::malformed(
                self.line_number,
                format!(
                    "column header names {} columns but the type line declares {}",
                    names.len(),
                    kinds.len()
                ),
            ));
        }

        self.table.reserve(names.len());
        for (name, kind) in names.iter().zip(kinds) {
            self.table.add_empty_column(name.as_str(), *kind)?;
        }

        self.phase = ParsePhase::ReadingRows;
        let columns = self.table.column_count().to_string();
        Logger::trace("TFS_SCHEMA_READY", &[("columns", columns.as_str())]);
        Ok(())
    }

    // ---- Data ----

    fn read_row(&mut self, line: &str) -> CodecResult<()> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let width = self.table.column_count();
        let number = self.line_number;

        if tokens.len() != width {
            if self.options.strict_rows {
                return Err(CodecError::malformed(
                    number,
                    format!("row has {} values for {} columns", tokens.len(), width),
                ));
            }
            self.ragged_rows += 1;
        }

        let mode = self.options.numbers;
        for (position, token) in tokens.iter().take(width).enumerate() {
            self.table
                .column_at_mut(position)?
                .convert_from_text_with(token, mode)
                .map_err(|e| CodecError::malformed(number, e.to_string()))?;
        }
        Ok(())
    }
}

impl<R: Real> Default for TfsReader<R> {
    fn default() -> Self {
        Self::new(ParseOptions::default())
    }
}
