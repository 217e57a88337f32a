//! Table: ordered named columns, metadata properties and an optional row index
//!
//! # Invariants
//!
//! - `column_index` maps every column name to its position, one entry per
//!   column, names unique
//! - Properties keep insertion order
//! - Row count is the length of the first column; equal column lengths are
//!   the caller's obligation and are checked on demand by [`Table::verify`]

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use super::column::{Column, ColumnData};
use super::errors::{FrameError, FrameResult};
use super::real::Real;
use super::types::DataType;
use super::value::ScalarValue;
use crate::observability::Logger;

/// Length of one column as seen by [`Table::verify`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnReport {
    pub name: String,
    pub kind: DataType,
    pub len: usize,
}

/// Result of a verification pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyReport {
    pub columns: Vec<ColumnReport>,
    pub row_count: usize,
    /// Whether every column has `row_count` elements
    pub consistent: bool,
}

/// A column-oriented table with metadata.
#[derive(Debug, Clone, Default)]
pub struct Table<R: Real = f64> {
    columns: Vec<Column<R>>,
    column_index: HashMap<String, usize>,
    properties: IndexMap<String, ScalarValue<R>>,
    row_index: HashMap<String, usize>,
}

impl<R: Real> Table<R> {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            column_index: HashMap::new(),
            properties: IndexMap::new(),
            row_index: HashMap::new(),
        }
    }

    // ---- Columns ----

    /// Reserves space for `n` more columns.
    pub fn reserve(&mut self, n: usize) {
        self.columns.reserve(n);
        self.column_index.reserve(n);
    }

    /// Adds a column built from `values` and returns its position.
    ///
    /// # Errors
    ///
    /// `DuplicateColumn` if a column named `name` already exists.
    pub fn add_column(
        &mut self,
        name: impl Into<String>,
        values: impl Into<ColumnData<R>>,
    ) -> FrameResult<usize> {
        self.push_column(Column::from_data(name, values))
    }

    /// Adds an empty column of `kind` and returns it for incremental
    /// population.
    pub fn add_empty_column(
        &mut self,
        name: impl Into<String>,
        kind: DataType,
    ) -> FrameResult<&mut Column<R>> {
        let position = self.push_column(Column::new(kind, name)?)?;
        Ok(&mut self.columns[position])
    }

    /// Adopts `column` under its own name and returns its position.
    pub fn push_column(&mut self, column: Column<R>) -> FrameResult<usize> {
        if self.column_index.contains_key(column.name()) {
            return Err(FrameError::DuplicateColumn(column.name().to_string()));
        }
        let position = self.columns.len();
        self.column_index.insert(column.name().to_string(), position);
        self.columns.push(column);
        Ok(position)
    }

    pub fn get_column(&self, name: &str) -> FrameResult<&Column<R>> {
        let position = self.position_of(name)?;
        Ok(&self.columns[position])
    }

    pub fn get_column_mut(&mut self, name: &str) -> FrameResult<&mut Column<R>> {
        let position = self.position_of(name)?;
        Ok(&mut self.columns[position])
    }

    pub fn column_at(&self, position: usize) -> FrameResult<&Column<R>> {
        let len = self.columns.len();
        self.columns.get(position).ok_or(FrameError::IndexOutOfBounds {
            index: position,
            len,
        })
    }

    pub fn column_at_mut(&mut self, position: usize) -> FrameResult<&mut Column<R>> {
        let len = self.columns.len();
        self.columns.get_mut(position).ok_or(FrameError::IndexOutOfBounds {
            index: position,
            len,
        })
    }

    /// Position of the column named `name`.
    pub fn position_of(&self, name: &str) -> FrameResult<usize> {
        self.column_index
            .get(name)
            .copied()
            .ok_or_else(|| FrameError::column_not_found(name))
    }

    /// Renames a column, keeping the name index in sync.
    pub fn rename_column(&mut self, old: &str, new: impl Into<String>) -> FrameResult<()> {
        let new = new.into();
        let position = self.position_of(old)?;
        if old == new {
            return Ok(());
        }
        if self.column_index.contains_key(&new) {
            return Err(FrameError::DuplicateColumn(new));
        }
        self.column_index.remove(old);
        self.column_index.insert(new.clone(), position);
        self.columns[position].set_name(new);
        Ok(())
    }

    /// Columns in declaration order.
    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::name)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    // ---- Properties ----

    /// Stores a property, replacing any existing value under `key`.
    pub fn insert_property(&mut self, key: impl Into<String>, value: impl Into<ScalarValue<R>>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn get_property(&self, key: &str) -> FrameResult<&ScalarValue<R>> {
        self.properties
            .get(key)
            .ok_or_else(|| FrameError::property_not_found(key))
    }

    /// Properties in insertion order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &ScalarValue<R>)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    // ---- Rows ----

    /// Number of rows: the length of the first column, 0 without columns.
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Maps every value of the String column `name` to its row number.
    /// Later duplicates replace earlier ones.
    pub fn build_row_index(&mut self, name: &str) -> FrameResult<()> {
        let keys = self.get_column(name)?.as_strings()?;
        let mut index = HashMap::with_capacity(keys.len());
        for (row, key) in keys.iter().enumerate() {
            index.insert(key.clone(), row);
        }
        self.row_index = index;
        Ok(())
    }

    /// Row number of `key` in the secondary index.
    pub fn row_of(&self, key: &str) -> FrameResult<usize> {
        self.row_index
            .get(key)
            .copied()
            .ok_or_else(|| FrameError::row_key_not_found(key))
    }

    pub fn row_index(&self) -> &HashMap<String, usize> {
        &self.row_index
    }

    /// Reports every column's length. Never fails.
    pub fn verify(&self) -> VerifyReport {
        let row_count = self.row_count();
        let columns: Vec<ColumnReport> = self
            .columns
            .iter()
            .map(|c| ColumnReport {
                name: c.name().to_string(),
                kind: c.kind(),
                len: c.len(),
            })
            .collect();

        for report in &columns {
            let len = report.len.to_string();
            Logger::trace(
                "TFS_VERIFY_COLUMN",
                &[("column", report.name.as_str()), ("len", len.as_str())],
            );
        }

        let consistent = columns.iter().all(|c| c.len == row_count);
        if !consistent {
            let rows = row_count.to_string();
            Logger::warn("TFS_COLUMN_LENGTH_MISMATCH", &[("row_count", rows.as_str())]);
        }

        VerifyReport {
            columns,
            row_count,
            consistent,
        }
    }
}

impl<R: Real> fmt::Display for Table<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Table{{")?;
        writeln!(f, "{} columns, {} rows", self.column_count(), self.row_count())?;
        writeln!(f, "Headers:")?;
        for (key, value) in &self.properties {
            writeln!(f, "{:>32}: {}", key, value)?;
        }
        writeln!(f, "---")?;
        for column in &self.columns {
            writeln!(f, "{:>32}: {} x {}", column.name(), column.kind(), column.len())?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        let mut table = Table::new();
        table.add_column("doubles", vec![1.0f64, 2.0, 3.0]).unwrap();
        table.add_column("strings", vec!["one", "two", "three"]).unwrap();
        table.add_column("ints", vec![1i64, 2, 3]).unwrap();
        table
    }

    #[test]
    fn test_empty_table_has_no_rows() {
        let table: Table = Table::new();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 0);
    }

    #[test]
    fn test_positions_follow_declaration_order() {
        let table = sample_table();
        assert_eq!(table.position_of("doubles").unwrap(), 0);
        assert_eq!(table.position_of("strings").unwrap(), 1);
        assert_eq!(table.position_of("ints").unwrap(), 2);
        let names: Vec<&str> = table.column_names().collect();
        assert_eq!(names, vec!["doubles", "strings", "ints"]);
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let mut table = sample_table();
        let err = table.add_column("ints", vec![4i64, 5, 6]).unwrap_err();
        assert_eq!(err, FrameError::DuplicateColumn("ints".into()));
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.get_column("ints").unwrap().as_ints().unwrap(), &[1, 2, 3]);
    }

    #[test]
    fn test_missing_column() {
        let table = sample_table();
        assert!(table.get_column("missing").unwrap_err().is_key_not_found());
        assert_eq!(
            table.column_at(3).unwrap_err(),
            FrameError::IndexOutOfBounds { index: 3, len: 3 }
        );
    }

    #[test]
    fn test_add_empty_column_for_population() {
        let mut table: Table = Table::new();
        let column = table.add_empty_column("flags", DataType::Bool).unwrap();
        column.push_bool(true).unwrap();
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.get_column("flags").unwrap().as_bools().unwrap(), &[true]);
    }

    #[test]
    fn test_rename_column() {
        let mut table = sample_table();
        table.rename_column("ints", "counts").unwrap();
        assert!(table.get_column("ints").is_err());
        assert_eq!(table.get_column("counts").unwrap().name(), "counts");
        assert_eq!(table.position_of("counts").unwrap(), 2);

        let err = table.rename_column("counts", "doubles").unwrap_err();
        assert_eq!(err.code(), "TFS_DUPLICATE_COLUMN");
    }

    #[test]
    fn test_properties_overwrite_in_place() {
        let mut table: Table = Table::new();
        table.insert_property("Q1", 62.31f64);
        table.insert_property("Q2", 60.32f64);
        table.insert_property("Q1", 1.0f64);

        assert_eq!(table.get_property("Q1").unwrap().as_float().unwrap(), 1.0);
        let keys: Vec<&str> = table.properties().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Q1", "Q2"]);
        assert!(table.get_property("missing").unwrap_err().is_key_not_found());
    }

    #[test]
    fn test_row_index_last_occurrence_wins() {
        let mut table: Table = Table::new();
        table.add_column("name", vec!["a", "b", "a"]).unwrap();
        table.build_row_index("name").unwrap();
        assert_eq!(table.row_of("a").unwrap(), 2);
        assert_eq!(table.row_of("b").unwrap(), 1);
        assert!(table.row_of("c").unwrap_err().is_key_not_found());
    }

    #[test]
    fn test_row_index_requires_string_column() {
        let mut table = sample_table();
        assert!(table.build_row_index("ints").unwrap_err().is_type_mismatch());
        assert!(table.build_row_index("missing").unwrap_err().is_key_not_found());
    }

    #[test]
    fn test_verify_reports_mismatch_without_failing() {
        let mut table = sample_table();
        table.get_column_mut("ints").unwrap().push_int(4).unwrap();

        let report = table.verify();
        assert!(!report.consistent);
        assert_eq!(report.row_count, 3);
        assert_eq!(report.columns[2].len, 4);
        assert!(sample_table().verify().consistent);
    }

    #[test]
    fn test_display_summary() {
        let mut table = sample_table();
        table.insert_property("Comment", "hello world");
        let text = table.to_string();
        assert!(text.contains("3 columns, 3 rows"));
        assert!(text.contains("Comment: hello world"));
    }
}
