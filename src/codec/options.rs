//! Parse options
//!
//! The defaults reproduce the tolerant behavior of the classic TFS reader:
//! numeric tokens convert best-effort, unknown lines before the data are
//! skipped and rows may carry too few or too many values. Each relaxation
//! can be switched off independently.

use crate::frame::TextMode;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Conversion of numeric and boolean tokens
    pub numbers: TextMode,
    /// Reject unrecognized pre-data lines, unknown type tags and short
    /// property lines
    pub strict_structure: bool,
    /// Require every data row to carry exactly one value per column
    pub strict_rows: bool,
    /// String column to build the secondary row index from
    pub index_column: Option<String>,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every check enabled.
    pub fn strict() -> Self {
        Self {
            numbers: TextMode::Strict,
            strict_structure: true,
            strict_rows: true,
            index_column: None,
        }
    }

    pub fn with_index_column(mut self, name: impl Into<String>) -> Self {
        self.index_column = Some(name.into());
        self
    }

    pub fn with_numbers(mut self, mode: TextMode) -> Self {
        self.numbers = mode;
        self
    }

    /// The index column, treating an empty name as none.
    pub fn index_column(&self) -> Option<&str> {
        self.index_column.as_deref().filter(|name| !name.is_empty())
    }
}
