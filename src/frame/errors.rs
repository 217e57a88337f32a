//! Frame error types
//!
//! Error codes:
//! - TFS_TYPE_MISMATCH
//! - TFS_KEY_NOT_FOUND
//! - TFS_INDEX_OUT_OF_BOUNDS
//! - TFS_DUPLICATE_COLUMN
//! - TFS_INVALID_TEXT

use thiserror::Error;

use super::types::DataType;

/// Result type for table, column and value operations
pub type FrameResult<T> = Result<T, FrameError>;

/// What a failed lookup was looking for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Column,
    Property,
    Row,
}

impl LookupKind {
    fn as_str(&self) -> &'static str {
        match self {
            LookupKind::Column => "column",
            LookupKind::Property => "property",
            LookupKind::Row => "row index key",
        }
    }
}

impl std::fmt::Display for LookupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by the in-memory table model
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrameError {
    #[error("{context}: expected {expected}, found {found}")]
    TypeMismatch {
        context: String,
        expected: DataType,
        found: DataType,
    },

    #[error("{kind} '{key}' not found")]
    KeyNotFound { kind: LookupKind, key: String },

    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("column '{0}' already exists")]
    DuplicateColumn(String),

    #[error("'{token}' is not a valid {expected} literal")]
    InvalidText { token: String, expected: DataType },
}

impl FrameError {
    pub fn type_mismatch(context: impl Into<String>, expected: DataType, found: DataType) -> Self {
        FrameError::TypeMismatch {
            context: context.into(),
            expected,
            found,
        }
    }

    pub fn column_not_found(name: impl Into<String>) -> Self {
        FrameError::KeyNotFound {
            kind: LookupKind::Column,
            key: name.into(),
        }
    }

    pub fn property_not_found(key: impl Into<String>) -> Self {
        FrameError::KeyNotFound {
            kind: LookupKind::Property,
            key: key.into(),
        }
    }

    pub fn row_key_not_found(key: impl Into<String>) -> Self {
        FrameError::KeyNotFound {
            kind: LookupKind::Row,
            key: key.into(),
        }
    }

    /// Returns the string error code
    pub fn code(&self) -> &'static str {
        match self {
            FrameError::TypeMismatch { .. } => "TFS_TYPE_MISMATCH",
            FrameError::KeyNotFound { .. } => "TFS_KEY_NOT_FOUND",
            FrameError::IndexOutOfBounds { .. } => "TFS_INDEX_OUT_OF_BOUNDS",
            FrameError::DuplicateColumn(_) => "TFS_DUPLICATE_COLUMN",
            FrameError::InvalidText { .. } => "TFS_INVALID_TEXT",
        }
    }

    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, FrameError::TypeMismatch { .. })
    }

    pub fn is_key_not_found(&self) -> bool {
        matches!(self, FrameError::KeyNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            FrameError::type_mismatch("x", DataType::Int, DataType::Float).code(),
            "TFS_TYPE_MISMATCH"
        );
        assert_eq!(FrameError::column_not_found("x").code(), "TFS_KEY_NOT_FOUND");
        assert_eq!(FrameError::DuplicateColumn("x".into()).code(), "TFS_DUPLICATE_COLUMN");
    }

    #[test]
    fn test_display_names_the_key() {
        let err = FrameError::property_not_found("Q1");
        assert_eq!(err.to_string(), "property 'Q1' not found");
        assert!(err.is_key_not_found());
    }

    #[test]
    fn test_type_mismatch_display() {
        let err = FrameError::type_mismatch("column 'ints'", DataType::Float, DataType::Int);
        let display = err.to_string();
        assert!(display.contains("ints"));
        assert!(display.contains("float"));
        assert!(display.contains("int"));
        assert!(err.is_type_mismatch());
    }
}
