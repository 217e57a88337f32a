//! Codec error types
//!
//! Error codes:
//! - TFS_MALFORMED_LINE: structurally invalid input, or a strict conversion failure
//! - TFS_RAGGED_TABLE: a table whose columns disagree in length cannot be written
//! - TFS_UNREPRESENTABLE: a name, key or cell that would not read back as one token
//! - TFS_IO_FAILED: the line source or sink failed
//! - any frame error code, passed through unchanged

use std::io;

use thiserror::Error;

use crate::frame::FrameError;

/// Result type for parse and serialize operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors raised while reading or writing the TFS text format
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    #[error("column '{column}' has {len} values but the table has {rows} rows")]
    RaggedTable {
        column: String,
        len: usize,
        rows: usize,
    },

    #[error("{what} {text:?} cannot be written: {reason}")]
    Unrepresentable {
        what: String,
        text: String,
        reason: &'static str,
    },

    #[error("I/O error while {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Frame(#[from] FrameError),
}

impl CodecError {
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        CodecError::MalformedLine {
            line,
            reason: reason.into(),
        }
    }

    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        CodecError::Io {
            context: context.into(),
            source,
        }
    }

    /// Returns the string error code
    pub fn code(&self) -> &'static str {
        match self {
            CodecError::MalformedLine { .. } => "TFS_MALFORMED_LINE",
            CodecError::RaggedTable { .. } => "TFS_RAGGED_TABLE",
            CodecError::Unrepresentable { .. } => "TFS_UNREPRESENTABLE",
            CodecError::Io { .. } => "TFS_IO_FAILED",
            CodecError::Frame(e) => e.code(),
        }
    }

    /// Line number of a malformed line, 1-based
    pub fn line(&self) -> Option<usize> {
        match self {
            CodecError::MalformedLine { line, .. } => Some(*line),
            _ => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, CodecError::MalformedLine { .. })
    }

    /// The wrapped frame error, if this is one
    pub fn as_frame(&self) -> Option<&FrameError> {
        match self {
            CodecError::Frame(e) => Some(e),
            _ => None,
        }
    }
}
