//! CLI-specific error types
//!
//! Every CLI error ends the process with exit code 1.

use std::fmt;
use std::io;

use crate::codec::CodecError;
use crate::config::ConfigError;
use crate::frame::FrameError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdout)
    IoError,
    /// The table could not be read or written
    CodecFailed,
    /// The requested column or property does not exist
    NotFound,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "TFS_CLI_CONFIG_ERROR",
            Self::IoError => "TFS_CLI_IO_ERROR",
            Self::CodecFailed => "TFS_CLI_CODEC_FAILED",
            Self::NotFound => "TFS_CLI_NOT_FOUND",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn codec_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::CodecFailed, msg)
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::NotFound, msg)
    }

    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::config_error(format!("{} ({})", e, e.code()))
    }
}

impl From<FrameError> for CliError {
    fn from(e: FrameError) -> Self {
        if e.is_key_not_found() {
            Self::not_found(e.to_string())
        } else {
            Self::codec_failed(format!("{} ({})", e, e.code()))
        }
    }
}

impl From<CodecError> for CliError {
    fn from(e: CodecError) -> Self {
        match e {
            CodecError::Frame(inner) => inner.into(),
            other => Self::codec_failed(format!("{} ({})", other, other.code())),
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
