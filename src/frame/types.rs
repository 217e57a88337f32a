//! Element kinds and their TFS type tags
//!
//! Supported kinds:
//! - int: 64-bit signed integer (`%d`)
//! - float: floating point of the table's precision (`%le`)
//! - bool: Boolean (`%b`)
//! - complex: complex number (metadata only, written as `%s`)
//! - string: UTF-8 string (`%s`, and any unrecognized tag)

use std::fmt;

use serde::{Deserialize, Serialize};

/// Integer type tag
pub const INT_TAG: &str = "%d";
/// Floating-point type tag
pub const FLOAT_TAG: &str = "%le";
/// Boolean type tag
pub const BOOL_TAG: &str = "%b";
/// String type tag
pub const STRING_TAG: &str = "%s";

/// Kind discriminator shared by scalar values and columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// 64-bit signed integer
    Int,
    /// Floating point
    Float,
    /// Boolean
    Bool,
    /// Complex number, never stored as a column
    Complex,
    /// UTF-8 string
    String,
}

impl DataType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            DataType::Int => "int",
            DataType::Float => "float",
            DataType::Bool => "bool",
            DataType::Complex => "complex",
            DataType::String => "string",
        }
    }

    /// Maps a type tag to a kind. Unrecognized tags fall back to String.
    pub fn from_tag(tag: &str) -> DataType {
        Self::from_known_tag(tag).unwrap_or(DataType::String)
    }

    /// Maps a type tag to a kind, or `None` if the tag is not one of the
    /// recognized tags.
    pub fn from_known_tag(tag: &str) -> Option<DataType> {
        match tag {
            INT_TAG => Some(DataType::Int),
            FLOAT_TAG => Some(DataType::Float),
            BOOL_TAG => Some(DataType::Bool),
            STRING_TAG => Some(DataType::String),
            _ => None,
        }
    }

    /// Returns the tag written for this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            DataType::Int => INT_TAG,
            DataType::Float => FLOAT_TAG,
            DataType::Bool => BOOL_TAG,
            DataType::Complex | DataType::String => STRING_TAG,
        }
    }

    /// Whether a column of this kind can exist.
    pub fn is_column_kind(&self) -> bool {
        !matches!(self, DataType::Complex)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tags() {
        assert_eq!(DataType::from_tag("%d"), DataType::Int);
        assert_eq!(DataType::from_tag("%le"), DataType::Float);
        assert_eq!(DataType::from_tag("%b"), DataType::Bool);
        assert_eq!(DataType::from_tag("%s"), DataType::String);
    }

    #[test]
    fn test_unknown_tag_defaults_to_string() {
        assert_eq!(DataType::from_tag("%08s"), DataType::String);
        assert_eq!(DataType::from_known_tag("%08s"), None);
    }

    #[test]
    fn test_complex_written_as_string() {
        assert_eq!(DataType::Complex.tag(), "%s");
        assert!(!DataType::Complex.is_column_kind());
        assert!(DataType::Bool.is_column_kind());
    }

    #[test]
    fn test_type_names() {
        assert_eq!(DataType::Int.type_name(), "int");
        assert_eq!(DataType::Float.to_string(), "float");
    }
}
