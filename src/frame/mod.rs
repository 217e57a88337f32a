//! In-memory table model
//!
//! A [`Table`] owns named, typed [`Column`]s plus a dictionary of
//! [`ScalarValue`] properties. All types are generic over the floating-point
//! precision [`Real`] (`f64` unless stated otherwise).
//!
//! # Design Principles
//!
//! - Kind and payload are one enum: no mismatch is representable
//! - Column kinds never change after construction
//! - Typed accessors fail with `TypeMismatch`, lookups with `KeyNotFound`
//! - Column names are unique within a table

mod column;
mod errors;
mod numeric;
mod real;
mod table;
mod types;
mod value;

pub use column::{CellValue, Column, ColumnData, FIELD_WIDTH};
pub use errors::{FrameError, FrameResult, LookupKind};
pub use numeric::{parse_bool, parse_int, parse_real, Parsed, TextMode};
pub use real::Real;
pub use table::{ColumnReport, Table, VerifyReport};
pub use types::{DataType, BOOL_TAG, FLOAT_TAG, INT_TAG, STRING_TAG};
pub use value::ScalarValue;
