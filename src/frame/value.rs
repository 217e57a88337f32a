//! Scalar values used for table-level metadata

use std::fmt;

use num_complex::Complex;

use super::errors::{FrameError, FrameResult};
use super::real::Real;
use super::types::DataType;

/// A single tagged metadata value.
///
/// The kind is the variant, so a value can never carry a payload that
/// disagrees with its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue<R: Real = f64> {
    Int(i64),
    Float(R),
    Bool(bool),
    Complex(Complex<R>),
    String(String),
}

impl<R: Real> ScalarValue<R> {
    /// Returns the kind of the contained value.
    pub fn kind(&self) -> DataType {
        match self {
            ScalarValue::Int(_) => DataType::Int,
            ScalarValue::Float(_) => DataType::Float,
            ScalarValue::Bool(_) => DataType::Bool,
            ScalarValue::Complex(_) => DataType::Complex,
            ScalarValue::String(_) => DataType::String,
        }
    }

    fn mismatch(&self, expected: DataType) -> FrameError {
        FrameError::type_mismatch("scalar value", expected, self.kind())
    }

    pub fn as_int(&self) -> FrameResult<i64> {
        match self {
            ScalarValue::Int(v) => Ok(*v),
            _ => Err(self.mismatch(DataType::Int)),
        }
    }

    pub fn as_float(&self) -> FrameResult<R> {
        match self {
            ScalarValue::Float(v) => Ok(*v),
            _ => Err(self.mismatch(DataType::Float)),
        }
    }

    pub fn as_bool(&self) -> FrameResult<bool> {
        match self {
            ScalarValue::Bool(v) => Ok(*v),
            _ => Err(self.mismatch(DataType::Bool)),
        }
    }

    /// Float values are promoted to a complex number with zero imaginary part.
    pub fn as_complex(&self) -> FrameResult<Complex<R>> {
        match self {
            ScalarValue::Complex(v) => Ok(*v),
            ScalarValue::Float(v) => Ok(Complex::new(*v, R::default())),
            _ => Err(self.mismatch(DataType::Complex)),
        }
    }

    pub fn as_string(&self) -> FrameResult<&str> {
        match self {
            ScalarValue::String(v) => Ok(v),
            _ => Err(self.mismatch(DataType::String)),
        }
    }
}

impl<R: Real> fmt::Display for ScalarValue<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Int(v) => write!(f, "{}", v),
            ScalarValue::Float(v) => f.write_str(&v.to_text()),
            ScalarValue::Bool(true) => f.write_str("True"),
            ScalarValue::Bool(false) => f.write_str("False"),
            ScalarValue::Complex(c) => write!(f, "({},{})", c.re.to_text(), c.im.to_text()),
            ScalarValue::String(s) => f.write_str(s),
        }
    }
}

impl<R: Real> From<i64> for ScalarValue<R> {
    fn from(value: i64) -> Self {
        ScalarValue::Int(value)
    }
}

impl<R: Real> From<i32> for ScalarValue<R> {
    fn from(value: i32) -> Self {
        ScalarValue::Int(i64::from(value))
    }
}

impl<R: Real> From<f64> for ScalarValue<R> {
    fn from(value: f64) -> Self {
        ScalarValue::Float(R::from_f64(value))
    }
}

impl<R: Real> From<f32> for ScalarValue<R> {
    fn from(value: f32) -> Self {
        ScalarValue::Float(R::from_f32(value))
    }
}

impl<R: Real> From<bool> for ScalarValue<R> {
    fn from(value: bool) -> Self {
        ScalarValue::Bool(value)
    }
}

impl<R: Real> From<Complex<R>> for ScalarValue<R> {
    fn from(value: Complex<R>) -> Self {
        ScalarValue::Complex(value)
    }
}

impl<R: Real> From<String> for ScalarValue<R> {
    fn from(value: String) -> Self {
        ScalarValue::String(value)
    }
}

impl<R: Real> From<&str> for ScalarValue<R> {
    fn from(value: &str) -> Self {
        ScalarValue::String(value.to_string())
    }
}
