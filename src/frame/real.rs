//! Floating-point precision parameter
//!
//! Every table, column and scalar is generic over `R: Real`. Only `f32` and
//! `f64` implement it.

use std::fmt;
use std::str::FromStr;

/// Magnitudes at or above this are written in exponent form.
const EXP_UPPER: f64 = 1e16;
/// Non-zero magnitudes below this are written in exponent form.
const EXP_LOWER: f64 = 1e-5;

/// Floating-point element type of a table.
pub trait Real:
    Copy
    + Default
    + PartialEq
    + PartialOrd
    + fmt::Debug
    + fmt::Display
    + fmt::LowerExp
    + FromStr
    + Send
    + Sync
    + 'static
{
    /// Short name used in diagnostics
    const NAME: &'static str;

    fn from_f64(value: f64) -> Self;
    fn from_f32(value: f32) -> Self;
    fn to_f64(self) -> f64;

    /// Shortest text that parses back to the same value.
    fn to_text(self) -> String {
        let magnitude = self.to_f64().abs();
        if magnitude.is_finite() && magnitude != 0.0 && !(EXP_LOWER..EXP_UPPER).contains(&magnitude) {
            format!("{:e}", self)
        } else {
            format!("{}", self)
        }
    }
}

impl Real for f64 {
    const NAME: &'static str = "f64";

    fn from_f64(value: f64) -> Self {
        value
    }

    fn from_f32(value: f32) -> Self {
        f64::from(value)
    }

    fn to_f64(self) -> f64 {
        self
    }
}

impl Real for f32 {
    const NAME: &'static str = "f32";

    fn from_f64(value: f64) -> Self {
        value as f32
    }

    fn from_f32(value: f32) -> Self {
        value
    }

    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}
