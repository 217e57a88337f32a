//! Typed column storage
//!
//! A column holds exactly one homogeneous sequence. The sequence is a closed
//! enum, so the column's kind and its payload can never disagree, and every
//! kind gets an empty sequence at construction.

use super::errors::{FrameError, FrameResult};
use super::numeric::{parse_bool, parse_int, parse_real, TextMode};
use super::real::Real;
use super::types::DataType;
use super::value::ScalarValue;

/// Width of the right-justified field every cell is printed in.
pub const FIELD_WIDTH: usize = 15;

/// Backing sequence of a column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData<R: Real = f64> {
    Int(Vec<i64>),
    Float(Vec<R>),
    String(Vec<String>),
    Bool(Vec<bool>),
}

impl<R: Real> ColumnData<R> {
    /// Creates an empty sequence for `kind`.
    pub fn empty(kind: DataType) -> FrameResult<Self> {
        match kind {
            DataType::Int => Ok(ColumnData::Int(Vec::new())),
            DataType::Float => Ok(ColumnData::Float(Vec::new())),
            DataType::String => Ok(ColumnData::String(Vec::new())),
            DataType::Bool => Ok(ColumnData::Bool(Vec::new())),
            DataType::Complex => Err(FrameError::type_mismatch(
                "complex values cannot be stored as a column",
                DataType::Float,
                DataType::Complex,
            )),
        }
    }

    pub fn kind(&self) -> DataType {
        match self {
            ColumnData::Int(_) => DataType::Int,
            ColumnData::Float(_) => DataType::Float,
            ColumnData::String(_) => DataType::String,
            ColumnData::Bool(_) => DataType::Bool,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnData::Int(v) => v.len(),
            ColumnData::Float(v) => v.len(),
            ColumnData::String(v) => v.len(),
            ColumnData::Bool(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<R: Real> From<Vec<i64>> for ColumnData<R> {
    fn from(values: Vec<i64>) -> Self {
        ColumnData::Int(values)
    }
}

impl<R: Real> From<Vec<i32>> for ColumnData<R> {
    fn from(values: Vec<i32>) -> Self {
        ColumnData::Int(values.into_iter().map(i64::from).collect())
    }
}

impl<R: Real> From<Vec<f64>> for ColumnData<R> {
    fn from(values: Vec<f64>) -> Self {
        ColumnData::Float(values.into_iter().map(R::from_f64).collect())
    }
}

impl<R: Real> From<Vec<f32>> for ColumnData<R> {
    fn from(values: Vec<f32>) -> Self {
        ColumnData::Float(values.into_iter().map(R::from_f32).collect())
    }
}

impl<R: Real> From<Vec<String>> for ColumnData<R> {
    fn from(values: Vec<String>) -> Self {
        ColumnData::String(values)
    }
}

impl<R: Real> From<Vec<&str>> for ColumnData<R> {
    fn from(values: Vec<&str>) -> Self {
        ColumnData::String(values.into_iter().map(str::to_string).collect())
    }
}

impl<R: Real> From<Vec<bool>> for ColumnData<R> {
    fn from(values: Vec<bool>) -> Self {
        ColumnData::Bool(values)
    }
}

/// A native value that can be appended to a column.
///
/// Floats of either width are accepted by float columns and converted to the
/// column's precision. No other conversion happens on write.
pub trait CellValue<R: Real> {
    /// Kind of the native value
    const KIND: DataType;

    /// Appends to `data`, or hands `self` back when the kinds disagree.
    fn append_to(self, data: &mut ColumnData<R>) -> Result<(), Self>
    where
        Self: Sized;
}

impl<R: Real> CellValue<R> for i64 {
    const KIND: DataType = DataType::Int;

    fn append_to(self, data: &mut ColumnData<R>) -> Result<(), Self> {
        match data {
            ColumnData::Int(v) => {
                v.push(self);
                Ok(())
            }
            _ => Err(self),
        }
    }
}

impl<R: Real> CellValue<R> for f64 {
    const KIND: DataType = DataType::Float;

    fn append_to(self, data: &mut ColumnData<R>) -> Result<(), Self> {
        match data {
            ColumnData::Float(v) => {
                v.push(R::from_f64(self));
                Ok(())
            }
            _ => Err(self),
        }
    }
}

impl<R: Real> CellValue<R> for f32 {
    const KIND: DataType = DataType::Float;

    fn append_to(self, data: &mut ColumnData<R>) -> Result<(), Self> {
        match data {
            ColumnData::Float(v) => {
                v.push(R::from_f32(self));
                Ok(())
            }
            _ => Err(self),
        }
    }
}

impl<R: Real> CellValue<R> for String {
    const KIND: DataType = DataType::String;

    fn append_to(self, data: &mut ColumnData<R>) -> Result<(), Self> {
        match data {
            ColumnData::String(v) => {
                v.push(self);
                Ok(())
            }
            _ => Err(self),
        }
    }
}

impl<R: Real> CellValue<R> for &str {
    const KIND: DataType = DataType::String;

    fn append_to(self, data: &mut ColumnData<R>) -> Result<(), Self> {
        match data {
            ColumnData::String(v) => {
                v.push(self.to_string());
                Ok(())
            }
            _ => Err(self),
        }
    }
}

impl<R: Real> CellValue<R> for bool {
    const KIND: DataType = DataType::Bool;

    fn append_to(self, data: &mut ColumnData<R>) -> Result<(), Self> {
        match data {
            ColumnData::Bool(v) => {
                v.push(self);
                Ok(())
            }
            _ => Err(self),
        }
    }
}

/// One named, homogeneously typed column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column<R: Real = f64> {
    name: String,
    data: ColumnData<R>,
}

impl<R: Real> Column<R> {
    /// Creates an empty column of `kind`. Complex columns do not exist.
    pub fn new(kind: DataType, name: impl Into<String>) -> FrameResult<Self> {
        Ok(Self {
            name: name.into(),
            data: ColumnData::empty(kind)?,
        })
    }

    /// Creates a column owning `values`.
    pub fn from_data(name: impl Into<String>, values: impl Into<ColumnData<R>>) -> Self {
        Self {
            name: name.into(),
            data: values.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renaming goes through the owning table so its name index stays in sync.
    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn kind(&self) -> DataType {
        self.data.kind()
    }

    pub fn data(&self) -> &ColumnData<R> {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn mismatch(&self, expected: DataType) -> FrameError {
        FrameError::type_mismatch(format!("column '{}'", self.name), expected, self.kind())
    }

    // ---- Insertion ----

    /// Appends a value whose native type matches the column's kind.
    pub fn push<V: CellValue<R>>(&mut self, value: V) -> FrameResult<()> {
        if value.append_to(&mut self.data).is_err() {
            return Err(FrameError::type_mismatch(
                format!("column '{}'", self.name),
                self.kind(),
                V::KIND,
            ));
        }
        Ok(())
    }

    pub fn push_int(&mut self, value: i64) -> FrameResult<()> {
        self.push(value)
    }

    /// Appends a 64-bit float, narrowed to the column's precision.
    pub fn push_float(&mut self, value: f64) -> FrameResult<()> {
        self.push(value)
    }

    pub fn push_float32(&mut self, value: f32) -> FrameResult<()> {
        self.push(value)
    }

    pub fn push_str(&mut self, value: &str) -> FrameResult<()> {
        self.push(value)
    }

    pub fn push_bool(&mut self, value: bool) -> FrameResult<()> {
        self.push(value)
    }

    /// Converts `token` according to the column's kind and appends it,
    /// ignoring trailing garbage in numeric tokens.
    pub fn convert_from_text(&mut self, token: &str) -> FrameResult<()> {
        self.convert_from_text_with(token, TextMode::Lenient)
    }

    /// Like [`convert_from_text`](Self::convert_from_text) with an explicit
    /// conversion mode. Nothing is appended when a strict conversion fails.
    pub fn convert_from_text_with(&mut self, token: &str, mode: TextMode) -> FrameResult<()> {
        match &mut self.data {
            ColumnData::Int(v) => v.push(parse_int(token).resolve(mode, token, DataType::Int)?),
            ColumnData::Float(v) => {
                v.push(parse_real::<R>(token).resolve(mode, token, DataType::Float)?)
            }
            ColumnData::String(v) => v.push(token.to_string()),
            ColumnData::Bool(v) => v.push(parse_bool(token).resolve(mode, token, DataType::Bool)?),
        }
        Ok(())
    }

    // ---- Extraction ----

    pub fn as_ints(&self) -> FrameResult<&[i64]> {
        match &self.data {
            ColumnData::Int(v) => Ok(v),
            _ => Err(self.mismatch(DataType::Int)),
        }
    }

    pub fn as_floats(&self) -> FrameResult<&[R]> {
        match &self.data {
            ColumnData::Float(v) => Ok(v),
            _ => Err(self.mismatch(DataType::Float)),
        }
    }

    pub fn as_strings(&self) -> FrameResult<&[String]> {
        match &self.data {
            ColumnData::String(v) => Ok(v),
            _ => Err(self.mismatch(DataType::String)),
        }
    }

    pub fn as_bools(&self) -> FrameResult<&[bool]> {
        match &self.data {
            ColumnData::Bool(v) => Ok(v),
            _ => Err(self.mismatch(DataType::Bool)),
        }
    }

    pub fn ints_mut(&mut self) -> FrameResult<&mut Vec<i64>> {
        let err = self.mismatch(DataType::Int);
        match &mut self.data {
            ColumnData::Int(v) => Ok(v),
            _ => Err(err),
        }
    }

    pub fn floats_mut(&mut self) -> FrameResult<&mut Vec<R>> {
        let err = self.mismatch(DataType::Float);
        match &mut self.data {
            ColumnData::Float(v) => Ok(v),
            _ => Err(err),
        }
    }

    pub fn strings_mut(&mut self) -> FrameResult<&mut Vec<String>> {
        let err = self.mismatch(DataType::String);
        match &mut self.data {
            ColumnData::String(v) => Ok(v),
            _ => Err(err),
        }
    }

    pub fn bools_mut(&mut self) -> FrameResult<&mut Vec<bool>> {
        let err = self.mismatch(DataType::Bool);
        match &mut self.data {
            ColumnData::Bool(v) => Ok(v),
            _ => Err(err),
        }
    }

    /// Returns element `i` as a scalar value.
    pub fn cell(&self, i: usize) -> Option<ScalarValue<R>> {
        match &self.data {
            ColumnData::Int(v) => v.get(i).map(|x| ScalarValue::Int(*x)),
            ColumnData::Float(v) => v.get(i).map(|x| ScalarValue::Float(*x)),
            ColumnData::String(v) => v.get(i).map(|x| ScalarValue::String(x.clone())),
            ColumnData::Bool(v) => v.get(i).map(|x| ScalarValue::Bool(*x)),
        }
    }

    /// Text form of element `i`, as written to a TFS file.
    pub fn text_at(&self, i: usize) -> FrameResult<String> {
        self.cell(i)
            .map(|value| value.to_string())
            .ok_or(FrameError::IndexOutOfBounds {
                index: i,
                len: self.len(),
            })
    }

    /// Appends element `i`, right-justified in a [`FIELD_WIDTH`] field, and
    /// one separating space to `line`.
    pub fn print_at(&self, i: usize, line: &mut String) -> FrameResult<()> {
        let text = self.text_at(i)?;
        line.push_str(&format!("{:>width$} ", text, width = FIELD_WIDTH));
        Ok(())
    }
}
