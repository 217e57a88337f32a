//! tfsframe - typed tables for the TFS text format
//!
//! A [`Table`] holds named, homogeneously typed columns and a dictionary of
//! scalar properties. [`codec`] reads and writes the whitespace-separated
//! TFS format used by accelerator optics codes.

pub mod cli;
pub mod codec;
pub mod config;
pub mod frame;
pub mod observability;

pub use codec::{load, parse, save, serialize, CodecError, CodecResult, ParseOptions};
pub use config::{ConfigError, TfsConfig};
pub use frame::{
    Column, ColumnData, DataType, FrameError, FrameResult, Real, ScalarValue, Table, TextMode,
};
