//! TFS text codec
//!
//! Converts between [`Table`] and the TFS text format: `@` property lines,
//! one `*` column name line, one `$` column type line and whitespace
//! separated data rows.
//!
//! ```ignore
//! use tfsframe::codec;
//!
//! let table: tfsframe::Table = codec::parse(text.as_bytes(), Some("NAME"))?;
//! codec::save(&table, Path::new("out.tfs"))?;
//! ```

mod errors;
mod options;
mod reader;
mod writer;

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::frame::{Real, Table};

pub use errors::{CodecError, CodecResult};
pub use options::ParseOptions;
pub use reader::{ParsePhase, TfsReader};
pub use writer::{render_header, render_property, render_row, render_types, TfsWriter};

/// Parses a TFS stream with default tolerances, optionally indexing rows
/// by the String column `index_column`. An empty name means no index.
pub fn parse<R: Real, B: BufRead>(source: B, index_column: Option<&str>) -> CodecResult<Table<R>> {
    let mut options = ParseOptions::default();
    options.index_column = index_column.map(str::to_string);
    TfsReader::new(options).read(source)
}

/// Parses a TFS stream with explicit options.
pub fn parse_with<R: Real, B: BufRead>(source: B, options: ParseOptions) -> CodecResult<Table<R>> {
    TfsReader::new(options).read(source)
}

pub fn parse_str<R: Real>(text: &str, options: ParseOptions) -> CodecResult<Table<R>> {
    parse_with(text.as_bytes(), options)
}

/// Writes `table` to `sink` in TFS format.
pub fn serialize<R: Real, W: Write>(table: &Table<R>, sink: W) -> CodecResult<()> {
    TfsWriter::new(sink).write_table(table)
}

pub fn to_string<R: Real>(table: &Table<R>) -> CodecResult<String> {
    let mut buffer = Vec::new();
    serialize(table, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| {
        CodecError::io(
            "encoding TFS output",
            io::Error::new(io::ErrorKind::InvalidData, e),
        )
    })
}

/// Reads the TFS file at `path`.
pub fn load<R: Real>(path: &Path, options: ParseOptions) -> CodecResult<Table<R>> {
    let file = File::open(path)
        .map_err(|e| CodecError::io(format!("opening {}", path.display()), e))?;
    parse_with(BufReader::new(file), options)
}

/// Writes `table` to `path`, replacing any existing file.
pub fn save<R: Real>(table: &Table<R>, path: &Path) -> CodecResult<()> {
    let file = File::create(path)
        .map_err(|e| CodecError::io(format!("creating {}", path.display()), e))?;
    serialize(table, BufWriter::new(file))
}
