//! Parser Behavior Tests
//!
//! Tests for how the reader treats real-world and damaged input:
//! - Numeric tokens convert leniently unless strict numbers are requested
//! - Structural damage fails fast with the offending line number
//! - Rows with the wrong value count are tolerated or rejected per options
//! - The optional row index is built from a String column

use tfsframe::codec::{self, CodecError, ParseOptions, TfsReader};
use tfsframe::{Column, DataType, Table, TextMode, TfsConfig};

// =============================================================================
// Helper Functions
// =============================================================================

const TWISS_HEADER: &str = "\
@ NAME             %s TWISS
@ TYPE             %s TWISS
@ PARTICLE         %s PROTON
@ ENERGY           %le 6500
@ Q1               %le 62.31
@ Q2               %le 60.32
@ LENGTH           %le 26658.8832
@ NUMBER           %d 1232
";

fn twiss(rows: &str) -> String {
    format!(
        "{}*            NAME               S            BETX         K1L\n\
         $              %s             %le             %le         %le\n{}",
        TWISS_HEADER, rows
    )
}

fn parse(text: &str) -> Result<Table, CodecError> {
    codec::parse(text.as_bytes(), None)
}

fn parse_with(text: &str, options: ParseOptions) -> Result<Table, CodecError> {
    codec::parse_str(text, options)
}

// =============================================================================
// Realistic Input
// =============================================================================

/// A file in the layout optics codes produce reads completely.
#[test]
fn test_reads_twiss_layout() {
    let text = twiss(
        "  \"IP1\"   0.0 0.55 0\n\
           MQXA.1R1  26.15 1047.3 -0.0083\n\
           MQXB.A2R1 33.2 2155.1 0.0062\n",
    );
    let table = parse(&text).unwrap();

    assert_eq!(table.property_count(), 8);
    assert_eq!(table.get_property("NUMBER").unwrap().as_int().unwrap(), 1232);
    assert_eq!(table.get_property("ENERGY").unwrap().as_float().unwrap(), 6500.0);
    assert_eq!(table.row_count(), 3);
    assert_eq!(
        table.get_column("K1L").unwrap().as_floats().unwrap(),
        &[0.0, -0.0083, 0.0062]
    );
    assert_eq!(
        table.get_column("NAME").unwrap().as_strings().unwrap()[0],
        "\"IP1\""
    );
}

/// Rows can be looked up by name once an index column is given.
#[test]
fn test_index_by_name() {
    let text = twiss("  IP1 0 1 0\n  MQ 1 2 3\n  IP5 2 3 4\n");
    let table: Table = codec::parse(text.as_bytes(), Some("NAME")).unwrap();

    let row = table.row_of("IP5").unwrap();
    let betx = table.get_column("BETX").unwrap().as_floats().unwrap();
    assert_eq!(betx[row], 3.0);
    assert_eq!(table.row_index().len(), 3);
}

/// An empty index name means no index.
#[test]
fn test_empty_index_name_is_ignored() {
    let text = twiss("  IP1 0 1 0\n");
    let table: Table = codec::parse(text.as_bytes(), Some("")).unwrap();
    assert!(table.row_index().is_empty());
}

// =============================================================================
// Lenient Numbers
// =============================================================================

/// "12abc" reads as 12 in an Int column.
#[test]
fn test_trailing_garbage_is_ignored() {
    let mut column = Column::<f64>::new(DataType::Int, "N").unwrap();
    column.convert_from_text("12abc").unwrap();
    assert_eq!(column.as_ints().unwrap(), &[12]);

    let table = parse("* N X\n$ %d %le\n 12abc 3.5e2xyz\n").unwrap();
    assert_eq!(table.get_column("N").unwrap().as_ints().unwrap(), &[12]);
    assert_eq!(table.get_column("X").unwrap().as_floats().unwrap(), &[350.0]);
}

/// Tokens with no numeric prefix read as zero.
#[test]
fn test_non_numeric_token_reads_as_zero() {
    let table = parse("* N X\n$ %d %le\n abc nope\n").unwrap();
    assert_eq!(table.get_column("N").unwrap().as_ints().unwrap(), &[0]);
    assert_eq!(table.get_column("X").unwrap().as_floats().unwrap(), &[0.0]);
}

/// Strict numbers reject the same tokens with the line number.
#[test]
fn test_strict_numbers_reject_trailing_garbage() {
    let options = ParseOptions::new().with_numbers(TextMode::Strict);
    let err = parse_with("* N\n$ %d\n 1\n 12abc\n", options).unwrap_err();
    assert_eq!(err.code(), "TFS_MALFORMED_LINE");
    assert_eq!(err.line(), Some(4));
}

// =============================================================================
// Structural Damage
// =============================================================================

/// Header and type lines with different counts fail instead of looping.
#[test]
fn test_count_mismatch_fails_fast() {
    let err = parse("* A B C\n$ %d %d\n 1 2\n").unwrap_err();
    assert!(err.is_malformed());
    assert_eq!(err.line(), Some(2));
}

/// Input that never declares its columns is malformed.
#[test]
fn test_missing_schema_fails() {
    let err = parse(TWISS_HEADER).unwrap_err();
    assert!(err.is_malformed());
    assert!(parse("").unwrap_err().is_malformed());
}

#[test]
fn test_repeated_schema_lines_fail() {
    assert!(parse("* A\n* A\n$ %d\n").unwrap_err().is_malformed());
    assert!(parse("$ %d\n* A\n$ %d\n 1\n").is_ok());
}

/// A second `$` line after the schema is complete is just a data row.
#[test]
fn test_marker_lines_after_schema_are_data() {
    let table = parse("* A\n$ %s\n$\n@\n").unwrap();
    assert_eq!(
        table.get_column("A").unwrap().as_strings().unwrap(),
        &["$".to_string(), "@".to_string()]
    );
}

/// Comment-like lines before the header are skipped unless strict.
#[test]
fn test_unknown_preamble_lines() {
    let text = "# generated\n* A\n$ %d\n 1\n";
    assert_eq!(parse(text).unwrap().row_count(), 1);

    let options = ParseOptions {
        strict_structure: true,
        ..ParseOptions::default()
    };
    assert_eq!(parse_with(text, options).unwrap_err().line(), Some(1));
}

// =============================================================================
// Ragged Rows
// =============================================================================

/// Short rows fill the leading columns and leave the table inconsistent.
#[test]
fn test_short_rows_are_tolerated() {
    let table = parse("* A B\n$ %d %s\n 1 x\n 2\n").unwrap();
    assert_eq!(table.get_column("A").unwrap().len(), 2);
    assert_eq!(table.get_column("B").unwrap().len(), 1);
    assert!(!table.verify().consistent);

    let err = codec::to_string(&table).unwrap_err();
    assert_eq!(err.code(), "TFS_RAGGED_TABLE");
}

#[test]
fn test_strict_rows_reject_wrong_counts() {
    let options = ParseOptions {
        strict_rows: true,
        ..ParseOptions::default()
    };
    let err = parse_with("* A B\n$ %d %s\n 1 x y\n", options).unwrap_err();
    assert_eq!(err.line(), Some(3));
}

// =============================================================================
// Configuration
// =============================================================================

/// A config file's options drive the reader.
#[test]
fn test_config_drives_reader() {
    let config =
        TfsConfig::from_json(r#"{"strict_numbers": true, "index_column": "NAME"}"#).unwrap();

    let table: Table = TfsReader::new(config.parse_options())
        .read("* NAME N\n$ %s %d\n a 1\n b 2\n".as_bytes())
        .unwrap();
    assert_eq!(table.row_of("b").unwrap(), 1);

    let err = TfsReader::<f64>::new(config.parse_options())
        .read("* NAME N\n$ %s %d\n a 1x\n".as_bytes())
        .unwrap_err();
    assert!(err.is_malformed());
}
