//! CLI module for tfsframe
//!
//! Provides command-line access to:
//! - inspect: Table summary
//! - verify: Column length report
//! - rewrite: Parse and re-serialize a file
//! - column / property: Single value lookups

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{
    column, execute, inspect, load_config, property, rewrite, run_command, summarize, verify,
    PropertySummary, TableSummary,
};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_error_to, write_response, write_response_to};

/// Parse the process arguments and run the selected command
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args())
}
