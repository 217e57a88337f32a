//! CLI argument definitions using clap
//!
//! Commands:
//! - tfsframe inspect <path> [--index <column>]
//! - tfsframe verify <path>
//! - tfsframe rewrite <input> <output>
//! - tfsframe column <path> <name>
//! - tfsframe property <path> <key>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// tfsframe - read, check and rewrite TFS tables
#[derive(Parser, Debug)]
#[command(name = "tfsframe")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Summarize a table: columns, row count and properties
    Inspect {
        path: PathBuf,

        /// String column to index rows by, overriding the config
        #[arg(long)]
        index: Option<String>,
    },

    /// Report every column's length and whether they agree
    Verify { path: PathBuf },

    /// Parse a table and write it back out
    Rewrite { input: PathBuf, output: PathBuf },

    /// Print the values of one column
    Column { path: PathBuf, name: String },

    /// Print one property
    Property { path: PathBuf, key: String },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_inspect_with_index() {
        let cli = Cli::try_parse_from(["tfsframe", "inspect", "twiss.tfs", "--index", "NAME"])
            .unwrap();
        match cli.command {
            Command::Inspect { path, index } => {
                assert_eq!(path, PathBuf::from("twiss.tfs"));
                assert_eq!(index.as_deref(), Some("NAME"));
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli =
            Cli::try_parse_from(["tfsframe", "verify", "a.tfs", "--config", "tfs.json"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("tfs.json")));
    }

    #[test]
    fn test_rewrite_needs_two_paths() {
        assert!(Cli::try_parse_from(["tfsframe", "rewrite", "a.tfs"]).is_err());
    }
}
