//! tfsframe CLI entry point
//!
//! Parses arguments and dispatches through `cli::run`. Errors have already
//! been reported as JSON on stdout; they are repeated on stderr and the
//! process exits with status 1.

use tfsframe::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
