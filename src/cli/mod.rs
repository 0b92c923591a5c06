//! Command-line interface.
//!
//! Argument parsing lives in [`args`], and [`driver`] turns parsed
//! arguments into scans, formatted output, and an exit code.

pub mod args;
pub mod driver;

pub use args::Cli;
pub use driver::{CommandResult, LintDriver};
