//! The lint driver.
//!
//! Everything outside the scanner itself lives here: iterating input
//! files, deriving the per-file include context, collecting reports, and
//! mapping the outcome to an exit code.
//!
//! Exit status convention: ordinary syntax diagnostics are advisory and
//! keep the exit code at zero (unless `--strict`); fatal conditions
//! (carriage-return aborts, base-directory resolution failures,
//! internal-invariant findings) set it to 1; unreadable input files set
//! it to 2.

use std::fs;
use std::io::Write;

use clap::CommandFactory;

use crate::cli::args::Cli;
use crate::error::{KvlintError, Result};
use crate::lint::{
    Diagnostic, HumanFormatter, IncludeChecker, JsonFormatter, LintFormatter, OutputFormat,
    SarifFormatter, Scanner,
};

/// Result of a driver run.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the run succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Lints every input file in order and reports the aggregate outcome.
pub struct LintDriver {
    args: Cli,
}

impl LintDriver {
    /// Create a driver from parsed arguments.
    pub fn new(args: Cli) -> Self {
        Self { args }
    }

    /// Run the lint over all input files, writing formatted diagnostics
    /// to `out` and operational errors to `err`.
    pub fn execute<W: Write, E: Write>(&self, out: &mut W, err: &mut E) -> Result<CommandResult> {
        if let Some(shell) = self.args.completions {
            clap_complete::generate(shell, &mut Cli::command(), "kvlint", out);
            return Ok(CommandResult::success());
        }

        let options = self.args.lint_options();
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let mut fatal = false;
        let mut unreadable_input = false;

        for file in &self.args.files {
            let bytes = match fs::read(file) {
                Ok(bytes) => bytes,
                Err(source) => {
                    let e = KvlintError::UnreadableInput {
                        path: file.clone(),
                        source,
                    };
                    tracing::warn!("{e}");
                    writeln!(err, "kvlint: {e}")?;
                    unreadable_input = true;
                    continue;
                }
            };

            // Derive the per-file include context once; a resolution
            // failure disables directive checking for this file only.
            let includes = if options.validate_directives {
                match IncludeChecker::for_target(file) {
                    Ok(checker) => {
                        tracing::debug!(
                            base_dir = %checker.base_dir().display(),
                            "include checking enabled"
                        );
                        Some(checker)
                    }
                    Err(e) => {
                        tracing::warn!("{e}");
                        writeln!(err, "kvlint: {e}")?;
                        fatal = true;
                        None
                    }
                }
            } else {
                None
            };

            let mut scanner = Scanner::new(file, options.clone(), includes);
            scanner.scan_bytes(&bytes);
            let report = scanner.finish();

            tracing::debug!(
                file = %file.display(),
                diagnostics = report.diagnostics.len(),
                aborted = report.aborted,
                "scan complete"
            );

            fatal |= report.has_fatal_condition();
            diagnostics.extend(report.diagnostics);
        }

        self.format_output(&diagnostics, out)?;

        if unreadable_input {
            Ok(CommandResult::failure(2))
        } else if fatal || (self.args.strict && !diagnostics.is_empty()) {
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }

    fn format_output<W: Write>(&self, diagnostics: &[Diagnostic], out: &mut W) -> Result<()> {
        match self.args.format {
            OutputFormat::Human => {
                let use_color = !self.args.no_color && console::colors_enabled();
                HumanFormatter::new(use_color).format(diagnostics, out)?;
            }
            OutputFormat::Json => {
                JsonFormatter::new().format(diagnostics, out)?;
                writeln!(out)?;
            }
            OutputFormat::Sarif => {
                SarifFormatter::new("kvlint", env!("CARGO_PKG_VERSION"))
                    .format(diagnostics, out)?;
                writeln!(out)?;
            }
        }
        Ok(())
    }
}
