//! Human-readable output formatter.
//!
//! Formats lint diagnostics for terminal display with optional color support.

use super::LintFormatter;
use crate::lint::{Diagnostic, Severity};
use console::style;
use std::io::Write;

/// Formats lint output for human consumption.
pub struct HumanFormatter {
    /// Whether to use colors (ANSI escape codes).
    pub use_color: bool,
}

impl HumanFormatter {
    /// Create a new human formatter.
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn header(&self, diag: &Diagnostic) -> String {
        let prefix = format!("{}[{}]", diag.severity, diag.code);
        if self.use_color {
            let styled = match diag.severity {
                Severity::Warning => style(prefix).yellow().bold(),
                Severity::Error => style(prefix).red().bold(),
            };
            format!("{}: {}", styled, diag.message)
        } else {
            format!("{}: {}", prefix, diag.message)
        }
    }
}

impl LintFormatter for HumanFormatter {
    fn format<W: Write>(
        &self,
        diagnostics: &[Diagnostic],
        writer: &mut W,
    ) -> std::io::Result<()> {
        for diag in diagnostics {
            writeln!(writer, "{}", self.header(diag))?;

            match diag.line {
                Some(line) => writeln!(writer, "  --> {}:{}", diag.file.display(), line)?,
                None => writeln!(writer, "  --> {}", diag.file.display())?,
            }
        }

        let error_count = diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count();
        let warning_count = diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count();

        if error_count > 0 || warning_count > 0 {
            writeln!(
                writer,
                "Found {} error(s) and {} warning(s)",
                error_count, warning_count
            )?;
        }

        Ok(())
    }
}
