//! Lint diagnostics.
//!
//! This module provides the [`Diagnostic`] type for reporting issues found
//! while scanning a KeyValues file, plus the [`DiagCode`] taxonomy and
//! [`Severity`] levels. Diagnostics are append-only: the scanner emits them
//! in byte-scan order and never mutates one after creation.

use std::path::PathBuf;

/// Stable identifier for a class of diagnostic.
///
/// Codes are what machine consumers (JSON/SARIF output, tests) key on;
/// the human-readable message may carry extra context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagCode {
    // Structural
    UnexpectedOpenBrace,
    UnexpectedCloseBrace,
    UnclosedKey,
    TrailingKeyString,
    DataAfterRoot,
    // Lexical
    SingleQuote,
    UnexpectedCharacter,
    MalformedSubkey,
    MissingSpace,
    UnescapedTab,
    UnterminatedString,
    StringTooLong,
    BraceInString,
    QuoteInString,
    BackslashInString,
    BadEscape,
    BracePlacement,
    // Comments and conditionals
    BogusComment,
    ConditionalPlacement,
    BlockComment,
    UnterminatedConditional,
    DuplicateConditional,
    AfterConditional,
    // Directives
    IncludePathTooLong,
    UnreadableInclude,
    // Fatal
    CarriageReturn,
    // Internal
    InternalState,
}

impl DiagCode {
    /// The kebab-case name used in output formats.
    pub fn as_str(self) -> &'static str {
        match self {
            DiagCode::UnexpectedOpenBrace => "unexpected-open-brace",
            DiagCode::UnexpectedCloseBrace => "unexpected-close-brace",
            DiagCode::UnclosedKey => "unclosed-key",
            DiagCode::TrailingKeyString => "trailing-key-string",
            DiagCode::DataAfterRoot => "data-after-root",
            DiagCode::SingleQuote => "single-quote",
            DiagCode::UnexpectedCharacter => "unexpected-character",
            DiagCode::MalformedSubkey => "malformed-subkey",
            DiagCode::MissingSpace => "missing-space",
            DiagCode::UnescapedTab => "unescaped-tab",
            DiagCode::UnterminatedString => "unterminated-string",
            DiagCode::StringTooLong => "string-too-long",
            DiagCode::BraceInString => "brace-in-string",
            DiagCode::QuoteInString => "quote-in-string",
            DiagCode::BackslashInString => "backslash-in-string",
            DiagCode::BadEscape => "bad-escape",
            DiagCode::BracePlacement => "brace-placement",
            DiagCode::BogusComment => "bogus-comment",
            DiagCode::ConditionalPlacement => "conditional-placement",
            DiagCode::BlockComment => "block-comment",
            DiagCode::UnterminatedConditional => "unterminated-conditional",
            DiagCode::DuplicateConditional => "duplicate-conditional",
            DiagCode::AfterConditional => "after-conditional",
            DiagCode::IncludePathTooLong => "include-path-too-long",
            DiagCode::UnreadableInclude => "unreadable-include",
            DiagCode::CarriageReturn => "carriage-return",
            DiagCode::InternalState => "internal-state",
        }
    }
}

impl std::fmt::Display for DiagCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity level for lint diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Accepted by the engine but likely to misbehave at runtime.
    Warning,
    /// A syntactic deviation.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A diagnostic message produced by the scanner.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// The diagnostic class.
    pub code: DiagCode,
    /// Severity of this diagnostic.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// File the diagnostic refers to.
    pub file: PathBuf,
    /// Line the offending byte is on (1-indexed). `None` for end-of-stream
    /// findings that have no single line, such as an unclosed key.
    pub line: Option<usize>,
}

impl Diagnostic {
    /// Create a new diagnostic with no line attribution.
    pub fn new(
        file: impl Into<PathBuf>,
        code: DiagCode,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code,
            severity,
            message: message.into(),
            file: file.into(),
            line: None,
        }
    }

    /// Attach a line number.
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_creation() {
        let diag = Diagnostic::new(
            "input.kv",
            DiagCode::UnexpectedOpenBrace,
            Severity::Error,
            "unexpected open brace",
        );

        assert_eq!(diag.code, DiagCode::UnexpectedOpenBrace);
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.message, "unexpected open brace");
        assert!(diag.line.is_none());
    }

    #[test]
    fn diagnostic_with_line() {
        let diag = Diagnostic::new(
            "input.kv",
            DiagCode::MissingSpace,
            Severity::Error,
            "missing space between key and value strings",
        )
        .with_line(7);

        assert_eq!(diag.line, Some(7));
        assert_eq!(diag.file, PathBuf::from("input.kv"));
    }

    #[test]
    fn code_display_is_kebab_case() {
        assert_eq!(
            DiagCode::UnexpectedCloseBrace.to_string(),
            "unexpected-close-brace"
        );
        assert_eq!(DiagCode::BadEscape.to_string(), "bad-escape");
        assert_eq!(DiagCode::InternalState.to_string(), "internal-state");
    }

    #[test]
    fn severity_ordering_and_display() {
        assert!(Severity::Warning < Severity::Error);
        assert_eq!(Severity::Warning.to_string(), "warning");
        assert_eq!(Severity::Error.to_string(), "error");
    }
}
