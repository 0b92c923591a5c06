//! The KeyValues scanner.
//!
//! A single-pass, character-level finite-state machine that recognizes the
//! lexical structure of a KeyValues file (keys, values, quoting, nesting,
//! comments, conditionals, escape sequences, and the `#base` include
//! directive) and reports every deviation as a [`Diagnostic`]. No document
//! tree is built; the artifact is the diagnostic log.
//!
//! One [`Scanner`] scans one file. Feed it bytes in stream order with
//! [`Scanner::process`] (or [`Scanner::scan_bytes`]) and collect the
//! results with [`Scanner::finish`]. No state crosses file boundaries;
//! a multi-file run creates a fresh scanner per file.

use std::path::PathBuf;

use super::diagnostic::{DiagCode, Diagnostic, Severity};
use super::includes::{IncludeChecker, IncludeStatus};
use super::options::LintOptions;
use super::state::LexState;

/// Longest key or value token buffered for directive and include matching.
/// Longer tokens are truncated and flagged once at the overflow boundary.
pub const MAX_TOKEN_LEN: usize = 1024;

/// Everything known about one file after its scan completed.
#[derive(Debug)]
pub struct ScanReport {
    /// Diagnostics in byte-scan order.
    pub diagnostics: Vec<Diagnostic>,
    /// One or more blocks were still open at end of stream.
    pub unclosed_key: bool,
    /// The stream ended on a bare key with no following block.
    pub trailing_key_string: bool,
    /// The scan stopped early on a malformed carriage-return sequence.
    pub aborted: bool,
    /// Number of internal-invariant diagnostics emitted.
    pub internal_errors: usize,
}

impl ScanReport {
    /// Whether this scan hit a condition that must flip the exit status
    /// (ordinary syntax diagnostics are advisory).
    pub fn has_fatal_condition(&self) -> bool {
        self.aborted || self.internal_errors > 0
    }
}

/// Per-file scanning session.
///
/// The transition logic mirrors the engine's reader: which state consumes
/// which byte is the entire specification, so the dispatch below is written
/// state by state rather than factored into anything cleverer.
pub struct Scanner {
    file: PathBuf,
    options: LintOptions,
    /// `None` when directive validation is off or base-dir resolution
    /// failed; either way `#base` checking is disabled for this file.
    includes: Option<IncludeChecker>,

    state: LexState,
    resume: LexState,
    brace_depth: i32,
    line: usize,
    quoted: bool,
    pending_space: bool,
    token: Vec<u8>,
    overflowed: bool,
    is_directive: bool,
    directive_name: Vec<u8>,
    directive_pair: bool,
    pending_include: bool,
    last_escape_error_line: Option<usize>,
    root_end_reported: bool,
    expect_line_feed: bool,
    aborted: bool,
    internal_errors: usize,
    diagnostics: Vec<Diagnostic>,
}

impl Scanner {
    /// Create a scanner for one file.
    ///
    /// Pass an [`IncludeChecker`] to enable `#base` validation; `None`
    /// leaves directive checking off for this file.
    pub fn new(file: impl Into<PathBuf>, options: LintOptions, includes: Option<IncludeChecker>) -> Self {
        Self {
            file: file.into(),
            options,
            includes,
            state: LexState::Key,
            resume: LexState::Key,
            brace_depth: 0,
            line: 1,
            quoted: false,
            pending_space: false,
            token: Vec::new(),
            overflowed: false,
            is_directive: false,
            directive_name: Vec::new(),
            directive_pair: false,
            pending_include: false,
            last_escape_error_line: None,
            root_end_reported: false,
            expect_line_feed: false,
            aborted: false,
            internal_errors: 0,
            diagnostics: Vec::new(),
        }
    }

    /// Feed a whole buffer, honoring an abort mid-stream.
    pub fn scan_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            if self.aborted {
                break;
            }
            self.process(byte);
        }
    }

    /// Process one input byte.
    ///
    /// A carriage return must be followed by exactly one line feed; anything
    /// else is fatal for this file's scan. Every line feed increments the
    /// line counter before dispatch, so diagnostics raised *for* the line
    /// feed itself are attributed to the following line.
    pub fn process(&mut self, byte: u8) {
        if self.aborted {
            return;
        }
        if self.expect_line_feed {
            self.expect_line_feed = false;
            if byte != b'\n' {
                self.fatal_carriage_return();
                return;
            }
        }
        if byte == b'\r' {
            self.expect_line_feed = true;
            return;
        }
        if byte == b'\n' {
            self.line += 1;
        }
        match self.state {
            LexState::Key => self.step_key(byte),
            LexState::Subkey => self.step_subkey(byte),
            LexState::KeyString => self.step_key_string(byte),
            LexState::KeyStringEnd => self.step_key_string_end(byte),
            LexState::ValueString => self.step_value_string(byte),
            LexState::ValueStringEnd => self.step_value_string_end(byte),
            LexState::StringEscape => self.step_string_escape(byte),
            LexState::Slash => self.step_slash(byte),
            LexState::LineComment => self.step_line_comment(byte),
            LexState::BlockComment => self.step_block_comment(byte),
            LexState::BlockAsterisk => self.step_block_asterisk(byte),
            LexState::Conditional => self.step_conditional(byte),
            LexState::ConditionalEnd => self.step_conditional_end(byte),
            LexState::EndOfRoot => self.step_end_of_root(byte),
        }
    }

    /// Report end-of-stream findings and consume the session.
    pub fn finish(mut self) -> ScanReport {
        if self.expect_line_feed && !self.aborted {
            self.fatal_carriage_return();
        }
        let mut unclosed_key = false;
        let mut trailing_key_string = false;
        if !self.aborted {
            if self.brace_depth > 0 {
                unclosed_key = true;
                self.emit(DiagCode::UnclosedKey, Severity::Error, "unclosed key", None);
            }
            if self.state == LexState::Subkey {
                trailing_key_string = true;
                self.emit(
                    DiagCode::TrailingKeyString,
                    Severity::Error,
                    "trailing key string (key with no following block)",
                    Some(self.line),
                );
            }
        }
        ScanReport {
            diagnostics: self.diagnostics,
            unclosed_key,
            trailing_key_string,
            aborted: self.aborted,
            internal_errors: self.internal_errors,
        }
    }

    // ----- diagnostic emission -----

    fn emit(&mut self, code: DiagCode, severity: Severity, message: impl Into<String>, line: Option<usize>) {
        let mut diag = Diagnostic::new(self.file.clone(), code, severity, message);
        if let Some(line) = line {
            diag = diag.with_line(line);
        }
        self.diagnostics.push(diag);
    }

    fn error(&mut self, code: DiagCode, message: impl Into<String>) {
        self.emit(code, Severity::Error, message, Some(self.line));
    }

    fn warn(&mut self, code: DiagCode, message: impl Into<String>) {
        self.emit(code, Severity::Warning, message, Some(self.line));
    }

    fn internal(&mut self, message: impl Into<String>) {
        self.internal_errors += 1;
        self.emit(DiagCode::InternalState, Severity::Error, message, Some(self.line));
    }

    fn fatal_carriage_return(&mut self) {
        self.error(
            DiagCode::CarriageReturn,
            "unexpected carriage return (not followed by a line feed)",
        );
        self.aborted = true;
    }

    // ----- token buffering -----

    fn directive_checking(&self) -> bool {
        self.options.validate_directives && self.includes.is_some()
    }

    fn begin_key_string(&mut self, quoted: bool) {
        self.token.clear();
        self.overflowed = false;
        self.quoted = quoted;
        self.is_directive = false;
        self.directive_pair = false;
        self.directive_name.clear();
        self.state = LexState::KeyString;
    }

    fn begin_value_string(&mut self, quoted: bool) {
        self.token.clear();
        self.overflowed = false;
        self.quoted = quoted;
        self.state = LexState::ValueString;
    }

    fn buffer_byte(&mut self, byte: u8, code: DiagCode, overflow_message: &str) {
        if self.token.len() < MAX_TOKEN_LEN {
            self.token.push(byte);
        } else if !self.overflowed {
            self.overflowed = true;
            let message = overflow_message.to_string();
            self.error(code, message);
        }
    }

    fn push_key_byte(&mut self, byte: u8) {
        if self.token.is_empty() && byte == b'#' && self.directive_checking() {
            self.is_directive = true;
        } else if self.is_directive && self.directive_name.len() < MAX_TOKEN_LEN {
            self.directive_name.push(byte);
        }
        self.buffer_byte(byte, DiagCode::StringTooLong, "key string size limit exceeded");
    }

    fn push_value_byte(&mut self, byte: u8) {
        self.buffer_byte(byte, DiagCode::StringTooLong, "value string size limit exceeded");
    }

    /// Normal end of a key token. Any `#`-prefixed key starts a directive
    /// pair (directives precede the root key, so their values do not close
    /// the root); a directive named `base` additionally arms the include
    /// check for the next value string.
    fn end_key_string(&mut self) {
        self.directive_pair = self.token.first() == Some(&b'#');
        if self.is_directive && self.directive_name == b"base" {
            self.pending_include = true;
        }
        self.is_directive = false;
    }

    /// Normal end of a value token; runs the armed include check, if any.
    fn end_value_string(&mut self) {
        if !self.pending_include {
            return;
        }
        self.pending_include = false;
        let Some(checker) = &self.includes else {
            return;
        };
        let relative = String::from_utf8_lossy(&self.token).into_owned();
        match checker.check(&relative) {
            IncludeStatus::Ok => {}
            IncludeStatus::PathTooLong => {
                self.error(DiagCode::IncludePathTooLong, "included file path too long");
            }
            IncludeStatus::Unreadable => {
                self.error(
                    DiagCode::UnreadableInclude,
                    format!("unreadable included file \"{relative}\""),
                );
            }
        }
    }

    /// A value string broken by an error; the buffered text is not a
    /// complete path, so any armed include check is discarded unprobed.
    fn abandon_value_string(&mut self) {
        self.pending_include = false;
        self.token.clear();
    }

    // ----- resume handling -----

    /// Where scanning continues after a completed value: back to `Key`,
    /// unless the root key just finished and multiple roots are disallowed.
    /// Directive pairs never close the root.
    fn state_after_value(&self) -> LexState {
        if self.directive_pair {
            LexState::Key
        } else if self.brace_depth == 0 && !self.options.allow_multiple_root_keys {
            LexState::EndOfRoot
        } else {
            LexState::Key
        }
    }

    /// Resume from a line comment or conditional at end of line.
    fn resume_at_line_end(&mut self) {
        if !self.resume.resumable_at_line_end() {
            let resume = self.resume;
            self.internal(format!(
                "internal state error: cannot resume from {resume:?} at end of line"
            ));
            self.state = LexState::Key;
            return;
        }
        self.state = match self.resume {
            LexState::ValueStringEnd => self.state_after_value(),
            LexState::Subkey | LexState::KeyStringEnd => LexState::Subkey,
            other => other,
        };
    }

    // ----- per-state dispatch -----

    fn step_key(&mut self, byte: u8) {
        match byte {
            b'\n' | b'\t' | b' ' => {}
            b'}' => {
                self.brace_depth -= 1;
                if self.brace_depth < 0 {
                    let message = if self.options.require_quotes {
                        "unexpected close brace"
                    } else {
                        "unexpected close brace (you cannot use braces in unquoted strings)"
                    };
                    self.error(DiagCode::UnexpectedCloseBrace, message);
                    self.brace_depth = 0;
                } else if self.brace_depth == 0 && !self.options.allow_multiple_root_keys {
                    self.state = LexState::EndOfRoot;
                }
            }
            b'{' => {
                self.error(
                    DiagCode::UnexpectedOpenBrace,
                    "unexpected open brace (maybe you forgot to name a key)",
                );
                self.brace_depth += 1;
            }
            b'\'' => {
                self.error(
                    DiagCode::SingleQuote,
                    "unexpected single quote (use double quotes instead)",
                );
            }
            b'"' => self.begin_key_string(true),
            b'/' => {
                self.resume = LexState::Key;
                self.state = LexState::Slash;
            }
            b'[' => {
                self.error(
                    DiagCode::ConditionalPlacement,
                    "conditionals must be on the same line as the key they apply to",
                );
            }
            _ => {
                if self.options.require_quotes {
                    self.error(
                        DiagCode::UnexpectedCharacter,
                        "unexpected character (maybe you forgot to quote a string)",
                    );
                } else {
                    self.begin_key_string(false);
                    self.push_key_byte(byte);
                }
            }
        }
    }

    fn step_subkey(&mut self, byte: u8) {
        match byte {
            b'\n' | b'\t' | b' ' => {}
            b'{' => {
                self.brace_depth += 1;
                self.state = LexState::Key;
            }
            b'/' => {
                self.resume = LexState::Subkey;
                self.state = LexState::Slash;
            }
            b'[' => {
                self.error(
                    DiagCode::ConditionalPlacement,
                    "conditionals must be on the same line as the key they apply to",
                );
            }
            _ => {
                self.error(
                    DiagCode::MalformedSubkey,
                    "unexpected character (probably malformed or missing subkey)",
                );
            }
        }
    }

    fn step_key_string(&mut self, byte: u8) {
        match byte {
            b'\t' => {
                if self.quoted {
                    if self.options.parse_escapes {
                        self.error(DiagCode::UnescapedTab, "unescaped tab in key string");
                    }
                    self.push_key_byte(byte);
                } else {
                    self.end_key_string();
                    self.pending_space = true;
                    self.state = LexState::KeyStringEnd;
                }
            }
            b' ' => {
                if self.quoted {
                    self.push_key_byte(byte);
                } else {
                    self.end_key_string();
                    self.pending_space = true;
                    self.state = LexState::KeyStringEnd;
                }
            }
            b'\n' => {
                if self.quoted {
                    if self.options.allow_multiline {
                        self.push_key_byte(byte);
                    } else {
                        self.error(DiagCode::UnterminatedString, "unterminated key string");
                        // Broken token: no directive promotion.
                        self.is_directive = false;
                        self.state = LexState::Subkey;
                    }
                } else {
                    self.end_key_string();
                    self.state = LexState::Subkey;
                }
            }
            b'\\' if self.options.parse_escapes => {
                if self.quoted {
                    self.push_key_byte(byte);
                    self.resume = LexState::KeyString;
                    self.state = LexState::StringEscape;
                } else {
                    self.error(
                        DiagCode::BackslashInString,
                        "backslash in unquoted key string (should you be parsing escape sequences?)",
                    );
                }
            }
            b'"' => {
                if self.quoted {
                    self.end_key_string();
                    self.pending_space = false;
                    self.state = LexState::KeyStringEnd;
                } else {
                    self.error(DiagCode::QuoteInString, "double-quote in unquoted key string");
                }
            }
            b'{' | b'}' if !self.quoted => {
                self.error(
                    DiagCode::BraceInString,
                    "unexpected brace in key string (you cannot use braces in unquoted strings)",
                );
            }
            _ => self.push_key_byte(byte),
        }
    }

    fn step_key_string_end(&mut self, byte: u8) {
        match byte {
            b'\n' => self.state = LexState::Subkey,
            b'\t' | b' ' => self.pending_space = true,
            b'"' => {
                if !self.pending_space {
                    self.error(
                        DiagCode::MissingSpace,
                        "missing space between key and value strings",
                    );
                }
                self.begin_value_string(true);
            }
            b'/' => {
                self.resume = LexState::KeyStringEnd;
                self.state = LexState::Slash;
            }
            b'[' => {
                self.resume = LexState::KeyStringEnd;
                self.state = LexState::Conditional;
            }
            b'{' => {
                self.warn(
                    DiagCode::BracePlacement,
                    "braces should be on their own line, or quoted if they are part of a string",
                );
                self.brace_depth += 1;
                self.state = LexState::Key;
            }
            b'}' => {
                self.error(
                    DiagCode::UnexpectedCloseBrace,
                    "unexpected close brace (possibly unquoted value string)",
                );
            }
            _ => {
                if self.options.require_quotes {
                    self.error(
                        DiagCode::UnexpectedCharacter,
                        "unexpected character after key string (possibly unquoted value string)",
                    );
                } else {
                    self.begin_value_string(false);
                    self.push_value_byte(byte);
                }
            }
        }
    }

    fn step_value_string(&mut self, byte: u8) {
        match byte {
            b'\t' => {
                if self.quoted {
                    if self.options.parse_escapes && !self.options.allow_multiline {
                        self.error(DiagCode::UnescapedTab, "unescaped tab in value string");
                    }
                    self.push_value_byte(byte);
                } else {
                    self.end_value_string();
                    self.state = LexState::ValueStringEnd;
                }
            }
            b' ' => {
                if self.quoted {
                    self.push_value_byte(byte);
                } else {
                    self.end_value_string();
                    self.state = LexState::ValueStringEnd;
                }
            }
            b'\n' => {
                if self.quoted {
                    if self.options.allow_multiline {
                        self.push_value_byte(byte);
                    } else {
                        self.error(DiagCode::UnterminatedString, "unterminated value string");
                        self.abandon_value_string();
                        self.state = LexState::Key;
                    }
                } else {
                    self.end_value_string();
                    self.state = self.state_after_value();
                }
            }
            b'\\' if self.options.parse_escapes => {
                if self.quoted {
                    self.push_value_byte(byte);
                    self.resume = LexState::ValueString;
                    self.state = LexState::StringEscape;
                } else {
                    self.error(
                        DiagCode::BackslashInString,
                        "backslash in unquoted value string (should you be parsing escape sequences?)",
                    );
                }
            }
            b'"' => {
                // A quote ends a value string even when it started unquoted.
                self.end_value_string();
                self.state = LexState::ValueStringEnd;
            }
            b'{' | b'}' if !self.quoted => {
                self.error(
                    DiagCode::BraceInString,
                    "unexpected brace in value string (you cannot use braces in unquoted strings)",
                );
            }
            _ => self.push_value_byte(byte),
        }
    }

    fn step_value_string_end(&mut self, byte: u8) {
        match byte {
            b'\t' | b' ' => {}
            b'\n' => self.state = self.state_after_value(),
            b'/' => {
                self.resume = LexState::ValueStringEnd;
                self.state = LexState::Slash;
            }
            b'[' => {
                self.resume = LexState::ValueStringEnd;
                self.state = LexState::Conditional;
            }
            _ => {
                self.error(
                    DiagCode::UnexpectedCharacter,
                    "unexpected character after value string (maybe you forgot to use quotes)",
                );
            }
        }
    }

    fn step_string_escape(&mut self, byte: u8) {
        let resume = self.resume;
        self.state = resume;
        // The escaped byte is part of the token text.
        match resume {
            LexState::KeyString => self.push_key_byte(byte),
            LexState::ValueString => self.push_value_byte(byte),
            _ => {}
        }
        match byte {
            b'\\' | b't' | b'n' | b'"' => {}
            b'_' if self.options.ignore_shrug_escape => {}
            _ => self.invalid_escape(resume),
        }
    }

    /// One escape diagnostic per line at most; a root key on line one is
    /// exempt when `check_root_escapes` is off.
    fn invalid_escape(&mut self, resume: LexState) {
        if self.last_escape_error_line == Some(self.line) {
            return;
        }
        match resume {
            LexState::KeyString => {
                if self.line == 1 && !self.options.check_root_escapes {
                    return;
                }
                self.last_escape_error_line = Some(self.line);
                self.error(DiagCode::BadEscape, "invalid escape sequence in key string");
            }
            LexState::ValueString => {
                self.last_escape_error_line = Some(self.line);
                self.error(DiagCode::BadEscape, "invalid escape sequence in value string");
            }
            other => {
                self.internal(format!(
                    "internal state error: escape sequence outside of a string ({other:?})"
                ));
            }
        }
    }

    fn step_slash(&mut self, byte: u8) {
        match byte {
            b'/' => self.state = LexState::LineComment,
            b'*' => {
                if self.options.allow_block_comments {
                    self.state = LexState::BlockComment;
                } else {
                    self.warn(
                        DiagCode::BlockComment,
                        "only line comments are allowed. inline comments act as line comments \
                         in most games and can cause unexpected behavior",
                    );
                    self.state = LexState::LineComment;
                }
            }
            _ => {
                self.error(DiagCode::BogusComment, "bogus comment");
                self.state = LexState::LineComment;
            }
        }
    }

    fn step_line_comment(&mut self, byte: u8) {
        if byte == b'\n' {
            self.resume_at_line_end();
        }
    }

    fn step_block_comment(&mut self, byte: u8) {
        if byte == b'*' {
            self.state = LexState::BlockAsterisk;
        }
    }

    fn step_block_asterisk(&mut self, byte: u8) {
        match byte {
            // Block comments close mid-line, so return to the stashed
            // state directly rather than through the line-end mapping.
            b'/' => self.state = self.resume,
            b'*' => {}
            _ => self.state = LexState::BlockComment,
        }
    }

    fn step_conditional(&mut self, byte: u8) {
        match byte {
            b'\n' => {
                self.error(DiagCode::UnterminatedConditional, "unterminated conditional");
                self.resume_at_line_end();
            }
            b']' => self.state = LexState::ConditionalEnd,
            _ => {}
        }
    }

    fn step_conditional_end(&mut self, byte: u8) {
        match byte {
            b'\t' | b' ' => {}
            b'\n' => self.resume_at_line_end(),
            b'[' => {
                self.error(
                    DiagCode::DuplicateConditional,
                    "only one conditional may be used per key",
                );
            }
            // The resume slot still holds the state from before the
            // conditional; a trailing comment returns there.
            b'/' => self.state = LexState::Slash,
            _ => {
                self.error(
                    DiagCode::AfterConditional,
                    "unexpected character after conditional",
                );
            }
        }
    }

    fn step_end_of_root(&mut self, byte: u8) {
        match byte {
            b'\n' | b'\t' | b' ' => {}
            b'/' => {
                self.resume = LexState::EndOfRoot;
                self.state = LexState::Slash;
            }
            _ => {
                if !self.root_end_reported {
                    self.root_end_reported = true;
                    self.error(DiagCode::DataAfterRoot, "unexpected data after end of root key");
                }
            }
        }
    }
}

#[cfg(test)]
impl Scanner {
    /// Test-only access for exercising internal-invariant branches.
    pub(crate) fn force_states(&mut self, state: LexState, resume: LexState) {
        self.state = state;
        self.resume = resume;
    }
}
