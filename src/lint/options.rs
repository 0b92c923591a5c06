//! Lint options.
//!
//! [`LintOptions`] is the immutable per-run configuration for the scanner.
//! Each toggle is independent; the defaults are the engine's own rules,
//! with every relaxation opt-in.

/// Options controlling which constructs the scanner accepts.
///
/// All toggles default to `false` except [`check_root_escapes`], which
/// defaults to `true` (invalid escapes in a line-one root key are reported
/// unless explicitly suppressed).
///
/// [`check_root_escapes`]: LintOptions::check_root_escapes
#[derive(Debug, Clone)]
pub struct LintOptions {
    /// Require all keys and values to be quoted.
    pub require_quotes: bool,
    /// Allow raw newlines inside quoted strings.
    pub allow_multiline: bool,
    /// Parse and validate escape sequences.
    pub parse_escapes: bool,
    /// With `parse_escapes`: accept the `\_` escape used in emoticons.
    pub ignore_shrug_escape: bool,
    /// Report invalid escapes in a root key on line one of the file.
    pub check_root_escapes: bool,
    /// Allow `/* ... */` block comments.
    pub allow_block_comments: bool,
    /// Validate `#base` include directives against the filesystem.
    pub validate_directives: bool,
    /// Allow more than one root key per file.
    pub allow_multiple_root_keys: bool,
}

impl Default for LintOptions {
    fn default() -> Self {
        Self {
            require_quotes: false,
            allow_multiline: false,
            parse_escapes: false,
            ignore_shrug_escape: false,
            check_root_escapes: true,
            allow_block_comments: false,
            validate_directives: false,
            allow_multiple_root_keys: false,
        }
    }
}
