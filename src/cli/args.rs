//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct. kvlint is single-purpose,
//! so the surface is flat: lint toggles plus one or more input files.

use clap::Parser;
use clap_complete::Shell;
use std::path::PathBuf;

use crate::lint::{LintOptions, OutputFormat};

/// kvlint - Syntax validator for KeyValues files.
#[derive(Debug, Parser)]
#[command(name = "kvlint")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// KeyValues files to check
    #[arg(required_unless_present = "completions")]
    pub files: Vec<PathBuf>,

    /// Require all keys and values to be quoted
    #[arg(short = 'q', long)]
    pub require_quotes: bool,

    /// Allow raw newlines in strings
    #[arg(short = 'm', long)]
    pub multiline: bool,

    /// Parse and validate escape sequences
    #[arg(short = 'e', long)]
    pub escapes: bool,

    /// With --escapes: accept the \_ escape used in emoticons
    #[arg(long)]
    pub shrug: bool,

    /// Suppress escape errors in a root key on line one
    #[arg(long)]
    pub skip_root_escapes: bool,

    /// Allow /* ... */ block comments
    #[arg(long)]
    pub block_comments: bool,

    /// Check that #base directives name readable files
    #[arg(short = 'b', long)]
    pub directives: bool,

    /// Allow more than one root key per file
    #[arg(long)]
    pub multiple_roots: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Any diagnostic flips the exit code to 1
    #[arg(long)]
    pub strict: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Generate shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

impl Cli {
    /// Translate the CLI flags into scanner options.
    pub fn lint_options(&self) -> LintOptions {
        LintOptions {
            require_quotes: self.require_quotes,
            allow_multiline: self.multiline,
            parse_escapes: self.escapes,
            ignore_shrug_escape: self.shrug,
            check_root_escapes: !self.skip_root_escapes,
            allow_block_comments: self.block_comments,
            validate_directives: self.directives,
            allow_multiple_root_keys: self.multiple_roots,
        }
    }
}
