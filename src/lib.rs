//! kvlint - Syntax validator for Valve KeyValues files.
//!
//! kvlint scans KeyValues text files character by character and reports
//! syntax problems as line-numbered diagnostics. It never builds a parse
//! tree; a single pass over the bytes drives a small state machine, so
//! arbitrarily large files lint in constant memory.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and the lint driver
//! - [`error`] - Error types and result aliases
//! - [`lint`] - The scanner, its options, diagnostics, and output formatters
//!
//! # Example
//!
//! ```
//! use kvlint::lint::{LintOptions, Scanner};
//!
//! let mut scanner = Scanner::new("pet.kv", LintOptions::default(), None);
//! scanner.scan_bytes(b"\"pet\"\n{\n\t\"type\" \"dog\"\n}\n");
//! let report = scanner.finish();
//! assert!(report.diagnostics.is_empty());
//! ```

pub mod cli;
pub mod error;
pub mod lint;

pub use error::{KvlintError, Result};
