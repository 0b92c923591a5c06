//! KeyValues syntax validation.
//!
//! This module contains the whole of the linting engine:
//!
//! - **Scanner** - the single-pass state machine ([`Scanner`])
//! - **Options** - the immutable per-run toggles ([`LintOptions`])
//! - **Diagnostics** - line-numbered findings ([`Diagnostic`], [`DiagCode`])
//! - **Includes** - the `#base` collaborators ([`includes`])
//! - **Output** - human/JSON/SARIF formatters ([`output`])
//!
//! # Example
//!
//! ```
//! use kvlint::lint::{LintOptions, Scanner};
//!
//! let mut scanner = Scanner::new("scheme.kv", LintOptions::default(), None);
//! scanner.scan_bytes(b"\"root\"\n{\n\t\"k\" \"v\"\n}\n");
//! let report = scanner.finish();
//!
//! assert!(report.diagnostics.is_empty());
//! assert!(!report.unclosed_key);
//! ```

pub mod diagnostic;
pub mod includes;
pub mod options;
pub mod output;
pub mod scanner;
pub mod state;

pub use diagnostic::{DiagCode, Diagnostic, Severity};
pub use includes::{FileProbe, FsProbe, IncludeChecker, IncludeStatus};
pub use options::LintOptions;
pub use output::{HumanFormatter, JsonFormatter, LintFormatter, OutputFormat, SarifFormatter};
pub use scanner::{ScanReport, Scanner, MAX_TOKEN_LEN};
pub use state::LexState;
