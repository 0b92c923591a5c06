//! Error types for kvlint operations.
//!
//! This module defines [`KvlintError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Syntactic findings in the input are *not* errors; they are
//!   [`Diagnostic`](crate::lint::Diagnostic)s and the scan continues.
//! - `KvlintError` covers the driver's own failures: unreadable input
//!   files, base-directory resolution, I/O.
//! - Use `anyhow::Error` (via `KvlintError::Other`) for unexpected errors.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for kvlint operations.
#[derive(Debug, Error)]
pub enum KvlintError {
    /// An input file could not be opened or read.
    #[error("unable to read {path}: {source}")]
    UnreadableInput {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The directory containing the lint target could not be resolved,
    /// so `#base` directives cannot be checked for that file.
    #[error("unable to resolve base directory of {path}: {source}")]
    BaseDirResolution {
        path: PathBuf,
        source: std::io::Error,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for kvlint operations.
pub type Result<T> = std::result::Result<T, KvlintError>;
