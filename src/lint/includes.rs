//! `#base` include checking.
//!
//! The scanner never resolves includes recursively; it only verifies that
//! the file named by a `#base` directive exists next to the file under
//! scan. This module provides the two narrow collaborators that makes
//! possible: base-directory resolution for the lint target and a
//! filesystem probe behind the [`FileProbe`] trait so tests can substitute
//! their own.

use std::path::{Path, PathBuf};

use crate::error::{KvlintError, Result};

/// Longest include path the engine will open (PATH_MAX on the platforms
/// the games run on).
pub const MAX_INCLUDE_PATH: usize = 4096;

/// Reports whether a candidate path names an existing regular file.
pub trait FileProbe {
    fn is_regular_file(&self, path: &Path) -> bool;
}

/// Probe backed by the real filesystem.
pub struct FsProbe;

impl FileProbe for FsProbe {
    fn is_regular_file(&self, path: &Path) -> bool {
        std::fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
    }
}

/// Resolve the absolute directory containing the lint target.
///
/// Failure permanently disables include checking for that file; the caller
/// treats it as non-fatal but records it for the exit status.
pub fn resolve_base_dir(target: &Path) -> Result<PathBuf> {
    let parent = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    parent
        .canonicalize()
        .map_err(|source| KvlintError::BaseDirResolution {
            path: target.to_path_buf(),
            source,
        })
}

/// Outcome of checking one included path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncludeStatus {
    /// The path names an existing regular file.
    Ok,
    /// The combined path exceeds [`MAX_INCLUDE_PATH`].
    PathTooLong,
    /// The path is missing or not a regular file.
    Unreadable,
}

/// Checks `#base` targets relative to a resolved base directory.
pub struct IncludeChecker {
    base_dir: PathBuf,
    probe: Box<dyn FileProbe>,
}

impl IncludeChecker {
    /// Create a checker rooted at `base_dir`.
    pub fn new(base_dir: PathBuf, probe: Box<dyn FileProbe>) -> Self {
        Self { base_dir, probe }
    }

    /// Create a checker for `target` using the real filesystem.
    pub fn for_target(target: &Path) -> Result<Self> {
        Ok(Self::new(resolve_base_dir(target)?, Box::new(FsProbe)))
    }

    /// The resolved base directory.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Check one include target as written in the directive's value string.
    pub fn check(&self, relative: &str) -> IncludeStatus {
        let candidate = self.base_dir.join(relative);
        if candidate.as_os_str().len() > MAX_INCLUDE_PATH {
            return IncludeStatus::PathTooLong;
        }
        if self.probe.is_regular_file(&candidate) {
            IncludeStatus::Ok
        } else {
            IncludeStatus::Unreadable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    struct AlwaysFound;

    impl FileProbe for AlwaysFound {
        fn is_regular_file(&self, _path: &Path) -> bool {
            true
        }
    }

    #[test]
    fn resolves_base_dir_of_a_real_file() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("scheme.kv");
        fs::write(&target, "\"k\" \"v\"").unwrap();

        let base = resolve_base_dir(&target).unwrap();

        assert_eq!(base, temp.path().canonicalize().unwrap());
    }

    #[test]
    fn bare_filename_resolves_to_current_directory() {
        let base = resolve_base_dir(Path::new("scheme.kv")).unwrap();

        assert_eq!(base, Path::new(".").canonicalize().unwrap());
    }

    #[test]
    fn resolution_fails_for_missing_directory() {
        let err = resolve_base_dir(Path::new("/no/such/dir/scheme.kv")).unwrap_err();

        assert!(matches!(err, KvlintError::BaseDirResolution { .. }));
    }

    #[test]
    fn probe_finds_regular_file() {
        let temp = TempDir::new().unwrap();
        let included = temp.path().join("base.kv");
        fs::write(&included, "\"k\" \"v\"").unwrap();

        let checker = IncludeChecker::new(temp.path().to_path_buf(), Box::new(FsProbe));

        assert_eq!(checker.check("base.kv"), IncludeStatus::Ok);
        assert_eq!(checker.check("missing.kv"), IncludeStatus::Unreadable);
    }

    #[test]
    fn directory_is_not_a_regular_file() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("subdir")).unwrap();

        let checker = IncludeChecker::new(temp.path().to_path_buf(), Box::new(FsProbe));

        assert_eq!(checker.check("subdir"), IncludeStatus::Unreadable);
    }

    #[test]
    fn oversized_path_is_rejected_before_probing() {
        let checker = IncludeChecker::new(PathBuf::from("/tmp"), Box::new(AlwaysFound));
        let long = "x".repeat(MAX_INCLUDE_PATH + 1);

        assert_eq!(checker.check(&long), IncludeStatus::PathTooLong);
    }
}
