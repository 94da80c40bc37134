//! Scanning configuration for directory traversal.
//!
//! This module defines the options that control how a directory tree is
//! walked, and the check performed on the root before a scan starts.

use std::{fs, path::Path};

use crate::{
    block_size::BlockSize,
    error::{Error, Result},
};

/// Configuration for directory scanning behavior.
#[derive(Clone, Debug, Default)]
pub struct ScanOptions {
    /// Whether to report entries that could not be read once the scan is done
    pub verbose: bool,

    /// Block size to use instead of querying the filesystem (None = query)
    pub block_size: Option<BlockSize>,

    /// Whether to hide the progress spinner
    pub quiet: bool,
}

/// Check that `root` exists and is a directory.
///
/// Symbolic links are followed, so a link to a directory is a valid root.
///
/// # Errors
///
/// Returns [`Error::InvalidRoot`] if the path cannot be stat'ed or is not a
/// directory.
pub fn validate_root(root: &Path) -> Result<()> {
    match fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        _ => Err(Error::InvalidRoot(root.to_path_buf())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_scan_options_default() {
        let scan_opts = ScanOptions::default();

        assert!(!scan_opts.verbose);
        assert!(!scan_opts.quiet);
        assert!(scan_opts.block_size.is_none());
    }

    #[test]
    fn test_validate_root_accepts_directory() {
        let dir = TempDir::new().unwrap();
        assert!(validate_root(dir.path()).is_ok());
    }

    #[test]
    fn test_validate_root_rejects_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("plain.txt");
        fs::write(&file, "x").unwrap();

        let err = validate_root(&file).unwrap_err();
        assert!(matches!(err, Error::InvalidRoot(ref p) if p == &file));
    }

    #[test]
    fn test_validate_root_rejects_missing_path() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");

        let err = validate_root(&missing).unwrap_err();
        assert!(
            err.to_string()
                .starts_with("The root argument should be a directory")
        );
    }
}
