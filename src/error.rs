//! Error types for scanning and report generation.
//!
//! Traversal never produces an error: unreadable entries are absorbed by the
//! tree builder. What remains are configuration errors, raised before a scan
//! starts, and output errors, raised while writing an HTML report.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors surfaced by the library.
#[derive(Debug, Error)]
pub enum Error {
    /// The scan root does not exist or is not a directory.
    #[error("The root argument should be a directory: {}", .0.display())]
    InvalidRoot(PathBuf),

    /// The HTML template lacks a placeholder the report needs.
    #[error("parse template failed: missing {placeholder} placeholder")]
    Template {
        /// The placeholder that was not found
        placeholder: &'static str,
    },

    /// The tree could not be serialized.
    #[error("dump json data failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// An output file could not be written.
    #[error("write {} failed: {source}", path.display())]
    Write {
        /// File that was being written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Convenience alias used throughout the library.
pub type Result<T, E = Error> = std::result::Result<T, E>;
