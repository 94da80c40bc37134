//! Configuration for scans and reports.
//!
//! - [`ScanOptions`] controls the directory walk
//! - [`OutputOptions`] selects the report format and file name
//! - [`FileConfig`] holds defaults read from the config file

pub mod file;
pub mod output;
pub mod scan;

pub use file::FileConfig;
pub use output::{OutputMode, OutputOptions};
pub use scan::{ScanOptions, validate_root};
