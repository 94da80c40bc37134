//! Output configuration.
//!
//! Selects how a finished tree is presented and where an HTML report goes.

use clap::ValueEnum;

/// Default base name of the HTML report.
pub const DEFAULT_FILENAME: &str = "output";

/// Report formats.
#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum, Default)]
pub enum OutputMode {
    /// Write an interactive HTML tree view next to its script and stylesheet
    #[default]
    Html,

    /// Print an indented text report to stdout
    Text,

    /// Print the tree as compact JSON to stdout
    Json,
}

/// Configuration for the report.
#[derive(Clone, Debug)]
pub struct OutputOptions {
    /// Format of the report
    pub mode: OutputMode,

    /// Base file name for HTML output; `.html` is appended when missing
    pub filename: String,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            mode: OutputMode::default(),
            filename: DEFAULT_FILENAME.to_string(),
        }
    }
}
