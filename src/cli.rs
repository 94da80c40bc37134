//! Command-line interface definition and argument parsing.
//!
//! This module defines all command-line arguments and their defaults using
//! the [clap](https://docs.rs/clap/) library.
//!
//! Helper methods on [`Cli`] accept a [`FileConfig`] reference so that config-file
//! values act as defaults that CLI arguments can override (layered config).

use std::path::{MAIN_SEPARATOR_STR, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};

use scandisk::{
    BlockSize,
    config::{
        FileConfig, OutputMode, OutputOptions, ScanOptions, file::expand_tilde,
        output::DEFAULT_FILENAME,
    },
    utils::parse_size,
};

/// Top-level subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Inspect or initialise the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Subcommands for `config`.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration (file values + defaults for unset keys)
    Show,
    /// Write a default config.toml if none exists yet
    Init,
    /// Print the path to the config file
    Path,
}

/// Main command-line interface structure.
///
/// Helper methods accept a [`FileConfig`] reference so that config-file values act as
/// defaults when the corresponding CLI argument is not provided.
#[derive(Parser)]
#[command(name = "scandisk")]
#[command(about = "Show disk usage of a directory tree as a text report or an interactive HTML page")]
#[command(version)]
pub struct Cli {
    /// Subcommand (e.g. `config`)
    #[command(subcommand)]
    pub subcommand: Option<Commands>,

    /// Set the directory to scan from
    ///
    /// Defaults to the filesystem root. The path must exist and be a directory.
    #[arg(short = 'r', long)]
    root: Option<PathBuf>,

    /// Set the output destination (html, text or json)
    ///
    /// `html` writes `<filename>.html` plus its script, stylesheet and icons to
    /// the report's directory. `text` prints an indented report to stdout and
    /// `json` prints the tree as a single JSON document.
    #[arg(short = 'o', long, value_enum)]
    output: Option<OutputMode>,

    /// If the output is set to html, this argument decides the output file name
    ///
    /// `.html` is appended when missing.
    #[arg(short = 'f', long)]
    filename: Option<String>,

    /// Use this block size instead of asking the filesystem
    ///
    /// Accepts plain bytes or sizes such as 4KiB or 512B.
    #[arg(long)]
    block_size: Option<String>,

    /// Log scan progress and list the entries that could not be read
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Cli {
    /// Resolve the scan root.
    ///
    /// Priority: CLI argument > config file `root` > filesystem root.
    /// Tilde expansion is applied to the path from the config file.
    #[must_use]
    pub fn root(&self, config: &FileConfig) -> PathBuf {
        self.root.clone().unwrap_or_else(|| {
            config.root.as_deref().map_or_else(
                || PathBuf::from(MAIN_SEPARATOR_STR),
                expand_tilde,
            )
        })
    }

    /// Whether verbose output is enabled by the flag or the config file.
    #[must_use]
    pub fn verbose(&self, config: &FileConfig) -> bool {
        self.verbose || config.verbose.unwrap_or(false)
    }

    /// Extract output options from CLI args and config file.
    ///
    /// Priority: CLI argument > config file > default (`html`, `output`).
    /// An unrecognised `output` value in the config file is ignored.
    #[must_use]
    pub fn output_options(&self, config: &FileConfig) -> OutputOptions {
        OutputOptions {
            mode: self
                .output
                .or_else(|| {
                    config
                        .output
                        .as_ref()
                        .and_then(|s| OutputMode::from_str(s, true).ok())
                })
                .unwrap_or_default(),
            filename: self
                .filename
                .clone()
                .or_else(|| config.filename.clone())
                .unwrap_or_else(|| DEFAULT_FILENAME.to_string()),
        }
    }

    /// Extract scanning options from CLI args and config file.
    ///
    /// The spinner is hidden in JSON mode so stdout carries only the document.
    ///
    /// # Errors
    ///
    /// Returns an error if the block size (from either source) cannot be
    /// parsed or is zero.
    pub fn scan_options(&self, config: &FileConfig) -> Result<ScanOptions> {
        let block_size = match self.block_size.as_ref().or(config.block_size.as_ref()) {
            Some(raw) => {
                let bytes =
                    parse_size(raw).with_context(|| format!("Invalid block size {raw:?}"))?;
                let Some(block_size) = BlockSize::new(bytes) else {
                    bail!("Block size must be greater than zero");
                };
                Some(block_size)
            }
            None => None,
        };

        Ok(ScanOptions {
            verbose: self.verbose(config),
            block_size,
            quiet: self.output_options(config).mode == OutputMode::Json,
        })
    }
}
