//! # scandisk
//!
//! Scan a directory tree, size every file in whole filesystem blocks and show
//! where the space went, largest entries first.
//!
//! ## Usage
//!
//! ```bash
//! # Interactive report of the whole filesystem, written to output.html
//! scandisk
//!
//! # Indented text report on stdout
//! scandisk --root /var --output text
//!
//! # Report written to reports/var.html
//! scandisk -r /var -f reports/var
//! ```

mod cli;

use std::{fs, io, path::Path, process::exit};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, ConfigCommand};
use colored::Colorize;
use scandisk::{
    OutputMode, SystemBlockSize, TreeBuilder,
    config::{FileConfig, validate_root},
    render::{HtmlReport, to_json, write_text},
    tree::ScanStats,
    utils::format_size,
};
use tracing_subscriber::EnvFilter;

/// Entry point for the scandisk application.
///
/// This function handles all errors gracefully by calling [`inner_main`] and printing
/// any errors to stderr before exiting with a non-zero status code.
fn main() {
    if let Err(err) = inner_main() {
        eprintln!("Error: {err}");

        exit(1);
    }
}

/// Main application logic that can return errors.
///
/// Parse arguments, validate the root, build the tree and hand it to the
/// selected renderer.
///
/// # Errors
///
/// Returns errors from argument resolution, root validation, serialization
/// and writing the report.
fn inner_main() -> Result<()> {
    let args = Cli::parse();

    if let Some(Commands::Config { command }) = &args.subcommand {
        return handle_config_command(command);
    }

    let file_config = load_config();
    setup_logging(args.verbose(&file_config));

    let root = args.root(&file_config);
    let output = args.output_options(&file_config);
    let scan_options = args.scan_options(&file_config)?;
    let verbose = scan_options.verbose;

    validate_root(&root)?;

    let builder = TreeBuilder::new(scan_options);
    let (tree, stats) = builder.scan_with_stats(&root, &SystemBlockSize);

    if verbose {
        print_scan_errors(&stats);
    }

    match output.mode {
        OutputMode::Text => {
            write_text(&tree, io::stdout().lock()).context("Failed to write the text report")?;
        }
        OutputMode::Json => println!("{}", to_json(&tree)?),
        OutputMode::Html => {
            let report = HtmlReport::new(&output.filename);
            let path = report.write(&tree)?;
            println!(
                "{} {} {}",
                "📄 Report written to".green(),
                path.display(),
                format!("({} in {} files)", format_size(tree.size), stats.files).bright_white()
            );
        }
    }

    Ok(())
}

// ── Helper functions ────────────────────────────────────────────────────

/// Send `tracing` output to stderr.
///
/// `RUST_LOG` wins when set. Otherwise only warnings are shown, or this
/// crate's `info` events with `--verbose`. Unreadable entries are logged at
/// `debug` and listed once by [`print_scan_errors`] instead.
fn setup_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Filter used when `RUST_LOG` is unset.
const fn default_log_filter(verbose: bool) -> &'static str {
    if verbose { "scandisk=info" } else { "warn" }
}

/// List the entries that contributed zero bytes because they could not be read.
fn print_scan_errors(stats: &ScanStats) {
    if stats.errors.is_empty() {
        return;
    }

    eprintln!(
        "{}",
        format!("⚠️  {} entries could not be read:", stats.errors.len()).yellow()
    );
    for error in &stats.errors {
        eprintln!("  {}", error.red());
    }
}

// ── Config subcommand ────────────────────────────────────────────────

/// Default config file template written by `config init`.
const CONFIG_TEMPLATE: &str = r#"# scandisk configuration
# All values shown are their defaults. Uncomment and change as needed.

# Directory to scan
# root = "/"

# Output mode: html, text or json
# output = "html"

# Base name of the HTML report (".html" is appended)
# filename = "output"

# Block size used to round file sizes; asks the filesystem when unset
# block_size = "4KiB"

# Log scan progress and list unreadable entries
# verbose = false
"#;

/// Dispatch a `config` subcommand.
fn handle_config_command(cmd: &ConfigCommand) -> Result<()> {
    let path =
        FileConfig::config_path().context("No config directory is known for this platform")?;

    match cmd {
        ConfigCommand::Path => println!("{}", path.display()),
        ConfigCommand::Show => show_config(&path)?,
        ConfigCommand::Init => init_config(&path)?,
    }
    Ok(())
}

/// Print the values a scan would start from: the file's keys, defaults for the rest.
fn show_config(path: &Path) -> Result<()> {
    let config = if path.is_file() {
        println!("{} {}", "Using".bold(), path.display());
        FileConfig::load_from(path)?
    } else {
        println!(
            "{} {} {}",
            "No config file at".bold(),
            path.display(),
            "(built-in defaults)".dimmed()
        );
        FileConfig::default()
    };

    println!("\n{}", format_config(&config));
    Ok(())
}

/// Format a [`FileConfig`] as a human-readable table, showing defaults for `None` fields.
fn format_config(config: &FileConfig) -> String {
    fn show_str(val: Option<&str>, default: &str) -> String {
        val.map_or_else(
            || format!("\"{default}\"  (default)"),
            |v| format!("\"{v}\""),
        )
    }

    let root = config.root.as_ref().map_or_else(
        || "\"/\"  (default)".to_string(),
        |p| format!("\"{}\"", p.display()),
    );
    let block_size = config.block_size.as_deref().map_or_else(
        || "(filesystem)  (default)".to_string(),
        |v| format!("\"{v}\""),
    );
    let verbose = config
        .verbose
        .map_or_else(|| "false  (default)".to_string(), |v| v.to_string());

    format!(
        "\
root       = {root}
output     = {output}
filename   = {filename}
block_size = {block_size}
verbose    = {verbose}",
        output = show_str(config.output.as_deref(), "html"),
        filename = show_str(config.filename.as_deref(), "output"),
    )
}

/// Write the commented template, leaving an existing file untouched.
fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        println!(
            "{} {} (delete it to start over)",
            "Keeping existing config at".yellow(),
            path.display()
        );
        return Ok(());
    }

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("Cannot create {}", dir.display()))?;
    }
    fs::write(path, CONFIG_TEMPLATE).with_context(|| format!("Cannot write {}", path.display()))?;

    println!("{} {}", "Config template written to".green(), path.display());
    Ok(())
}

/// Read the config file. A broken file is reported and the defaults are used.
fn load_config() -> FileConfig {
    FileConfig::load().unwrap_or_else(|e| {
        eprintln!("{} {e}", "Warning: ignoring config file:".yellow());
        FileConfig::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_logging_stops_short_of_debug() {
        assert_eq!(default_log_filter(false), "warn");
        assert_eq!(default_log_filter(true), "scandisk=info");
    }

    #[test]
    fn test_config_template_parses_to_defaults() {
        let config: FileConfig = toml::from_str(CONFIG_TEMPLATE).unwrap();

        assert!(config.root.is_none());
        assert!(config.output.is_none());
        assert!(config.verbose.is_none());
    }
}
