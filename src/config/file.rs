//! Configuration file support for persistent settings.
//!
//! This module provides support for loading configuration from a TOML file
//! located at `~/.config/scandisk/config.toml` (or the platform-specific
//! equivalent). Configuration file values serve as defaults that can be
//! overridden by CLI arguments.
//!
//! # Layering
//!
//! The precedence order is: **CLI argument > config file > hardcoded default**.
//!
//! # Example config
//!
//! ```toml
//! root = "~/Projects"
//! output = "text"
//! filename = "usage"
//! block_size = "4KiB"
//! verbose = true
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level configuration file structure.
///
/// All fields are `Option<T>` so we can detect which values are present in the
/// config file and apply layered configuration (CLI > config file > defaults).
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Default directory to scan
    pub root: Option<PathBuf>,

    /// Default output mode (`"html"`, `"text"`, `"json"`)
    pub output: Option<String>,

    /// Default base name of the HTML report
    pub filename: Option<String>,

    /// Block size override (e.g. `"4096"`, `"4KiB"`)
    pub block_size: Option<String>,

    /// Whether to report unreadable entries
    pub verbose: Option<bool>,
}

/// Expand a leading `~` in a path to the user's home directory.
///
/// Paths that don't start with `~` are returned unchanged.
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

impl FileConfig {
    /// Returns the path where the configuration file is expected.
    ///
    /// The configuration file is located at `<config_dir>/scandisk/config.toml`,
    /// where `<config_dir>` is the platform-specific configuration directory
    /// (e.g., `~/.config` on Linux, `%APPDATA%` on Windows).
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("scandisk").join("config.toml"))
    }

    /// Load configuration from the default config file location.
    ///
    /// If the config file doesn't exist, returns a default (empty) configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> anyhow::Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// has unknown keys.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file at {}: {e}", path.display())
        })?;

        toml::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file at {}: {e}", path.display())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_config() {
        let config = FileConfig::default();

        assert!(config.root.is_none());
        assert!(config.output.is_none());
        assert!(config.filename.is_none());
        assert!(config.block_size.is_none());
        assert!(config.verbose.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
root = "/srv"
output = "text"
filename = "usage"
block_size = "4KiB"
verbose = true
"#;

        let config: FileConfig = toml::from_str(toml_content).unwrap();

        assert_eq!(config.root, Some(PathBuf::from("/srv")));
        assert_eq!(config.output.as_deref(), Some("text"));
        assert_eq!(config.filename.as_deref(), Some("usage"));
        assert_eq!(config.block_size.as_deref(), Some("4KiB"));
        assert_eq!(config.verbose, Some(true));
    }

    #[test]
    fn test_parse_partial_config() {
        let config: FileConfig = toml::from_str("output = \"html\"").unwrap();

        assert_eq!(config.output.as_deref(), Some("html"));
        assert!(config.root.is_none());
        assert!(config.verbose.is_none());
    }

    #[test]
    fn test_parse_empty_config() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert!(config.root.is_none());
    }

    #[test]
    fn test_malformed_config_errors() {
        assert!(toml::from_str::<FileConfig>("root = [").is_err());
        assert!(toml::from_str::<FileConfig>("verbose = \"yes\"").is_err());
        assert!(toml::from_str::<FileConfig>("threads = 4").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "filename = \"report\"\n").unwrap();

        let config = FileConfig::load_from(&path).unwrap();
        assert_eq!(config.filename.as_deref(), Some("report"));
    }

    #[test]
    fn test_load_from_missing_file_errors() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = FileConfig::load_from(&dir.path().join("nope.toml")).unwrap_err();

        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_config_path_returns_expected_suffix() {
        if let Some(path) = FileConfig::config_path() {
            assert!(path.ends_with("scandisk/config.toml"));
        }
    }

    #[test]
    fn test_expand_tilde_with_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde(Path::new("~/scans")), home.join("scans"));
        }
    }

    #[test]
    fn test_expand_tilde_other_paths_unchanged() {
        assert_eq!(expand_tilde(Path::new("/var/log")), PathBuf::from("/var/log"));
        assert_eq!(expand_tilde(Path::new("relative")), PathBuf::from("relative"));
        assert_eq!(expand_tilde(Path::new("a/~/b")), PathBuf::from("a/~/b"));
    }
}
