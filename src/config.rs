//! Run configuration.
//!
//! A run is configured in three layers, each overriding the one before:
//!
//! 1. Stock defaults (no hidden entries, `index.html`, no base URL)
//! 2. An optional `.indexify.toml` in the root directory
//! 3. Command-line flags
//!
//! ## Config File
//!
//! ```toml
//! # All keys optional - defaults shown
//! hidden = false             # List entries whose name starts with "."
//! index_name = "index.html"  # File written into every indexed directory
//! base_url = "https://cdn.example.com/files"  # Prefix for item links (unset by default)
//! ```
//!
//! The file is sparse and merged over the stock defaults. Unknown keys are
//! rejected to catch typos early. Being a dotfile, it is not listed on
//! generated pages unless hidden entries are included.
//!
//! The resolved [`Config`] is immutable. Recursive runs pass the same value
//! to every directory visit.

use crate::collect::CollectOptions;
use crate::resolve::{ResolveError, RootContext};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the optional config file looked up in the root directory.
pub const CONFIG_FILENAME: &str = ".indexify.toml";

pub const DEFAULT_INDEX_NAME: &str = "index.html";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error(transparent)]
    Root(#[from] ResolveError),
}

/// Settings read from `.indexify.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub hidden: bool,
    pub index_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            hidden: false,
            index_name: DEFAULT_INDEX_NAME.to_string(),
            base_url: None,
        }
    }
}

impl FileConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_index_name(&self.index_name)?;
        validate_base_url(self.base_url.as_deref())
    }
}

/// The index file must land inside the directory it lists.
fn validate_index_name(name: &str) -> Result<(), ConfigError> {
    if name.is_empty() || name == "." || name == ".." {
        return Err(ConfigError::Validation(format!(
            "index_name must be a file name, got {name:?}"
        )));
    }
    if name.contains('/') || name.contains(std::path::MAIN_SEPARATOR) {
        return Err(ConfigError::Validation(format!(
            "index_name must not contain a path separator, got {name:?}"
        )));
    }
    Ok(())
}

fn validate_base_url(base_url: Option<&str>) -> Result<(), ConfigError> {
    if base_url.is_some_and(|url| url.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "base_url must not be empty when set".into(),
        ));
    }
    Ok(())
}

// =============================================================================
// Config file loading and merging
// =============================================================================

/// Returns the stock defaults as a `toml::Value::Table`, the base layer for
/// merging.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(FileConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key by key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `.indexify.toml` from `dir` as a raw value, `None` if absent.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<FileConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: FileConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Stock defaults overlaid with the root's `.indexify.toml`, if any.
pub fn load_config(root: &Path) -> Result<FileConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(root)?)
}

// =============================================================================
// Resolved run configuration
// =============================================================================

/// Where rendered documents go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Write through the render-target guard into each directory.
    File,
    /// Print to standard output; nothing is written to disk.
    Stdout,
}

/// Command-line values layered over the config file.
///
/// `None` means "not given" and keeps the file's value. The run-mode switches
/// have no file counterpart, so a plain `bool` is enough for them.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub hidden: Option<bool>,
    pub dry_run: bool,
    pub recursive: bool,
    pub stdout: bool,
    pub index_name: Option<String>,
    pub base_url: Option<String>,
}

/// Immutable settings for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub root: RootContext,
    pub include_hidden: bool,
    pub dry_run: bool,
    pub recursive: bool,
    pub output: OutputMode,
    pub index_name: String,
    pub base_url: Option<String>,
}

impl Config {
    /// Resolve the root, read its config file, and apply the flags on top.
    pub fn load(root: &Path, overrides: Overrides) -> Result<Self, ConfigError> {
        let root = RootContext::new(root)?;
        let file = load_config(root.path())?;

        let index_name = overrides.index_name.unwrap_or(file.index_name);
        let base_url = overrides.base_url.or(file.base_url);
        validate_index_name(&index_name)?;
        validate_base_url(base_url.as_deref())?;

        Ok(Self {
            root,
            include_hidden: overrides.hidden.unwrap_or(file.hidden),
            dry_run: overrides.dry_run,
            recursive: overrides.recursive,
            output: if overrides.stdout {
                OutputMode::Stdout
            } else {
                OutputMode::File
            },
            index_name,
            base_url,
        })
    }

    pub fn collect_options(&self) -> CollectOptions<'_> {
        CollectOptions {
            include_hidden: self.include_hidden,
            index_name: &self.index_name,
            base_url: self.base_url.as_deref(),
        }
    }
}
