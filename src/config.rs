//! Builder Configuration
//!
//! Loads and saves the builder's configuration from `~/.siteforge/config.json`.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::types::{default_config, BuilderConfig};

/// Config file name within the siteforge directory.
const CONFIG_FILENAME: &str = "config.json";

/// Returns the directory holding the builder's files: `~/.siteforge`.
pub fn get_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".siteforge")
}

/// Returns the full path to the config file: `~/.siteforge/config.json`.
pub fn get_config_path() -> PathBuf {
    get_config_dir().join(CONFIG_FILENAME)
}

/// Load the builder config from disk.
///
/// Reads `~/.siteforge/config.json` and merges missing fields with defaults.
///
/// Returns `None` if the config file does not exist or cannot be parsed.
pub fn load_config() -> Option<BuilderConfig> {
    let config_path = get_config_path();
    if !config_path.exists() {
        return None;
    }

    let contents = fs::read_to_string(&config_path).ok()?;
    let mut config: BuilderConfig = serde_json::from_str(&contents).ok()?;

    // Merge defaults for unset fields
    let defaults = default_config();

    if config.api_url.is_empty() {
        config.api_url = defaults.api_url;
    }
    if config.templates_dir.is_empty() {
        config.templates_dir = defaults.templates_dir;
    }
    if config.output_dir.is_empty() {
        config.output_dir = defaults.output_dir;
    }
    if config.site_types.is_empty() {
        config.site_types = defaults.site_types;
    }
    if config.request_timeout_secs == 0 {
        config.request_timeout_secs = defaults.request_timeout_secs;
    }
    if config.version.is_empty() {
        config.version = defaults.version;
    }

    Some(config)
}

/// Save the builder config to disk at `~/.siteforge/config.json`.
///
/// Creates the siteforge directory if it does not exist.
pub fn save_config(config: &BuilderConfig) -> Result<()> {
    let dir = get_config_dir();
    if !dir.exists() {
        fs::create_dir_all(&dir).context("Failed to create siteforge directory")?;
    }

    let config_path = get_config_path();
    let json = serde_json::to_string_pretty(config).context("Failed to serialize config")?;

    fs::write(&config_path, &json).context("Failed to write config file")?;

    Ok(())
}

/// Resolve a path that may start with `~` to an absolute path.
///
/// If the path starts with `~`, the tilde is replaced with the user's home
/// directory. Otherwise the path is returned as-is.
pub fn resolve_path(p: &str) -> String {
    if let Some(rest) = p.strip_prefix('~') {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/root"));
        let rest = rest.strip_prefix('/').unwrap_or(rest);
        home.join(rest).to_string_lossy().to_string()
    } else {
        p.to_string()
    }
}
