//! Configuration file handling for proxyctl
//!
//! Manages loading and saving console configuration from
//! ~/.proxyctl/config.toml and resolving connection settings from
//! multiple sources.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Default backend base URL when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Console configuration stored in ~/.proxyctl/config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Base URL for the proxy management API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl ConsoleConfig {
    /// Get the default configuration file path (~/.proxyctl/config.toml)
    pub fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .context("Unable to determine home directory")?;

        let mut path = PathBuf::from(home);
        path.push(".proxyctl");
        path.push("config.toml");

        Ok(path)
    }

    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from_path(&path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to_path(&path)
    }

    /// Save configuration to a specific path
    pub fn save_to_path(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }
}

/// Resolve the backend base URL from multiple sources
///
/// Checks sources in the following priority order:
/// 1. --base-url command line flag
/// 2. ~/.proxyctl/config.toml
/// 3. PROXYCTL_BASE_URL environment variable
/// 4. Default: http://localhost:8080
pub fn resolve_base_url(base_url_flag: Option<String>) -> String {
    if let Some(url) = base_url_flag {
        debug!("Using base URL from --base-url flag: {}", url);
        return url;
    }

    if let Ok(config) = ConsoleConfig::load() {
        if let Some(url) = config.base_url {
            if !url.is_empty() {
                debug!("Using base URL from config file: {}", url);
                return url;
            }
        }
    }

    if let Ok(url) = std::env::var("PROXYCTL_BASE_URL") {
        if !url.is_empty() {
            debug!("Using base URL from PROXYCTL_BASE_URL environment variable: {}", url);
            return url;
        }
    }

    debug!("Using default base URL: {}", DEFAULT_BASE_URL);
    DEFAULT_BASE_URL.to_string()
}

/// Resolve the request timeout from multiple sources
///
/// Checks sources in the following priority order:
/// 1. --timeout command line flag
/// 2. ~/.proxyctl/config.toml
/// 3. PROXYCTL_TIMEOUT environment variable
/// 4. Default: 30 seconds
pub fn resolve_timeout(timeout_flag: Option<u64>) -> u64 {
    if let Some(timeout) = timeout_flag {
        debug!("Using timeout from --timeout flag: {} seconds", timeout);
        return timeout;
    }

    if let Ok(config) = ConsoleConfig::load() {
        if let Some(timeout) = config.timeout {
            debug!("Using timeout from config file: {} seconds", timeout);
            return timeout;
        }
    }

    if let Ok(raw) = std::env::var("PROXYCTL_TIMEOUT") {
        if let Ok(timeout) = raw.parse::<u64>() {
            debug!("Using timeout from PROXYCTL_TIMEOUT environment variable: {} seconds", timeout);
            return timeout;
        }
    }

    debug!("Using default timeout: {} seconds", DEFAULT_TIMEOUT_SECS);
    DEFAULT_TIMEOUT_SECS
}
