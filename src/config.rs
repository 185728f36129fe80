//! Client configuration
//!
//! Loaded from `config.toml` under the platform config directory (e.g.
//! `~/.config/mneme/config.toml`). Every field has a default so a missing
//! or partial file works.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Study service used when no configuration file exists
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000/api";

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_due_limit() -> usize {
    50
}

fn default_page_size() -> usize {
    20
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the study service
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Cards fetched per due-queue load
    #[serde(default = "default_due_limit")]
    pub due_limit: usize,
    /// Rows per page in the card and entry listings
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            due_limit: default_due_limit(),
            page_size: default_page_size(),
        }
    }
}

impl ClientConfig {
    /// Default config file location for this platform
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("mneme").join("config.toml"))
    }

    /// Load from a file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load from the default location
    pub fn load_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }
}
