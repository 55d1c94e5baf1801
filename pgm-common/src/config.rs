//! Configuration loading and root folder resolution
//!
//! Priority order, highest first:
//! 1. Command-line argument
//! 2. Environment variable (`PGM_ROOT_FOLDER`)
//! 3. TOML config file
//! 4. OS-dependent compiled default
//!
//! A missing or unreadable TOML file is not fatal: a warning is logged and
//! defaults are used.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::normalize::DEFAULT_IMAGE_BASE;
use crate::{Error, Result};

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "PGM_ROOT_FOLDER";

/// Database file name inside the root folder
pub const DATABASE_FILE: &str = "programmes.db";

/// Feed file name inside the root folder, used when no feed is configured
pub const DEFAULT_FEED_FILE: &str = "programmes.json";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    /// Folder holding the database and, by default, the feed
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Feed location: file path or http(s) URL
    #[serde(default)]
    pub feed: Option<String>,

    /// Base for rendered image URLs
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            root_folder: None,
            port: default_port(),
            feed: None,
            image_base_url: default_image_base_url(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_port() -> u16 {
    5730
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_image_base_url() -> String {
    DEFAULT_IMAGE_BASE.to_string()
}

impl TomlConfig {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load from `path`, or from the platform config file when `path` is `None`
    ///
    /// Falls back to defaults when the file is missing or malformed.
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path.map(Path::to_path_buf).or_else(default_config_path) {
            Some(path) => path,
            None => {
                warn!("Could not determine config directory, using defaults");
                return Self::default();
            }
        };

        if !path.exists() {
            warn!("Config file {} not found, using defaults", path.display());
            return Self::default();
        }

        match std::fs::read_to_string(&path)
            .map_err(Error::from)
            .and_then(|content| Self::from_toml_str(&content))
        {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load config {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}

/// `~/.config/pgm/config.toml` (platform equivalent elsewhere)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pgm").join("config.toml"))
}

/// Resolve the root folder following the priority order above
pub fn resolve_root_folder(cli_arg: Option<&Path>, config: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &config.root_folder {
        return path.clone();
    }

    default_root_folder()
}

/// OS-dependent default root folder
pub fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("pgm"))
        .unwrap_or_else(|| PathBuf::from("./pgm_data"))
}

pub fn database_path(root_folder: &Path) -> PathBuf {
    root_folder.join(DATABASE_FILE)
}

/// Configured feed location, or the feed file inside the root folder
pub fn feed_location(cli_arg: Option<&str>, config: &TomlConfig, root_folder: &Path) -> String {
    cli_arg
        .map(str::to_string)
        .or_else(|| config.feed.clone())
        .unwrap_or_else(|| root_folder.join(DEFAULT_FEED_FILE).display().to_string())
}
