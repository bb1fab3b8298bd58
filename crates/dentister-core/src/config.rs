//! Application configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "dentister";

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Cannot determine {0} directory")]
    NoDirectory(&'static str),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Database file; defaults to the platform data directory
    pub database_path: Option<PathBuf>,
    pub dialer: DialerConfig,
}

/// Phone dialer settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DialerConfig {
    pub enabled: bool,
    /// adb executable, looked up on PATH when not absolute
    pub adb_path: String,
    /// Replaces the leading 0 of local numbers
    pub country_code: String,
}

impl Default for DialerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            adb_path: "adb".to_string(),
            country_code: "+964".to_string(),
        }
    }
}

/// `<config_dir>/dentister/config.toml`
pub fn default_config_path() -> ConfigResult<PathBuf> {
    let dir = dirs::config_dir().ok_or(ConfigError::NoDirectory("config"))?;
    Ok(dir.join(APP_NAME).join("config.toml"))
}

/// `<data_dir>/dentister/dentister.db`
pub fn default_database_path() -> ConfigResult<PathBuf> {
    let dir = dirs::data_dir().ok_or(ConfigError::NoDirectory("data"))?;
    Ok(dir.join(APP_NAME).join(format!("{}.db", APP_NAME)))
}

impl Config {
    /// Load from `path`, or the default location when `None`.
    ///
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => default_config_path()?,
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Resolved database location.
    pub fn database_path(&self) -> ConfigResult<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => default_database_path(),
        }
    }
}

/// Create the parent directory of the database file if needed.
pub fn ensure_db_dir(db_path: &Path) -> ConfigResult<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}
