//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\tunedeck\config.toml
//! - macOS: ~/Library/Application Support/tunedeck/config.toml
//! - Linux: ~/.config/tunedeck/config.toml
//!
//! The config file is human-readable and editable. Settings are loaded
//! once at startup; every component receives the resulting [`Config`] and
//! [`Paths`] by reference instead of reading globals.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API credentials (keep separate for potential future encryption)
    pub credentials: Credentials,

    /// Catalog endpoint settings
    pub catalog: CatalogConfig,

    /// External player settings
    pub player: PlayerConfig,

    /// Storage locations
    pub storage: StorageConfig,
}

/// API credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// Bearer token for authenticated catalog requests.
    /// When absent, all requests run in guest mode.
    pub auth_token: Option<String>,
}

/// Catalog endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Base URL of the Invidious-compatible API
    pub api_base: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_base: "https://yewtu.be".to_string(),
        }
    }
}

/// External player settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Player binary to invoke (empty = probe for mpv, then vlc)
    pub command: Option<String>,

    /// Extra arguments passed before the source
    pub args: Vec<String>,
}

/// Storage locations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Data directory override (favorites DB, downloads, history).
    /// Defaults to the OS data dir.
    pub data_dir: Option<PathBuf>,
}

/// Filesystem locations derived from the configuration.
///
/// Constructed once at startup and passed to each component.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root data directory
    pub data_dir: PathBuf,
    /// Favorites SQLite database
    pub favorites_db: PathBuf,
    /// Directory holding cached audio files
    pub downloads_dir: PathBuf,
    /// Append-only play history log
    pub history_file: PathBuf,
}

impl Paths {
    /// Derive all paths from the config, falling back to the OS data dir.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let data_dir = match &config.storage.data_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_dir()
                .ok_or(ConfigError::NoDataDir)?
                .join("tunedeck"),
        };
        Ok(Self {
            favorites_db: data_dir.join("favorites.db"),
            downloads_dir: data_dir.join("downloads"),
            history_file: data_dir.join("play_history.txt"),
            data_dir,
        })
    }

    /// Ensure the data and downloads directories exist.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(&self.downloads_dir)?;
        Ok(())
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tunedeck"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from disk
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };

    if !path.exists() {
        tracing::debug!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(&path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Save configuration to disk
///
/// Creates the config directory if it doesn't exist.
pub fn save(config: &Config) -> Result<(), ConfigError> {
    let dir = config_dir().ok_or(ConfigError::NoConfigDir)?;
    let path = dir.join("config.toml");

    // Ensure directory exists
    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::CreateDir(dir.clone(), e))?;

    // Serialize to pretty TOML
    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, &path)
        .map_err(|e| ConfigError::Rename(temp_path, path.clone(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Could not determine data directory")]
    NoDataDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================
