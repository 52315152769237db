//! Runtime configuration.
//!
//! Resolution order: built-in defaults, then an optional TOML file, then
//! `CARDSHARP_*` environment variables.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;

use super::constants::*;
use super::error::ConfigError;

#[derive(Debug, Clone, PartialEq)]
pub struct EconomyConfig {
    /// Directory holding one JSON record per lootbox
    pub data_dir: PathBuf,

    /// Directory holding one JSON record per player
    pub players_dir: PathBuf,

    /// Coins granted to newly created players
    pub starting_balance: u64,

    /// tracing level name (trace, debug, info, warn, error)
    pub log_level: String,

    /// Log destination for the interactive UI (None = ~/.cardsharp/cardsharp.log)
    pub log_file: Option<PathBuf>,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            players_dir: PathBuf::from(DEFAULT_PLAYERS_DIR),
            starting_balance: DEFAULT_STARTING_BALANCE,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

/// On-disk shape of the config file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    players_dir: Option<PathBuf>,
    starting_balance: Option<u64>,
    log_level: Option<String>,
    log_file: Option<PathBuf>,
}

impl EconomyConfig {
    /// Loads configuration from `path`, or from the platform config directory
    /// when no path is given, then applies environment overrides.
    ///
    /// A missing file at the default location is not an error. A missing file
    /// at an explicitly requested path is.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => match default_config_path() {
                Some(p) if p.exists() => Self::from_file(&p)?,
                _ => Self::default(),
            },
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        let file: ConfigFile = toml::from_str(contents)?;
        let defaults = Self::default();
        Ok(Self {
            data_dir: file.data_dir.unwrap_or(defaults.data_dir),
            players_dir: file.players_dir.unwrap_or(defaults.players_dir),
            starting_balance: file.starting_balance.unwrap_or(defaults.starting_balance),
            log_level: file.log_level.unwrap_or(defaults.log_level),
            log_file: file.log_file,
        })
    }

    /// Applies `CARDSHARP_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_DATA_DIR) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup(ENV_PLAYERS_DIR) {
            self.players_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup(ENV_STARTING_BALANCE) {
            self.starting_balance = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_STARTING_BALANCE.to_string(),
                value: raw.clone(),
            })?;
        }
        Ok(())
    }

    /// Where the interactive UI writes its log.
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file
            .clone()
            .or_else(|| dirs::home_dir().map(|home| home.join(HOME_DIR_NAME).join(LOG_FILE_NAME)))
    }
}

/// `<platform config dir>/cardsharp.toml`, if the platform has one.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "cardsharp").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
