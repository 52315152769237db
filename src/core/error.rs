//! Error types for the economy engine.
//!
//! `CatalogError` never escapes the catalog loader: bad records are logged and
//! skipped. `EconomyError` is what callers of the store and the purchase flow
//! see. Presentation code turns these into user-facing text.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A single catalog record that could not be used.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog record {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse catalog record {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("catalog record {path:?} is not a JSON object")]
    NotAnObject { path: PathBuf },
    #[error("catalog record {path:?} has no name")]
    MissingName { path: PathBuf },
}

#[derive(Debug, Error)]
pub enum EconomyError {
    #[error("unknown lootbox '{0}'")]
    UnknownLootbox(String),
    #[error("unknown player '{0}'")]
    UnknownPlayer(String),
    #[error("insufficient funds: balance {balance}, cost {cost}")]
    InsufficientFunds { balance: u64, cost: u64 },
    #[error("player '{0}' already exists")]
    PlayerAlreadyExists(String),
    #[error("invalid player name '{name}': {reason}")]
    InvalidPlayerName { name: String, reason: String },
    #[error("failed to read player record {path:?}: {source}")]
    StoreRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write player record {path:?}: {source}")]
    StoreWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl EconomyError {
    pub(crate) fn store_read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::StoreRead {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn store_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::StoreWrite {
            path: path.into(),
            source,
        }
    }

    /// True for failures caused by the caller's request rather than the disk.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::StoreRead { .. } | Self::StoreWrite { .. })
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: String, value: String },
}
