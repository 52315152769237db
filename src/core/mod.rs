//! Shared plumbing: constants, configuration, errors and logging.

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;

pub use config::EconomyConfig;
pub use constants::*;
pub use error::{CatalogError, ConfigError, EconomyError};
