//! Simulation configuration.

use crate::core::constants::DEFAULT_SIM_DRAWS;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Name of the lootbox to draw from
    pub lootbox: String,

    /// Number of draws to perform
    pub draws: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Log verbosity (0 = silent, 1 = summary, 2 = every draw)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            lootbox: String::new(),
            draws: DEFAULT_SIM_DRAWS,
            seed: None,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick seeded config for smoke-testing a catalog change
    pub fn quick(lootbox: impl Into<String>) -> Self {
        Self {
            lootbox: lootbox.into(),
            draws: 10_000,
            seed: Some(42),
            ..Default::default()
        }
    }
}
