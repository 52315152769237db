//! Lootbox odds simulator for Monte Carlo analysis.
//!
//! Draws a lootbox many times with the real prize selector to check:
//! - Observed rates against declared chances
//! - How often the last-item fallback fires on under-summed boxes
//! - How often a draw pays nothing (empty boxes, blank entries)

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{OddsRow, SimReport};
pub use runner::run_simulation;
