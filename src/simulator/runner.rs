//! Simulation runner using the real prize selector.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::config::SimConfig;
use super::report::SimReport;
use crate::catalog::selection::draw_index;
use crate::catalog::LootboxDefinition;

/// Tallies accumulated while drawing.
#[derive(Debug, Default)]
pub(super) struct DrawTally {
    pub per_entry: Vec<u64>,
    pub fallbacks: u64,
    pub empty_draws: u64,
}

/// Draw `config.draws` times from `lootbox` and return a report.
pub fn run_simulation(config: &SimConfig, lootbox: &LootboxDefinition) -> SimReport {
    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let mut tally = DrawTally {
        per_entry: vec![0; lootbox.items.len()],
        ..Default::default()
    };

    for draw_idx in 0..config.draws {
        let roll: f64 = rng.gen();
        match draw_index(&lootbox.items, roll) {
            Some(draw) => {
                tally.per_entry[draw.index] += 1;
                if draw.fallback {
                    tally.fallbacks += 1;
                }
                if lootbox.items[draw.index].item.is_none() {
                    tally.empty_draws += 1;
                }
                if config.verbosity >= 2 {
                    println!(
                        "Draw {}/{} - roll {:.6} -> {}{}",
                        draw_idx + 1,
                        config.draws,
                        roll,
                        lootbox.items[draw.index].item.as_deref().unwrap_or("(nothing)"),
                        if draw.fallback { " [fallback]" } else { "" }
                    );
                }
            }
            None => tally.empty_draws += 1,
        }
    }

    SimReport::from_tally(lootbox, config, tally)
}
