//! Spend leaderboard.

use crate::core::error::EconomyError;
use crate::player::{PlayerStore, PlayerSummary};

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedPlayer {
    /// 1-based
    pub rank: usize,
    pub name: String,
    pub total_spent: f64,
}

impl RankedPlayer {
    /// Whole coins spent; the fraction is dropped for display only.
    pub fn whole_coins(&self) -> i64 {
        self.total_spent.trunc() as i64
    }

    pub fn line(&self) -> String {
        format!(
            "{}. {} - Total Spent: {} coins",
            self.rank,
            self.name,
            self.whole_coins()
        )
    }
}

/// Sorts by the full spend value, highest first. The sort is stable, so ties
/// keep the order they were scanned in.
pub fn rank(mut players: Vec<PlayerSummary>) -> Vec<RankedPlayer> {
    players.sort_by(|a, b| b.total_spent.total_cmp(&a.total_spent));
    players
        .into_iter()
        .enumerate()
        .map(|(i, p)| RankedPlayer {
            rank: i + 1,
            name: p.name,
            total_spent: p.total_spent,
        })
        .collect()
}

/// Ranked rows for every readable record in `store`.
pub fn standings(store: &PlayerStore) -> Result<Vec<RankedPlayer>, EconomyError> {
    Ok(rank(store.list_all()?))
}

/// Leaderboard lines for every readable record in `store`.
pub fn ranking(store: &PlayerStore) -> Result<Vec<String>, EconomyError> {
    Ok(standings(store)?.iter().map(RankedPlayer::line).collect())
}
