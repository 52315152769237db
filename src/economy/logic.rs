use std::io;

use rand::Rng;
use tracing::{debug, info};

use super::types::OpenOutcome;
use crate::catalog::{select_prize, Catalog};
use crate::core::config::EconomyConfig;
use crate::core::error::EconomyError;
use crate::leaderboard::{self, RankedPlayer};
use crate::player::{PlayerRecord, PlayerStore};

/// Entry point for presentation code: player lifecycle, purchases and the
/// leaderboard over one player store.
#[derive(Debug)]
pub struct Economy {
    store: PlayerStore,
    starting_balance: u64,
}

impl Economy {
    pub fn new(store: PlayerStore, starting_balance: u64) -> Self {
        Self {
            store,
            starting_balance,
        }
    }

    pub fn from_config(config: &EconomyConfig) -> io::Result<Self> {
        let store = PlayerStore::new(&config.players_dir)?;
        Ok(Self::new(store, config.starting_balance))
    }

    pub fn store(&self) -> &PlayerStore {
        &self.store
    }

    pub fn starting_balance(&self) -> u64 {
        self.starting_balance
    }

    pub fn create_player(&self, name: &str) -> Result<(), EconomyError> {
        self.store.create(name, self.starting_balance)
    }

    pub fn player(&self, name: &str) -> Result<Option<PlayerRecord>, EconomyError> {
        self.store.load(name)
    }

    pub fn require_player(&self, name: &str) -> Result<PlayerRecord, EconomyError> {
        self.store
            .load(name)?
            .ok_or_else(|| EconomyError::UnknownPlayer(name.to_string()))
    }

    /// Opens `lootbox_name` on behalf of `player_name`.
    ///
    /// Steps: resolve the lootbox, load the player, check funds, deduct the
    /// cost and add it to total spend, draw a prize, append it to the
    /// inventory, save. The load-to-save span runs under the player's lock.
    /// A rejected purchase (unknown box or player, insufficient funds) writes
    /// nothing.
    pub fn open_lootbox<R: Rng + ?Sized>(
        &self,
        catalog: &Catalog,
        player_name: &str,
        lootbox_name: &str,
        rng: &mut R,
    ) -> Result<OpenOutcome, EconomyError> {
        let lootbox = catalog
            .get(lootbox_name)
            .ok_or_else(|| EconomyError::UnknownLootbox(lootbox_name.to_string()))?;
        let cost = lootbox.cost;

        let outcome = self.store.update(player_name, |record| {
            if !record.can_afford(cost) {
                debug!(
                    player = player_name,
                    balance = record.balance,
                    cost,
                    "purchase rejected"
                );
                return Err(EconomyError::InsufficientFunds {
                    balance: record.balance,
                    cost,
                });
            }

            record.balance -= cost;
            record.total_spent = record.total_spent.saturating_add(cost);

            let prize = select_prize(lootbox, rng).map(str::to_string);
            if let Some(item) = &prize {
                record.inventory.push(item.clone());
            }

            Ok(OpenOutcome {
                lootbox: lootbox.name.clone(),
                cost,
                prize,
                new_balance: record.balance,
            })
        })?;

        info!(
            player = player_name,
            lootbox = lootbox_name,
            cost,
            prize = outcome.prize.as_deref().unwrap_or("-"),
            balance = outcome.new_balance,
            "opened lootbox"
        );
        Ok(outcome)
    }

    /// Formatted ranking lines, highest spender first.
    pub fn leaderboard(&self) -> Result<Vec<String>, EconomyError> {
        leaderboard::ranking(&self.store)
    }

    pub fn standings(&self) -> Result<Vec<RankedPlayer>, EconomyError> {
        leaderboard::standings(&self.store)
    }
}
