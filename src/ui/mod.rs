//! Terminal screens. Rules live in the library; these only render state and
//! translate keys.

pub mod common;
pub mod lootbox_menu;
pub mod main_menu;
pub mod open_result;
pub mod player_create;
pub mod player_select;
pub mod profile;

use cardsharp::core::EconomyError;

/// User-facing text for an economy error.
pub fn describe_error(err: &EconomyError) -> String {
    match err {
        EconomyError::UnknownLootbox(name) => format!("There is no lootbox named '{}'.", name),
        EconomyError::UnknownPlayer(name) => format!("Player '{}' does not exist.", name),
        EconomyError::InsufficientFunds { balance, cost } => format!(
            "Not enough coins: this box costs {} and you have {}.",
            cost, balance
        ),
        EconomyError::PlayerAlreadyExists(name) => {
            format!("A player named '{}' already exists.", name)
        }
        EconomyError::InvalidPlayerName { reason, .. } => reason.clone(),
        EconomyError::StoreRead { .. } | EconomyError::StoreWrite { .. } => {
            format!("Storage problem: {}", err)
        }
    }
}
