//! Lootbox catalog: definitions, loading, caching and prize selection.

pub mod handle;
pub mod loader;
pub mod selection;
pub mod types;

pub use handle::CatalogHandle;
pub use loader::load_catalog;
pub use selection::{effective_odds, select_prize, select_with_roll};
pub use types::*;
