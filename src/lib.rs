//! CardSharp - lootbox economy engine.
//!
//! Catalog loading, weighted prize selection, file-backed player records,
//! purchases and the spend leaderboard. The terminal UI in `main.rs` and the
//! `simulate` binary are thin layers over this library.

pub mod build_info;
pub mod catalog;
pub mod core;
pub mod economy;
pub mod leaderboard;
pub mod player;
pub mod simulator;
pub mod utils;
