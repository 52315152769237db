//! The purchase flow: spend, draw, award.

pub mod logic;
pub mod types;

pub use logic::Economy;
pub use types::OpenOutcome;
