//! Player records and their file-backed store.

pub mod locks;
pub mod names;
pub mod store;
pub mod types;

pub use locks::PlayerLocks;
pub use names::validate_name;
pub use store::PlayerStore;
pub use types::*;
