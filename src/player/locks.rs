//! Per-player mutual exclusion for read-modify-write cycles.
//!
//! Two purchases for the same player must not interleave their load and save,
//! or the second save would clobber the first balance update. Different
//! players never block each other.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
pub struct PlayerLocks {
    slots: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl PlayerLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, name: &str) -> Arc<Mutex<()>> {
        // A panic while holding a lock leaves no partial state behind (the
        // guarded data is `()`), so poisoning is ignored.
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        slots.entry(name.to_string()).or_default().clone()
    }

    /// Runs `f` while holding the lock for `name`.
    pub fn with_lock<T>(&self, name: &str, f: impl FnOnce() -> T) -> T {
        let slot = self.slot(name);
        let _guard = slot.lock().unwrap_or_else(|e| e.into_inner());
        f()
    }

    /// Number of players that have been locked at least once.
    pub fn tracked(&self) -> usize {
        self.slots.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}
