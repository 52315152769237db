//! File-backed player store: one pretty-printed JSON file per player.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, warn};

use super::locks::PlayerLocks;
use super::names::validate_name;
use super::types::{lenient_spent, PlayerRecord, PlayerSummary};
use crate::core::constants::RECORD_EXTENSION;
use crate::core::error::EconomyError;
use crate::utils::persistence::{json_files_in, read_json, to_pretty_json, write_atomic};

/// Owns the on-disk player records. Callers get detached copies and must hand
/// them back through [`PlayerStore::save`]; nothing is written implicitly.
#[derive(Debug)]
pub struct PlayerStore {
    players_dir: PathBuf,
    locks: PlayerLocks,
}

impl PlayerStore {
    /// Opens the store rooted at `players_dir`, creating the directory if
    /// needed.
    pub fn new(players_dir: impl Into<PathBuf>) -> io::Result<Self> {
        let players_dir = players_dir.into();
        fs::create_dir_all(&players_dir)?;
        Ok(Self {
            players_dir,
            locks: PlayerLocks::new(),
        })
    }

    /// Creates a store in a unique temporary directory.
    #[cfg(test)]
    pub(crate) fn new_for_test() -> io::Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

        let test_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let temp_dir = std::env::temp_dir().join(format!(
            "cardsharp-store-test-{}-{}",
            std::process::id(),
            test_id
        ));
        let _ = fs::remove_dir_all(&temp_dir);
        Self::new(temp_dir)
    }

    pub fn dir(&self) -> &Path {
        &self.players_dir
    }

    /// Storage path for `name`, after validating it as a storage key.
    pub fn record_path(&self, name: &str) -> Result<PathBuf, EconomyError> {
        validate_name(name).map_err(|reason| EconomyError::InvalidPlayerName {
            name: name.to_string(),
            reason,
        })?;
        Ok(self
            .players_dir
            .join(format!("{}.{}", name, RECORD_EXTENSION)))
    }

    /// Writes a fresh record for `name`. Never overwrites an existing one.
    pub fn create(&self, name: &str, starting_balance: u64) -> Result<(), EconomyError> {
        let path = self.record_path(name)?;
        let record = PlayerRecord::new(name, starting_balance);
        let bytes = to_pretty_json(&record).map_err(|e| EconomyError::store_write(&path, e))?;

        self.with_lock(name, || {
            let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => file,
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    return Err(EconomyError::PlayerAlreadyExists(name.to_string()));
                }
                Err(e) => return Err(EconomyError::store_write(&path, e)),
            };
            if let Err(e) = file.write_all(&bytes).and_then(|_| file.sync_all()) {
                drop(file);
                let _ = fs::remove_file(&path);
                return Err(EconomyError::store_write(&path, e));
            }
            Ok(())
        })?;

        info!(player = name, balance = starting_balance, "created player");
        Ok(())
    }

    pub fn exists(&self, name: &str) -> Result<bool, EconomyError> {
        Ok(self.record_path(name)?.is_file())
    }

    /// Loads the record for `name`, or `None` if there is none.
    ///
    /// A record that exists but cannot be read or decoded is an error, not
    /// an absence.
    pub fn load(&self, name: &str) -> Result<Option<PlayerRecord>, EconomyError> {
        let path = self.record_path(name)?;
        if !path.exists() {
            return Ok(None);
        }

        let mut record: PlayerRecord =
            read_json(&path).map_err(|e| EconomyError::store_read(&path, e))?;
        if record.name.is_empty() {
            record.name = name.to_string();
        }
        Ok(Some(record))
    }

    /// Overwrites the record for `name`. The replacement is atomic: a failed
    /// write leaves the previous record intact.
    pub fn save(&self, name: &str, record: &PlayerRecord) -> Result<(), EconomyError> {
        let path = self.record_path(name)?;
        let bytes = to_pretty_json(record).map_err(|e| EconomyError::store_write(&path, e))?;
        write_atomic(&path, &bytes).map_err(|e| EconomyError::store_write(&path, e))?;
        debug!(player = name, balance = record.balance, "saved player");
        Ok(())
    }

    /// Load, modify and save `name` under its lock.
    ///
    /// Nothing is written when `apply` fails, so an error leaves the stored
    /// record exactly as it was. Invalid or unknown names are turned away
    /// before a lock slot is allocated for them.
    pub fn update<T, F>(&self, name: &str, apply: F) -> Result<T, EconomyError>
    where
        F: FnOnce(&mut PlayerRecord) -> Result<T, EconomyError>,
    {
        if !self.record_path(name)?.is_file() {
            return Err(EconomyError::UnknownPlayer(name.to_string()));
        }
        self.with_lock(name, || {
            let mut record = self
                .load(name)?
                .ok_or_else(|| EconomyError::UnknownPlayer(name.to_string()))?;
            let out = apply(&mut record)?;
            self.save(name, &record)?;
            Ok(out)
        })
    }

    /// Summaries of every readable record, in file-name order. Unreadable
    /// records are logged and skipped.
    pub fn list_all(&self) -> Result<Vec<PlayerSummary>, EconomyError> {
        let files = json_files_in(&self.players_dir)
            .map_err(|e| EconomyError::store_read(&self.players_dir, e))?;

        let mut players = Vec::with_capacity(files.len());
        for path in files {
            let raw: Value = match read_json(&path) {
                Ok(raw) => raw,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable player record");
                    continue;
                }
            };
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            players.push(PlayerSummary {
                name: name.to_string(),
                total_spent: lenient_spent(&raw),
            });
        }
        Ok(players)
    }

    /// Runs `f` while holding the per-player lock for `name`.
    pub fn with_lock<T>(&self, name: &str, f: impl FnOnce() -> T) -> T {
        self.locks.with_lock(name, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleanup(store: &PlayerStore) {
        fs::remove_dir_all(store.dir()).ok();
    }

    #[test]
    fn test_create_then_load() {
        let store = PlayerStore::new_for_test().unwrap();
        store.create("alice", 1000).unwrap();

        let record = store.load("alice").unwrap().expect("record should exist");
        assert_eq!(record, PlayerRecord::new("alice", 1000));
        assert!(store.exists("alice").unwrap());

        cleanup(&store);
    }

    #[test]
    fn test_create_twice_keeps_first_record() {
        let store = PlayerStore::new_for_test().unwrap();
        store.create("alice", 1000).unwrap();

        let mut record = store.load("alice").unwrap().unwrap();
        record.balance = 400;
        record.inventory.push("Hat".to_string());
        store.save("alice", &record).unwrap();

        let result = store.create("alice", 1000);
        assert!(matches!(result, Err(EconomyError::PlayerAlreadyExists(n)) if n == "alice"));
        assert_eq!(store.load("alice").unwrap().unwrap(), record);

        cleanup(&store);
    }

    #[test]
    fn test_load_missing_is_none() {
        let store = PlayerStore::new_for_test().unwrap();
        assert!(store.load("nobody").unwrap().is_none());
        assert!(!store.exists("nobody").unwrap());
        cleanup(&store);
    }

    #[test]
    fn test_load_corrupt_is_error() {
        let store = PlayerStore::new_for_test().unwrap();
        fs::write(store.dir().join("broken.json"), "{ not json").unwrap();

        let err = store.load("broken").unwrap_err();
        match err {
            EconomyError::StoreRead { source, .. } => {
                assert_eq!(source.kind(), io::ErrorKind::InvalidData)
            }
            other => panic!("expected StoreRead, got {other:?}"),
        }

        cleanup(&store);
    }

    #[test]
    fn test_load_negative_balance_is_error() {
        let store = PlayerStore::new_for_test().unwrap();
        fs::write(
            store.dir().join("debtor.json"),
            r#"{"name": "debtor", "balance": -5, "SPENT": 0, "inventory": []}"#,
        )
        .unwrap();

        assert!(matches!(
            store.load("debtor"),
            Err(EconomyError::StoreRead { .. })
        ));

        cleanup(&store);
    }

    #[test]
    fn test_load_fills_missing_name_from_key() {
        let store = PlayerStore::new_for_test().unwrap();
        fs::write(store.dir().join("anon.json"), r#"{"balance": 5}"#).unwrap();

        let record = store.load("anon").unwrap().unwrap();
        assert_eq!(record.name, "anon");
        assert_eq!(record.balance, 5);

        cleanup(&store);
    }

    #[test]
    fn test_save_is_idempotent_and_uses_spent_key() {
        let store = PlayerStore::new_for_test().unwrap();
        let mut record = PlayerRecord::new("carol", 900);
        record.total_spent = 100;

        store.save("carol", &record).unwrap();
        store.save("carol", &record).unwrap();

        let raw = fs::read_to_string(store.dir().join("carol.json")).unwrap();
        assert!(raw.contains("\"SPENT\": 100"));
        assert!(raw.starts_with("{\n    \"name\""));
        assert_eq!(store.load("carol").unwrap().unwrap(), record);

        cleanup(&store);
    }

    #[test]
    fn test_invalid_names_never_touch_disk() {
        let store = PlayerStore::new_for_test().unwrap();
        for name in ["", "../escape", "a/b", " padded "] {
            assert!(matches!(
                store.create(name, 10),
                Err(EconomyError::InvalidPlayerName { .. })
            ));
            assert!(matches!(
                store.load(name),
                Err(EconomyError::InvalidPlayerName { .. })
            ));
        }
        assert!(json_files_in(store.dir()).unwrap().is_empty());
        cleanup(&store);
    }

    #[test]
    fn test_update_saves_on_success_only() {
        let store = PlayerStore::new_for_test().unwrap();
        store.create("dave", 100).unwrap();

        store
            .update("dave", |r| {
                r.balance -= 30;
                Ok(())
            })
            .unwrap();
        assert_eq!(store.load("dave").unwrap().unwrap().balance, 70);

        let result: Result<(), _> = store.update("dave", |r| {
            r.balance = 0;
            Err(EconomyError::InsufficientFunds {
                balance: 70,
                cost: 500,
            })
        });
        assert!(result.is_err());
        assert_eq!(store.load("dave").unwrap().unwrap().balance, 70);

        cleanup(&store);
    }

    #[test]
    fn test_update_unknown_player() {
        let store = PlayerStore::new_for_test().unwrap();
        let result = store.update("ghost", |_| Ok(()));
        assert!(matches!(result, Err(EconomyError::UnknownPlayer(n)) if n == "ghost"));
        cleanup(&store);
    }

    #[test]
    fn test_rejected_updates_allocate_no_lock_slots() {
        let store = PlayerStore::new_for_test().unwrap();
        for name in ["../escape", "", "ghost", "phantom"] {
            assert!(store.update(name, |_| Ok(())).is_err());
        }
        assert_eq!(store.locks.tracked(), 0);

        store.create("real", 10).unwrap();
        store
            .update("real", |r| {
                r.balance = 5;
                Ok(())
            })
            .unwrap();
        assert_eq!(store.locks.tracked(), 1);

        cleanup(&store);
    }

    #[test]
    fn test_update_keeps_unknown_keys_and_fractional_coins_load() {
        let store = PlayerStore::new_for_test().unwrap();
        fs::write(
            store.dir().join("vet.json"),
            r#"{"name": "vet", "balance": 100.5, "SPENT": 12.7, "inventory": [], "email": "v@x", "level": 3}"#,
        )
        .unwrap();

        store
            .update("vet", |r| {
                r.balance -= 10;
                r.total_spent += 10;
                Ok(())
            })
            .unwrap();

        let raw: Value = read_json(&store.dir().join("vet.json")).unwrap();
        assert_eq!(raw["email"], "v@x");
        assert_eq!(raw["level"], 3);
        assert_eq!(raw["balance"], 90);
        assert_eq!(raw["SPENT"], 22);

        cleanup(&store);
    }

    #[test]
    fn test_list_all_skips_corrupt_records() {
        let store = PlayerStore::new_for_test().unwrap();
        store.create("erin", 10).unwrap();
        fs::write(store.dir().join("zed.json"), "garbage").unwrap();
        fs::write(
            store.dir().join("frank.json"),
            r#"{"name": "frank", "SPENT": "oops"}"#,
        )
        .unwrap();

        let players = store.list_all().unwrap();
        assert_eq!(
            players,
            vec![
                PlayerSummary {
                    name: "erin".to_string(),
                    total_spent: 0.0
                },
                PlayerSummary {
                    name: "frank".to_string(),
                    total_spent: 0.0
                },
            ]
        );

        cleanup(&store);
    }
}
