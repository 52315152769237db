use std::path::{Path, PathBuf};

use tracing::debug;

use super::loader::load_catalog;
use super::types::{Catalog, LootboxDefinition};

/// Explicit, invalidatable cache over a catalog directory.
///
/// Owned by whoever needs the catalog; there is no process-wide copy.
#[derive(Debug)]
pub struct CatalogHandle {
    dir: PathBuf,
    cached: Option<Catalog>,
}

impl CatalogHandle {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cached: None,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the cached catalog, loading it on first use.
    pub fn catalog(&mut self) -> &Catalog {
        self.cached.get_or_insert_with(|| load_catalog(&self.dir))
    }

    /// Re-reads the directory, replacing any cached catalog.
    pub fn reload(&mut self) -> &Catalog {
        debug!(dir = %self.dir.display(), "reloading catalog");
        self.cached.insert(load_catalog(&self.dir))
    }

    /// Drops the cache; the next `catalog()` call reads from disk.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.cached.is_some()
    }

    pub fn get(&mut self, name: &str) -> Option<&LootboxDefinition> {
        self.catalog().get(name)
    }
}
