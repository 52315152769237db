use std::collections::BTreeMap;

use serde::Serialize;

/// One weighted outcome of a lootbox.
///
/// `item` is `None` for entries whose label was missing or blank in the
/// catalog record. Such entries keep their weight but award nothing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrizeEntry {
    pub item: Option<String>,
    pub chance: f64,
}

impl PrizeEntry {
    pub fn new(item: impl Into<String>, chance: f64) -> Self {
        Self {
            item: Some(item.into()),
            chance,
        }
    }

    pub fn blank(chance: f64) -> Self {
        Self { item: None, chance }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LootboxDefinition {
    pub name: String,
    pub cost: u64,
    /// Draw order matters: the first entry whose running total reaches the
    /// roll wins.
    pub items: Vec<PrizeEntry>,
}

impl LootboxDefinition {
    pub fn new(name: impl Into<String>, cost: u64, items: Vec<PrizeEntry>) -> Self {
        Self {
            name: name.into(),
            cost,
            items,
        }
    }

    /// Sum of all declared chances. Not required to be 1.0.
    pub fn total_chance(&self) -> f64 {
        self.items.iter().map(|e| e.chance).sum()
    }

    /// Probability mass that falls through to the last entry when the
    /// declared chances sum to less than 1.0.
    pub fn fallback_mass(&self) -> f64 {
        if self.items.is_empty() {
            return 0.0;
        }
        (1.0 - self.total_chance()).clamp(0.0, 1.0)
    }
}

/// Lootboxes keyed by name, iterated in name order.
pub type Catalog = BTreeMap<String, LootboxDefinition>;
