use serde::Serialize;

/// Result of a successful lootbox purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenOutcome {
    pub lootbox: String,
    pub cost: u64,
    pub prize: Option<String>,
    pub new_balance: u64,
}
