use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

use crate::core::constants::SPENT_FIELD;

/// A player's persisted state.
///
/// Field names and order on disk are `name`, `balance`, `SPENT`, `inventory`,
/// matching records written by earlier versions of the game. Any other keys
/// found in a record are carried in `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "whole_coins")]
    pub balance: u64,
    #[serde(rename = "SPENT", default, deserialize_with = "whole_coins")]
    pub total_spent: u64,
    #[serde(default)]
    pub inventory: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PlayerRecord {
    pub fn new(name: impl Into<String>, starting_balance: u64) -> Self {
        Self {
            name: name.into(),
            balance: starting_balance,
            total_spent: 0,
            inventory: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn can_afford(&self, cost: u64) -> bool {
        self.balance >= cost
    }
}

/// Coin amounts: non-negative integers, or non-negative finite floats
/// truncated toward zero. Negative amounts and non-numbers are rejected.
fn whole_coins<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let n = Number::deserialize(deserializer)?;
    if let Some(v) = n.as_u64() {
        return Ok(v);
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f >= 0.0 => Ok(f.trunc() as u64),
        _ => Err(D::Error::custom(format!(
            "expected a non-negative coin amount, got {}",
            n
        ))),
    }
}

/// Leaderboard projection of one stored record.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSummary {
    /// Storage identifier (file stem), not the `name` field inside the record
    pub name: String,
    /// Untruncated; ranking compares the full value
    pub total_spent: f64,
}

/// Reads `SPENT` from a raw record, tolerating whatever was hand-edited in.
///
/// Numbers and numeric strings keep their fraction; anything else, including
/// non-finite values, counts as 0.
pub fn lenient_spent(record: &Value) -> f64 {
    let spent = match record.get(SPENT_FIELD) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        Some(Value::Bool(b)) => f64::from(u8::from(*b)),
        _ => 0.0,
    };
    if spent.is_finite() {
        spent
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialized_field_names_and_order() {
        let mut record = PlayerRecord::new("alice", 1000);
        record.total_spent = 50;
        record.inventory.push("Sword".to_string());

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"name":"alice","balance":1000,"SPENT":50,"inventory":["Sword"]}"#
        );
    }

    #[test]
    fn test_missing_fields_default() {
        let record: PlayerRecord = serde_json::from_str(r#"{"name": "bob"}"#).unwrap();
        assert_eq!(record, PlayerRecord::new("bob", 0));
    }

    #[test]
    fn test_extra_fields_survive_round_trip() {
        let record: PlayerRecord = serde_json::from_str(
            r#"{"name": "c", "balance": 3, "SPENT": 4, "inventory": [], "level": 9, "email": "c@x"}"#,
        )
        .unwrap();
        assert_eq!(record.balance, 3);
        assert_eq!(record.total_spent, 4);
        assert_eq!(record.extra.get("level"), Some(&json!(9)));

        let written: Value = serde_json::to_value(&record).unwrap();
        assert_eq!(written["email"], "c@x");
        assert_eq!(written["level"], 9);
        assert_eq!(written["SPENT"], 4);
    }

    #[test]
    fn test_fractional_coins_truncate_on_load() {
        let record: PlayerRecord =
            serde_json::from_str(r#"{"name": "f", "balance": 87.5, "SPENT": 12.7}"#).unwrap();
        assert_eq!(record.balance, 87);
        assert_eq!(record.total_spent, 12);
        assert!(record.extra.is_empty());
    }

    #[test]
    fn test_negative_or_textual_coins_rejected() {
        assert!(serde_json::from_str::<PlayerRecord>(r#"{"balance": -5}"#).is_err());
        assert!(serde_json::from_str::<PlayerRecord>(r#"{"SPENT": -0.5}"#).is_err());
        assert!(serde_json::from_str::<PlayerRecord>(r#"{"balance": "100"}"#).is_err());
    }

    #[test]
    fn test_can_afford() {
        let record = PlayerRecord::new("d", 100);
        assert!(record.can_afford(100));
        assert!(!record.can_afford(101));
    }

    #[test]
    fn test_lenient_spent() {
        assert_eq!(lenient_spent(&json!({"SPENT": 500})), 500.0);
        assert_eq!(lenient_spent(&json!({"SPENT": 12.7})), 12.7);
        assert_eq!(lenient_spent(&json!({"SPENT": "40"})), 40.0);
        assert_eq!(lenient_spent(&json!({"SPENT": "40.9"})), 40.9);
        assert_eq!(lenient_spent(&json!({"SPENT": "lots"})), 0.0);
        assert_eq!(lenient_spent(&json!({"SPENT": "inf"})), 0.0);
        assert_eq!(lenient_spent(&json!({"SPENT": null})), 0.0);
        assert_eq!(lenient_spent(&json!({"SPENT": -3})), -3.0);
        assert_eq!(lenient_spent(&json!({})), 0.0);
    }
}
