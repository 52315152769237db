//! Simulation report generation.

use serde::Serialize;

use super::config::SimConfig;
use super::runner::DrawTally;
use crate::catalog::{effective_odds, LootboxDefinition};

/// Per-entry comparison of declared, exact and observed odds.
#[derive(Debug, Clone, Serialize)]
pub struct OddsRow {
    pub item: Option<String>,
    /// Chance as written in the catalog record
    pub declared: f64,
    /// Exact probability under the selection rules, fallback included
    pub effective: f64,
    pub count: u64,
    pub observed: f64,
}

/// Aggregated results of one simulation run.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub lootbox: String,
    pub cost: u64,
    pub draws: u32,
    pub seed: Option<u64>,
    pub declared_total: f64,
    pub rows: Vec<OddsRow>,
    pub fallbacks: u64,
    pub fallback_rate: f64,
    pub empty_draws: u64,
    /// Coins spent per item actually received
    pub cost_per_prize: Option<f64>,
}

impl SimReport {
    pub(super) fn from_tally(
        lootbox: &LootboxDefinition,
        config: &SimConfig,
        tally: DrawTally,
    ) -> Self {
        let draws = config.draws;
        let rate = |n: u64| {
            if draws == 0 {
                0.0
            } else {
                n as f64 / draws as f64
            }
        };

        let effective = effective_odds(&lootbox.items);
        let rows = lootbox
            .items
            .iter()
            .zip(effective)
            .zip(&tally.per_entry)
            .map(|((entry, effective), &count)| OddsRow {
                item: entry.item.clone(),
                declared: entry.chance,
                effective,
                count,
                observed: rate(count),
            })
            .collect();

        let prizes = u64::from(draws).saturating_sub(tally.empty_draws);
        let cost_per_prize =
            (prizes > 0).then(|| lootbox.cost as f64 * f64::from(draws) / prizes as f64);

        Self {
            lootbox: lootbox.name.clone(),
            cost: lootbox.cost,
            draws,
            seed: config.seed,
            declared_total: lootbox.total_chance(),
            rows,
            fallbacks: tally.fallbacks,
            fallback_rate: rate(tally.fallbacks),
            empty_draws: tally.empty_draws,
            cost_per_prize,
        }
    }

    /// Generate a human-readable text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    LOOTBOX ODDS REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Lootbox: {} (cost {} coins)\n",
            self.lootbox, self.cost
        ));
        report.push_str(&format!("Draws:   {}\n", self.draws));
        if let Some(seed) = self.seed {
            report.push_str(&format!("Seed:    {}\n", seed));
        }
        report.push('\n');

        report.push_str("── ODDS ─────────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  {:<24} {:>9} {:>9} {:>9} {:>9}\n",
            "Item", "Declared", "Exact", "Observed", "Count"
        ));
        for row in &self.rows {
            report.push_str(&format!(
                "  {:<24} {:>8.2}% {:>8.2}% {:>8.2}% {:>9}\n",
                row.item.as_deref().unwrap_or("(nothing)"),
                row.declared * 100.0,
                row.effective * 100.0,
                row.observed * 100.0,
                row.count
            ));
        }
        report.push('\n');

        report.push_str("── DISTRIBUTION ─────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Declared total:      {:.4}\n",
            self.declared_total
        ));
        report.push_str(&format!(
            "  Fallback draws:      {} ({:.2}%)\n",
            self.fallbacks,
            self.fallback_rate * 100.0
        ));
        report.push_str(&format!("  Empty draws:         {}\n", self.empty_draws));
        match self.cost_per_prize {
            Some(cost) => report.push_str(&format!("  Coins per prize:     {:.1}\n", cost)),
            None => report.push_str("  Coins per prize:     n/a (never pays)\n"),
        }

        if self.declared_total < 1.0 && !self.rows.is_empty() {
            report.push_str(
                "\n  Note: chances sum below 1.0; the remainder goes to the last item.\n",
            );
        } else if self.declared_total > 1.0 {
            report.push_str(
                "\n  Note: chances sum above 1.0; later items are drawn less than declared.\n",
            );
        }

        report
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PrizeEntry;

    fn report() -> SimReport {
        let def = LootboxDefinition::new(
            "bronze",
            10,
            vec![PrizeEntry::new("A", 0.25), PrizeEntry::blank(0.25)],
        );
        let config = SimConfig {
            lootbox: "bronze".to_string(),
            draws: 100,
            seed: Some(5),
            verbosity: 0,
        };
        let tally = DrawTally {
            per_entry: vec![30, 70],
            fallbacks: 45,
            empty_draws: 70,
        };
        SimReport::from_tally(&def, &config, tally)
    }

    #[test]
    fn test_rates_and_cost_per_prize() {
        let r = report();
        assert!((r.rows[0].observed - 0.3).abs() < 1e-9);
        assert!((r.rows[1].effective - 0.75).abs() < 1e-9);
        assert!((r.fallback_rate - 0.45).abs() < 1e-9);
        // 100 draws * 10 coins / 30 prizes
        assert!((r.cost_per_prize.unwrap() - 1000.0 / 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_text_mentions_fallback_note() {
        let text = report().to_text();
        assert!(text.contains("bronze"));
        assert!(text.contains("(nothing)"));
        assert!(text.contains("remainder goes to the last item"));
    }

    #[test]
    fn test_json_has_rows() {
        let json: serde_json::Value = serde_json::from_str(&report().to_json()).unwrap();
        assert_eq!(json["rows"].as_array().unwrap().len(), 2);
        assert_eq!(json["seed"], 5);
    }
}
