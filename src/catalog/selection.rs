//! Weighted prize selection.
//!
//! Chances are used exactly as declared, without normalization. A roll that
//! lands past the declared total falls back to the last entry, so an
//! under-summed box still always pays out something.

use rand::Rng;

use super::types::{LootboxDefinition, PrizeEntry};

/// Which entry a roll landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Draw {
    pub index: usize,
    /// True when no running total reached the roll and the last entry was
    /// taken by default.
    pub fallback: bool,
}

/// Walks `items` accumulating chances and returns the first entry whose
/// running total is `>= roll`, else the last entry. `None` only for an empty
/// list.
pub fn draw_index(items: &[PrizeEntry], roll: f64) -> Option<Draw> {
    let mut cumulative = 0.0;
    for (index, entry) in items.iter().enumerate() {
        cumulative += entry.chance;
        if cumulative >= roll {
            return Some(Draw {
                index,
                fallback: false,
            });
        }
    }
    items.len().checked_sub(1).map(|index| Draw {
        index,
        fallback: true,
    })
}

/// Deterministic selection for a known roll in `[0, 1)`.
pub fn select_with_roll(items: &[PrizeEntry], roll: f64) -> Option<&str> {
    draw_index(items, roll).and_then(|draw| items[draw.index].item.as_deref())
}

/// Draws one uniform roll from `rng` and selects a prize from `definition`.
pub fn select_prize<'a, R: Rng + ?Sized>(
    definition: &'a LootboxDefinition,
    rng: &mut R,
) -> Option<&'a str> {
    let roll: f64 = rng.gen();
    select_with_roll(&definition.items, roll)
}

/// Exact probability of each entry being drawn under a uniform roll.
///
/// Entry `i` wins the rolls in `(max(cum_0..cum_{i-1}), cum_i]` clipped to
/// `[0, 1)`; the last entry additionally wins everything above the highest
/// running total.
pub fn effective_odds(items: &[PrizeEntry]) -> Vec<f64> {
    let mut odds = Vec::with_capacity(items.len());
    let mut cumulative = 0.0_f64;
    let mut covered = 0.0_f64;
    for entry in items {
        cumulative += entry.chance;
        let upper = cumulative.min(1.0);
        odds.push((upper - covered).max(0.0));
        covered = covered.max(upper);
    }
    if let Some(last) = odds.last_mut() {
        *last += 1.0 - covered;
    }
    odds
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn weighted() -> Vec<PrizeEntry> {
        vec![
            PrizeEntry::new("first", 0.6),
            PrizeEntry::new("second", 0.3),
            PrizeEntry::new("third", 0.1),
        ]
    }

    #[test]
    fn test_roll_inside_first_band() {
        assert_eq!(select_with_roll(&weighted(), 0.5), Some("first"));
    }

    #[test]
    fn test_roll_on_boundary_is_inclusive() {
        assert_eq!(select_with_roll(&weighted(), 0.6), Some("first"));
    }

    #[test]
    fn test_roll_in_second_band() {
        assert_eq!(select_with_roll(&weighted(), 0.75), Some("second"));
    }

    #[test]
    fn test_high_roll_takes_last_item() {
        assert_eq!(select_with_roll(&weighted(), 0.95), Some("third"));
    }

    #[test]
    fn test_under_summed_distribution_falls_back_to_last() {
        let items = vec![PrizeEntry::new("A", 0.1), PrizeEntry::new("B", 0.1)];
        assert_eq!(select_with_roll(&items, 0.99), Some("B"));
        assert_eq!(
            draw_index(&items, 0.99),
            Some(Draw {
                index: 1,
                fallback: true
            })
        );
    }

    #[test]
    fn test_empty_distribution_never_pays() {
        for roll in [0.0, 0.5, 0.999] {
            assert_eq!(select_with_roll(&[], roll), None);
            assert_eq!(draw_index(&[], roll), None);
        }
    }

    #[test]
    fn test_zero_roll_with_zero_weights_takes_first() {
        let items = vec![PrizeEntry::new("A", 0.0), PrizeEntry::new("B", 0.0)];
        assert_eq!(select_with_roll(&items, 0.0), Some("A"));
    }

    #[test]
    fn test_blank_entry_pays_nothing() {
        let items = vec![PrizeEntry::blank(0.5), PrizeEntry::new("B", 0.5)];
        assert_eq!(select_with_roll(&items, 0.2), None);
        assert_eq!(select_with_roll(&items, 0.7), Some("B"));
    }

    #[test]
    fn test_injected_rng_roll() {
        // StepRng yielding 1 << 63 produces an f64 roll of exactly 0.5.
        let mut rng = StepRng::new(1 << 63, 0);
        let def = LootboxDefinition::new("box", 10, weighted());
        assert_eq!(select_prize(&def, &mut rng), Some("first"));
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let def = LootboxDefinition::new("box", 10, weighted());
        let draws = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            (0..50)
                .map(|_| select_prize(&def, &mut rng).map(str::to_string))
                .collect::<Vec<_>>()
        };
        assert_eq!(draws(42), draws(42));
    }

    fn assert_odds(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "odds {actual:?} != {expected:?}");
        }
    }

    #[test]
    fn test_effective_odds_exact_distribution() {
        assert_odds(&effective_odds(&weighted()), &[0.6, 0.3, 0.1]);
    }

    #[test]
    fn test_effective_odds_under_summed_gives_rest_to_last() {
        let items = vec![PrizeEntry::new("A", 0.1), PrizeEntry::new("B", 0.1)];
        assert_odds(&effective_odds(&items), &[0.1, 0.9]);
    }

    #[test]
    fn test_effective_odds_over_summed_starves_tail() {
        let items = vec![
            PrizeEntry::new("A", 0.7),
            PrizeEntry::new("B", 0.7),
            PrizeEntry::new("C", 0.7),
        ];
        assert_odds(&effective_odds(&items), &[0.7, 0.3, 0.0]);
    }

    #[test]
    fn test_effective_odds_negative_weight() {
        let items = vec![
            PrizeEntry::new("A", 0.5),
            PrizeEntry::new("B", -0.2),
            PrizeEntry::new("C", 0.4),
        ];
        // Running totals 0.5, 0.3, 0.7: B never wins, C wins (0.5, 0.7] plus the fallback.
        assert_odds(&effective_odds(&items), &[0.5, 0.0, 0.5]);
    }

    #[test]
    fn test_effective_odds_empty() {
        assert!(effective_odds(&[]).is_empty());
    }

    #[test]
    fn test_random_draws_always_pay_for_nonempty_box() {
        let def = LootboxDefinition::new(
            "stingy",
            1,
            vec![PrizeEntry::new("A", 0.05), PrizeEntry::new("B", 0.05)],
        );
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            assert!(select_prize(&def, &mut rng).is_some());
        }
    }
}
