//! Base bonus and tier selection
//!
//! Pure functions over already-fetched candidate rows. Absence of a match is
//! a normal zero-value outcome, never an error.

use crate::db::models::{BonusNetwork, BonusTier};

/// Pick the base-bonus row for a requested memory size.
///
/// An exact memory match always outranks a wildcard (`memory_gb = None`) row.
/// Candidates are assumed pre-filtered by network, product, active flag and
/// validity window.
pub fn pick_base(candidates: &[BonusNetwork], memory_gb: Option<i64>) -> Option<&BonusNetwork> {
    if let Some(exact) = candidates.iter().find(|b| b.memory_gb == memory_gb) {
        return Some(exact);
    }
    candidates.iter().find(|b| b.memory_gb.is_none())
}

/// Pick the tier whose corridor contains `percent`.
///
/// Bounds are inclusive on both ends, an absent `max_percent` is open-ended
/// upward. Corridors are expected not to overlap; if they do, the first row
/// wins and the order is unspecified.
pub fn pick_tier(tiers: &[BonusTier], percent: f64) -> Option<&BonusTier> {
    tiers
        .iter()
        .find(|t| t.min_percent <= percent && t.max_percent.map_or(true, |max| max >= percent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use surrealdb::RecordId;

    fn rid(table: &str, key: &str) -> RecordId {
        RecordId::from_table_key(table, key)
    }

    fn bonus(memory_gb: Option<i64>, amount: i64) -> BonusNetwork {
        BonusNetwork {
            id: None,
            network: rid("network", "n1"),
            product: rid("product", "p1"),
            memory_gb,
            base_bonus: Decimal::from(amount),
            is_active: true,
            valid_from: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            valid_to: None,
        }
    }

    fn tier(min: f64, max: Option<f64>, amount: i64) -> BonusTier {
        BonusTier {
            id: None,
            network: rid("network", "n1"),
            min_percent: min,
            max_percent: max,
            bonus_amount: Decimal::from(amount),
        }
    }

    #[test]
    fn exact_memory_beats_wildcard() {
        let rows = vec![bonus(None, 5000), bonus(Some(128), 9000)];
        let picked = pick_base(&rows, Some(128)).unwrap();
        assert_eq!(picked.base_bonus, Decimal::from(9000));
    }

    #[test]
    fn wildcard_is_the_fallback() {
        let rows = vec![bonus(Some(256), 7000), bonus(None, 5000)];
        let picked = pick_base(&rows, Some(128)).unwrap();
        assert_eq!(picked.base_bonus, Decimal::from(5000));
    }

    #[test]
    fn none_memory_matches_only_wildcard() {
        let rows = vec![bonus(Some(128), 9000)];
        assert!(pick_base(&rows, None).is_none());

        let rows = vec![bonus(Some(128), 9000), bonus(None, 5000)];
        let picked = pick_base(&rows, None).unwrap();
        assert_eq!(picked.base_bonus, Decimal::from(5000));
    }

    #[test]
    fn no_candidates_no_bonus() {
        assert!(pick_base(&[], Some(64)).is_none());
    }

    #[test]
    fn tier_bounds_are_inclusive() {
        let tiers = vec![tier(101.0, Some(110.0), 20000)];
        assert!(pick_tier(&tiers, 101.0).is_some());
        assert!(pick_tier(&tiers, 110.0).is_some());
        assert!(pick_tier(&tiers, 100.9).is_none());
        assert!(pick_tier(&tiers, 110.1).is_none());
    }

    #[test]
    fn tier_without_max_is_open_ended() {
        let tiers = vec![tier(120.0, None, 50000)];
        assert!(pick_tier(&tiers, 500.0).is_some());
        assert!(pick_tier(&tiers, 119.9).is_none());
    }

    #[test]
    fn percent_110_matches_101_to_110_corridor() {
        let tiers = vec![
            tier(101.0, Some(110.0), 20000),
            tier(111.0, Some(120.0), 30000),
        ];
        let picked = pick_tier(&tiers, 110.0).unwrap();
        assert_eq!(picked.bonus_amount, Decimal::from(20000));
    }
}
