//! Payout calculation

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::db::models::{BonusNetwork, BonusTier};

/// Payout breakdown returned alongside a created sale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BonusCalculation {
    /// Per-unit base bonus scaled by quantity
    #[serde(with = "rust_decimal::serde::float")]
    pub base_bonus: Decimal,
    /// Flat overachievement amount, not scaled by quantity
    #[serde(with = "rust_decimal::serde::float")]
    pub over_bonus: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_bonus: Decimal,
}

/// `total = base * quantity + tier`. Both resolvers may legitimately return
/// nothing, in which case the contribution is zero.
pub fn calculate(
    base: Option<&BonusNetwork>,
    tier: Option<&BonusTier>,
    quantity: i64,
) -> BonusCalculation {
    let base_bonus = base
        .map(|b| b.base_bonus * Decimal::from(quantity))
        .unwrap_or(Decimal::ZERO);
    let over_bonus = tier.map(|t| t.bonus_amount).unwrap_or(Decimal::ZERO);
    BonusCalculation {
        base_bonus,
        over_bonus,
        total_bonus: base_bonus + over_bonus,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use surrealdb::RecordId;

    fn base(amount: i64) -> BonusNetwork {
        BonusNetwork {
            id: None,
            network: RecordId::from_table_key("network", "n1"),
            product: RecordId::from_table_key("product", "p1"),
            memory_gb: Some(128),
            base_bonus: Decimal::from(amount),
            is_active: true,
            valid_from: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            valid_to: None,
        }
    }

    fn tier(amount: i64) -> BonusTier {
        BonusTier {
            id: None,
            network: RecordId::from_table_key("network", "n1"),
            min_percent: 101.0,
            max_percent: Some(110.0),
            bonus_amount: Decimal::from(amount),
        }
    }

    #[test]
    fn base_times_quantity_plus_flat_tier() {
        let calc = calculate(Some(&base(9000)), Some(&tier(20000)), 3);
        assert_eq!(calc.base_bonus, Decimal::from(27000));
        assert_eq!(calc.over_bonus, Decimal::from(20000));
        assert_eq!(calc.total_bonus, Decimal::from(47000));
    }

    #[test]
    fn missing_base_contributes_zero() {
        let calc = calculate(None, Some(&tier(20000)), 5);
        assert_eq!(calc.base_bonus, Decimal::ZERO);
        assert_eq!(calc.total_bonus, Decimal::from(20000));
    }

    #[test]
    fn missing_everything_is_zero_not_an_error() {
        let calc = calculate(None, None, 10);
        assert_eq!(calc.total_bonus, Decimal::ZERO);
    }
}
