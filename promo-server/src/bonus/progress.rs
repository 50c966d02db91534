//! Plan progress and projection
//!
//! Pure over (sold, target, calendar). The database aggregation lives in
//! `SaleRepository::sold_quantity`; this module only does the arithmetic.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::time::{month_end, month_start};

/// Progress of a promoter against the monthly plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanProgress {
    pub sold_qty: i64,
    pub target_qty: i64,
    /// `sold / target * 100`, defined as 0 when the target is 0
    pub percent: f64,
    /// Linear month-end extrapolation from days elapsed so far
    pub projection_qty: f64,
}

/// Compute progress for the month containing `month` as seen on `today`.
///
/// Days elapsed is clamped to at least 1 and capped at the month's end, so a
/// fully-elapsed past month projects exactly the sold quantity.
pub fn compute(sold_qty: i64, target_qty: i64, month: NaiveDate, today: NaiveDate) -> PlanProgress {
    let start = month_start(month);
    let end = month_end(month);

    let percent = if target_qty > 0 {
        sold_qty as f64 / target_qty as f64 * 100.0
    } else {
        0.0
    };

    let days_passed = ((today.min(end) - start).num_days() + 1).max(1);
    let total_days = (end - start).num_days() + 1;
    let projection_qty = sold_qty as f64 / days_passed as f64 * total_days as f64;

    PlanProgress {
        sold_qty,
        target_qty,
        percent,
        projection_qty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn percent_is_zero_when_target_is_zero() {
        let p = compute(42, 0, d(2025, 6, 1), d(2025, 6, 15));
        assert_eq!(p.percent, 0.0);
        assert_eq!(p.sold_qty, 42);
    }

    #[test]
    fn percent_110_for_55_of_50() {
        let p = compute(55, 50, d(2025, 6, 1), d(2025, 6, 30));
        assert_eq!(p.percent, 110.0);
    }

    #[test]
    fn past_month_projects_the_actual_sold_quantity() {
        // June fully elapsed by July 10th: days_passed = total_days = 30
        let p = compute(60, 100, d(2025, 6, 1), d(2025, 7, 10));
        assert_eq!(p.projection_qty, 60.0);
    }

    #[test]
    fn mid_month_projection_extrapolates_linearly() {
        // 20 sold in the first 10 of 30 days projects to 60
        let p = compute(20, 100, d(2025, 6, 1), d(2025, 6, 10));
        assert_eq!(p.projection_qty, 60.0);
    }

    #[test]
    fn first_day_of_month_does_not_divide_by_zero() {
        let p = compute(5, 100, d(2025, 6, 1), d(2025, 6, 1));
        assert_eq!(p.projection_qty, 150.0);
    }

    #[test]
    fn today_before_month_start_clamps_to_one_day() {
        let p = compute(0, 100, d(2025, 6, 1), d(2025, 5, 20));
        assert_eq!(p.projection_qty, 0.0);
    }
}
