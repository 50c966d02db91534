//! Bonus and Planning Models
//!
//! Three tables drive the payout engine:
//!
//! - `bonus_network` - per-unit base bonus for (network, product, memory) with
//!   a validity window
//! - `bonus_tier` - flat overachievement bonus for a percent corridor
//! - `promoter_plan` - monthly target quantity per promoter and network

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// Base bonus row. A row with `memory_gb = None` is a wildcard that applies
/// to any memory size when no exact-size row matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BonusNetwork {
    pub id: Option<RecordId>,
    pub network: RecordId,
    pub product: RecordId,
    pub memory_gb: Option<i64>,
    /// Per-unit amount
    #[serde(with = "rust_decimal::serde::float")]
    pub base_bonus: Decimal,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub valid_from: NaiveDate,
    /// Open-ended when absent
    pub valid_to: Option<NaiveDate>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BonusNetworkCreate {
    pub network_id: String,
    pub product_id: String,
    pub memory_gb: Option<i64>,
    #[serde(with = "rust_decimal::serde::float")]
    pub base_bonus: Decimal,
    pub valid_from: Option<NaiveDate>,
    pub valid_to: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BonusNetworkUpdate {
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub base_bonus: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<NaiveDate>,
}

/// Overachievement tier. Corridor is inclusive on both ends; `max_percent`
/// absent means open-ended upward. Overlapping corridors with different
/// bounds are not rejected here - the unique index on (network, min, max)
/// only guards exact duplicates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BonusTier {
    pub id: Option<RecordId>,
    pub network: RecordId,
    pub min_percent: f64,
    pub max_percent: Option<f64>,
    /// Flat amount, not scaled by quantity
    #[serde(with = "rust_decimal::serde::float")]
    pub bonus_amount: Decimal,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BonusTierCreate {
    pub network_id: String,
    #[validate(range(min = 0.0))]
    pub min_percent: f64,
    pub max_percent: Option<f64>,
    #[serde(with = "rust_decimal::serde::float")]
    pub bonus_amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BonusTierUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_percent: Option<f64>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub bonus_amount: Option<Decimal>,
}

/// Monthly target per promoter and network, unique per tuple
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromoterPlan {
    pub id: Option<RecordId>,
    pub promoter: RecordId,
    pub network: RecordId,
    /// First day of the plan month
    pub month_start: NaiveDate,
    pub target_qty: i64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PlanUpsert {
    pub promoter_id: String,
    pub network_id: String,
    pub month_start: NaiveDate,
    #[validate(range(min = 0))]
    pub target_qty: i64,
}
