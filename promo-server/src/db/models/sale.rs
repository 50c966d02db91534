//! Sale Model

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// Promoter sale record. Immutable once created - `bonus_amount` is the value
/// computed at creation time and is never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    pub id: Option<RecordId>,
    pub promoter: RecordId,
    pub store: RecordId,
    pub product: RecordId,
    pub memory_gb: Option<i64>,
    pub sale_date: NaiveDate,
    pub quantity: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub bonus_amount: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SaleCreate {
    pub promoter_id: String,
    pub store_id: String,
    pub product_id: String,
    pub memory_gb: Option<i64>,
    pub sale_date: NaiveDate,
    #[validate(range(min = 1))]
    pub quantity: i64,
}
