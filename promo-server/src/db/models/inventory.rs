//! Inventory Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// Inventory snapshot per (store, product, memory). `memory_gb = None` is a
/// distinct key from `memory_gb = 0`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inventory {
    pub id: Option<RecordId>,
    pub store: RecordId,
    pub product: RecordId,
    pub memory_gb: Option<i64>,
    pub quantity: i64,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InventoryUpsert {
    pub store_id: String,
    pub product_id: String,
    pub memory_gb: Option<i64>,
    #[validate(range(min = 0))]
    pub quantity: i64,
}
