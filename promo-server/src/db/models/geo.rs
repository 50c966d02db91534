//! Network / Region / Store Models

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// Retail network (chain/operator grouping stores)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    pub id: Option<RecordId>,
    /// Short unique code, stored uppercase
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NetworkCreate {
    #[validate(length(min = 1, max = 32))]
    pub code: String,
    #[validate(length(min = 1))]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Geographical region
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    pub id: Option<RecordId>,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegionCreate {
    #[validate(length(min = 1))]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Store bound to a network and a region
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    pub id: Option<RecordId>,
    pub name: String,
    pub network: RecordId,
    pub region: RecordId,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StoreCreate {
    #[validate(length(min = 1))]
    pub name: String,
    /// Record id, `network:xxx`
    pub network_id: String,
    /// Record id, `region:xxx`
    pub region_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<RecordId>,
}
