//! Inventory API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;
use serde::Deserialize;
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{Inventory, InventoryUpsert};
use crate::db::repository::{
    self, InventoryRepository, RegionRepository, StoreRepository,
};
use crate::freshness::{self, LastUpdate};
use crate::utils::{AppError, AppResponse, AppResult, ok};

#[derive(Deserialize)]
pub struct InventoryFilter {
    pub store_id: Option<String>,
}

/// GET /api/inventory
pub async fn list(
    State(state): State<ServerState>,
    Query(filter): Query<InventoryFilter>,
) -> AppResult<Json<AppResponse<Vec<Inventory>>>> {
    let store = filter
        .store_id
        .as_deref()
        .map(|id| repository::record_id(repository::geo::STORE_TABLE, id))
        .transpose()?;
    let rows = InventoryRepository::new(state.db.clone())
        .find_all(store)
        .await?;
    Ok(ok(rows))
}

/// POST /api/inventory/upsert
pub async fn upsert(
    State(state): State<ServerState>,
    Json(payload): Json<InventoryUpsert>,
) -> AppResult<Json<AppResponse<Inventory>>> {
    payload.validate()?;
    let row = InventoryRepository::new(state.db.clone())
        .upsert(payload)
        .await?;
    Ok(ok(row))
}

#[derive(Deserialize)]
pub struct LastUpdatesQuery {
    #[serde(default = "default_scope")]
    pub scope: String,
}

fn default_scope() -> String {
    "store".to_string()
}

/// GET /api/inventory/last-updates?scope=store|region
///
/// Freshness per store, or per region folded as the max across its stores.
/// Entities without any inventory row at all come back red.
pub async fn last_updates(
    State(state): State<ServerState>,
    Query(query): Query<LastUpdatesQuery>,
) -> AppResult<Json<AppResponse<Vec<LastUpdate>>>> {
    let inventory = InventoryRepository::new(state.db.clone());

    let (entities, rows) = match query.scope.as_str() {
        "region" => {
            let regions = RegionRepository::new(state.db.clone()).find_all().await?;
            let entities = regions.into_iter().filter_map(|r| r.id).collect();
            (entities, inventory.update_rows_by_region().await?)
        }
        "store" => {
            let stores = StoreRepository::new(state.db.clone()).find_all().await?;
            let entities = stores.into_iter().filter_map(|s| s.id).collect();
            (entities, inventory.update_rows_by_store().await?)
        }
        other => {
            return Err(AppError::validation(format!(
                "Unknown scope '{other}', expected store or region"
            )));
        }
    };

    let rows = rows.into_iter().map(|r| (r.entity, r.updated_at)).collect();
    Ok(ok(freshness::report(entities, rows, Utc::now())))
}
