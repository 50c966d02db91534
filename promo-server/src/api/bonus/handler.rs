//! Bonus API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::bonus::import::{self, ImportSummary};
use crate::core::ServerState;
use crate::db::models::{
    BonusNetwork, BonusNetworkCreate, BonusNetworkUpdate, BonusTier, BonusTierCreate,
    BonusTierUpdate,
};
use crate::db::repository::{self, BonusNetworkRepository, BonusTierRepository};
use crate::utils::time::today_in;
use crate::utils::{AppResponse, AppResult, ok};

#[derive(Deserialize)]
pub struct ActiveBonusQuery {
    pub network_id: String,
    pub product_id: String,
    pub memory_gb: Option<i64>,
    pub date: NaiveDate,
}

/// GET /api/bonus/networks - the base bonus applicable on a date
pub async fn active_bonus(
    State(state): State<ServerState>,
    Query(query): Query<ActiveBonusQuery>,
) -> AppResult<Json<AppResponse<Option<BonusNetwork>>>> {
    let network = repository::record_id(repository::geo::NETWORK_TABLE, &query.network_id)?;
    let product = repository::record_id(repository::product::TABLE, &query.product_id)?;
    let bonus = state
        .engine
        .active_bonus(&network, &product, query.memory_gb, query.date)
        .await?;
    Ok(ok(bonus))
}

#[derive(Deserialize)]
pub struct NetworkFilter {
    pub network_id: Option<String>,
}

/// GET /api/bonus/networks/all
pub async fn list_bonuses(
    State(state): State<ServerState>,
    Query(filter): Query<NetworkFilter>,
) -> AppResult<Json<AppResponse<Vec<BonusNetwork>>>> {
    let network = filter
        .network_id
        .as_deref()
        .map(|id| repository::record_id(repository::geo::NETWORK_TABLE, id))
        .transpose()?;
    let bonuses = BonusNetworkRepository::new(state.db.clone())
        .find_all(network)
        .await?;
    Ok(ok(bonuses))
}

/// POST /api/bonus/networks
pub async fn create_bonus(
    State(state): State<ServerState>,
    Json(payload): Json<BonusNetworkCreate>,
) -> AppResult<Json<AppResponse<BonusNetwork>>> {
    payload.validate()?;
    let bonus = BonusNetwork {
        id: None,
        network: repository::record_id(repository::geo::NETWORK_TABLE, &payload.network_id)?,
        product: repository::record_id(repository::product::TABLE, &payload.product_id)?,
        memory_gb: payload.memory_gb,
        base_bonus: payload.base_bonus,
        is_active: true,
        valid_from: payload
            .valid_from
            .unwrap_or_else(|| today_in(state.config.reminder_tz)),
        valid_to: payload.valid_to,
    };
    let created = BonusNetworkRepository::new(state.db.clone())
        .create(bonus)
        .await?;
    Ok(ok(created))
}

/// PUT /api/bonus/networks/:id
pub async fn update_bonus(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<BonusNetworkUpdate>,
) -> AppResult<Json<AppResponse<BonusNetwork>>> {
    let updated = BonusNetworkRepository::new(state.db.clone())
        .update(&id, payload)
        .await?;
    Ok(ok(updated))
}

/// DELETE /api/bonus/networks/:id
pub async fn delete_bonus(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let deleted = BonusNetworkRepository::new(state.db.clone())
        .delete(&id)
        .await?;
    Ok(ok(deleted))
}

#[derive(Deserialize)]
pub struct TierQuery {
    pub network_id: String,
}

/// GET /api/bonus/tiers - tiers of a network ordered by lower bound
pub async fn list_tiers(
    State(state): State<ServerState>,
    Query(query): Query<TierQuery>,
) -> AppResult<Json<AppResponse<Vec<BonusTier>>>> {
    let network = repository::record_id(repository::geo::NETWORK_TABLE, &query.network_id)?;
    let tiers = BonusTierRepository::new(state.db.clone())
        .find_by_network(&network)
        .await?;
    Ok(ok(tiers))
}

/// POST /api/bonus/tiers
pub async fn create_tier(
    State(state): State<ServerState>,
    Json(payload): Json<BonusTierCreate>,
) -> AppResult<Json<AppResponse<BonusTier>>> {
    payload.validate()?;
    let tier = BonusTier {
        id: None,
        network: repository::record_id(repository::geo::NETWORK_TABLE, &payload.network_id)?,
        min_percent: payload.min_percent,
        max_percent: payload.max_percent,
        bonus_amount: payload.bonus_amount,
    };
    let created = BonusTierRepository::new(state.db.clone()).create(tier).await?;
    Ok(ok(created))
}

/// PUT /api/bonus/tiers/:id
pub async fn update_tier(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<BonusTierUpdate>,
) -> AppResult<Json<AppResponse<BonusTier>>> {
    let updated = BonusTierRepository::new(state.db.clone())
        .update(&id, payload)
        .await?;
    Ok(ok(updated))
}

/// DELETE /api/bonus/tiers/:id
pub async fn delete_tier(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let deleted = BonusTierRepository::new(state.db.clone()).delete(&id).await?;
    Ok(ok(deleted))
}

#[derive(Deserialize)]
pub struct ImportQuery {
    #[serde(default, alias = "dryRun")]
    pub dry_run: bool,
}

/// POST /api/bonus/import - CSV body, `?dry_run=true` to preview
pub async fn import_csv(
    State(state): State<ServerState>,
    Query(query): Query<ImportQuery>,
    body: String,
) -> AppResult<Json<AppResponse<ImportSummary>>> {
    let items = import::parse_csv(&body)?;
    let today = today_in(state.config.reminder_tz);
    let summary = state
        .engine
        .apply_import(items, query.dry_run, today)
        .await?;
    Ok(ok(summary))
}
