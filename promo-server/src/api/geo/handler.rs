//! Geography API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{
    Network, NetworkCreate, NetworkUpdate, Region, RegionCreate, RegionUpdate, Store, StoreCreate,
    StoreUpdate,
};
use crate::db::repository::{NetworkRepository, RegionRepository, StoreRepository};
use crate::utils::{AppResponse, AppResult, ok};

// ===== Networks =====

/// GET /api/networks
pub async fn list_networks(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<Network>>>> {
    let networks = NetworkRepository::new(state.db.clone()).find_all().await?;
    Ok(ok(networks))
}

/// POST /api/networks
pub async fn create_network(
    State(state): State<ServerState>,
    Json(payload): Json<NetworkCreate>,
) -> AppResult<Json<AppResponse<Network>>> {
    payload.validate()?;
    let network = NetworkRepository::new(state.db.clone())
        .create(payload)
        .await?;
    Ok(ok(network))
}

/// PUT /api/networks/:id
pub async fn update_network(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<NetworkUpdate>,
) -> AppResult<Json<AppResponse<Network>>> {
    let network = NetworkRepository::new(state.db.clone())
        .update(&id, payload)
        .await?;
    Ok(ok(network))
}

/// DELETE /api/networks/:id
pub async fn delete_network(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let deleted = NetworkRepository::new(state.db.clone()).delete(&id).await?;
    Ok(ok(deleted))
}

// ===== Regions =====

/// GET /api/regions
pub async fn list_regions(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<Region>>>> {
    let regions = RegionRepository::new(state.db.clone()).find_all().await?;
    Ok(ok(regions))
}

/// POST /api/regions
pub async fn create_region(
    State(state): State<ServerState>,
    Json(payload): Json<RegionCreate>,
) -> AppResult<Json<AppResponse<Region>>> {
    payload.validate()?;
    let region = RegionRepository::new(state.db.clone())
        .create(payload)
        .await?;
    Ok(ok(region))
}

/// PUT /api/regions/:id
pub async fn update_region(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<RegionUpdate>,
) -> AppResult<Json<AppResponse<Region>>> {
    let region = RegionRepository::new(state.db.clone())
        .update(&id, payload)
        .await?;
    Ok(ok(region))
}

/// DELETE /api/regions/:id
pub async fn delete_region(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let deleted = RegionRepository::new(state.db.clone()).delete(&id).await?;
    Ok(ok(deleted))
}

// ===== Stores =====

/// GET /api/stores
pub async fn list_stores(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<Store>>>> {
    let stores = StoreRepository::new(state.db.clone()).find_all().await?;
    Ok(ok(stores))
}

/// POST /api/stores
pub async fn create_store(
    State(state): State<ServerState>,
    Json(payload): Json<StoreCreate>,
) -> AppResult<Json<AppResponse<Store>>> {
    payload.validate()?;
    let store = StoreRepository::new(state.db.clone()).create(payload).await?;
    Ok(ok(store))
}

/// PUT /api/stores/:id
pub async fn update_store(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<StoreUpdate>,
) -> AppResult<Json<AppResponse<Store>>> {
    let store = StoreRepository::new(state.db.clone())
        .update(&id, payload)
        .await?;
    Ok(ok(store))
}

/// DELETE /api/stores/:id
pub async fn delete_store(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let deleted = StoreRepository::new(state.db.clone()).delete(&id).await?;
    Ok(ok(deleted))
}
