//! Product API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{Product, ProductCreate, ProductUpdate};
use crate::db::repository::ProductRepository;
use crate::utils::{AppResponse, AppResult, ok};

/// GET /api/products
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<AppResponse<Vec<Product>>>> {
    let products = ProductRepository::new(state.db.clone()).find_all().await?;
    Ok(ok(products))
}

/// POST /api/products
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<AppResponse<Product>>> {
    payload.validate()?;
    let product = ProductRepository::new(state.db.clone())
        .create(payload)
        .await?;
    Ok(ok(product))
}

/// PUT /api/products/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<AppResponse<Product>>> {
    let product = ProductRepository::new(state.db.clone())
        .update(&id, payload)
        .await?;
    Ok(ok(product))
}

/// DELETE /api/products/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let deleted = ProductRepository::new(state.db.clone()).delete(&id).await?;
    Ok(ok(deleted))
}
