//! Plan API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::bonus::PlanProgress;
use crate::core::ServerState;
use crate::db::models::{PlanUpsert, PromoterPlan};
use crate::db::repository::{self, PlanRepository};
use crate::utils::time::{month_start, today_in};
use crate::utils::{AppResponse, AppResult, ok};

#[derive(Deserialize)]
pub struct PlanFilter {
    pub promoter_id: Option<String>,
    pub network_id: Option<String>,
    pub month: Option<NaiveDate>,
}

/// GET /api/plans
pub async fn list(
    State(state): State<ServerState>,
    Query(filter): Query<PlanFilter>,
) -> AppResult<Json<AppResponse<Vec<PromoterPlan>>>> {
    let promoter = filter
        .promoter_id
        .as_deref()
        .map(|id| repository::record_id(repository::user::TABLE, id))
        .transpose()?;
    let network = filter
        .network_id
        .as_deref()
        .map(|id| repository::record_id(repository::geo::NETWORK_TABLE, id))
        .transpose()?;
    let plans = PlanRepository::new(state.db.clone())
        .find_filtered(promoter, network, filter.month.map(month_start))
        .await?;
    Ok(ok(plans))
}

/// POST /api/plans - insert or overwrite the target for the tuple
pub async fn upsert(
    State(state): State<ServerState>,
    Json(payload): Json<PlanUpsert>,
) -> AppResult<Json<AppResponse<PromoterPlan>>> {
    payload.validate()?;
    let promoter = repository::record_id(repository::user::TABLE, &payload.promoter_id)?;
    let network = repository::record_id(repository::geo::NETWORK_TABLE, &payload.network_id)?;
    let plan = PlanRepository::new(state.db.clone())
        .upsert(
            promoter,
            network,
            month_start(payload.month_start),
            payload.target_qty,
        )
        .await?;
    Ok(ok(plan))
}

#[derive(Deserialize)]
pub struct ProgressQuery {
    pub promoter_id: String,
    pub network_id: String,
    pub month: NaiveDate,
}

#[derive(Serialize)]
pub struct ProgressResponse {
    #[serde(flatten)]
    pub progress: PlanProgress,
    /// Flat tier amount the current percent would earn, absent outside any corridor
    #[serde(with = "rust_decimal::serde::float_option")]
    pub prospective_over_bonus: Option<Decimal>,
}

/// GET /api/plans/progress
pub async fn progress(
    State(state): State<ServerState>,
    Query(query): Query<ProgressQuery>,
) -> AppResult<Json<AppResponse<ProgressResponse>>> {
    let promoter = repository::record_id(repository::user::TABLE, &query.promoter_id)?;
    let network = repository::record_id(repository::geo::NETWORK_TABLE, &query.network_id)?;
    let today = today_in(state.config.reminder_tz);
    let progress = state
        .engine
        .progress(&promoter, &network, query.month, today)
        .await?;
    let prospective_over_bonus = state.engine.tier_amount_for(&network, progress.percent).await?;
    Ok(ok(ProgressResponse {
        progress,
        prospective_over_bonus,
    }))
}
