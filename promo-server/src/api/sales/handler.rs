//! Sales API Handlers

use axum::{Json, extract::State};
use serde::Serialize;
use validator::Validate;

use crate::auth::CurrentUser;
use crate::bonus::BonusCalculation;
use crate::core::ServerState;
use crate::db::models::{Sale, SaleCreate};
use crate::db::repository::{self, SaleRepository};
use crate::utils::time::today_in;
use crate::utils::{AppResponse, AppResult, ok};

const RECENT_SALES_LIMIT: usize = 100;

#[derive(Serialize)]
pub struct SaleResponse {
    #[serde(flatten)]
    pub sale: Sale,
    pub calculation: BonusCalculation,
}

/// POST /api/sales - create a sale, bonus computed at creation time
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<SaleCreate>,
) -> AppResult<Json<AppResponse<SaleResponse>>> {
    payload.validate()?;
    let today = today_in(state.config.reminder_tz);
    let (sale, calculation) = state.engine.create_sale(payload, today).await?;
    Ok(ok(SaleResponse { sale, calculation }))
}

/// GET /api/sales - recent sales of the authenticated promoter
pub async fn list_mine(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<Vec<Sale>>>> {
    let promoter = repository::record_id(repository::user::TABLE, &user.id)?;
    let sales = SaleRepository::new(state.db.clone())
        .find_by_promoter(&promoter, RECENT_SALES_LIMIT)
        .await?;
    Ok(ok(sales))
}
