//! Health API Handlers

use axum::Json;
use serde::Serialize;

use crate::utils::{AppResponse, ok};

#[derive(Serialize)]
pub struct HealthInfo {
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct VersionInfo {
    pub name: &'static str,
    pub version: &'static str,
}

/// GET /api/health
pub async fn health() -> Json<AppResponse<HealthInfo>> {
    ok(HealthInfo { status: "ok" })
}

/// GET /api/version
pub async fn version() -> Json<AppResponse<VersionInfo>> {
    ok(VersionInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}
