//! Database Module
//!
//! Embedded SurrealDB storage. Schema (tables + unique indexes) is defined
//! idempotently at startup.

pub mod models;
pub mod repository;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "promo";
const DATABASE: &str = "main";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the RocksDB-backed database at `db_dir`
    pub async fn new(db_dir: &Path) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_dir)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        Self::prepare(db).await
    }

    /// In-memory database, used by tests
    pub async fn new_memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        Self::prepare(db).await
    }

    async fn prepare(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        define_schema(&db)
            .await
            .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?;

        tracing::info!("Database ready (SurrealDB embedded, ns={NAMESPACE} db={DATABASE})");
        Ok(Self { db })
    }
}

/// Define tables and the unique indexes that back the data-layer invariants:
/// one plan per (promoter, network, month), no duplicate tier bounds per
/// network, unique network codes / product SKUs / user emails / tokens.
async fn define_schema(db: &Surreal<Db>) -> surrealdb::Result<()> {
    db.query(
        r#"
        DEFINE TABLE IF NOT EXISTS user SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS user_email ON TABLE user FIELDS email UNIQUE;

        DEFINE TABLE IF NOT EXISTS network SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS network_code ON TABLE network FIELDS code UNIQUE;

        DEFINE TABLE IF NOT EXISTS region SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS region_name ON TABLE region FIELDS name UNIQUE;

        DEFINE TABLE IF NOT EXISTS store SCHEMALESS;

        DEFINE TABLE IF NOT EXISTS product SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS product_sku ON TABLE product FIELDS sku UNIQUE;

        DEFINE TABLE IF NOT EXISTS bonus_network SCHEMALESS;

        DEFINE TABLE IF NOT EXISTS bonus_tier SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS bonus_tier_bounds ON TABLE bonus_tier
            FIELDS network, min_percent, max_percent UNIQUE;

        DEFINE TABLE IF NOT EXISTS promoter_plan SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS promoter_plan_tuple ON TABLE promoter_plan
            FIELDS promoter, network, month_start UNIQUE;

        DEFINE TABLE IF NOT EXISTS sale SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS inventory SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS task SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS chat_message SCHEMALESS;

        DEFINE TABLE IF NOT EXISTS invitation SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS invitation_token ON TABLE invitation FIELDS token UNIQUE;
        "#,
    )
    .await?;
    Ok(())
}
