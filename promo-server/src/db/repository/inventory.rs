//! Inventory Repository

use chrono::{DateTime, Utc};
use serde::Deserialize;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Inventory, InventoryUpsert};
use crate::db::repository::{geo, product, record_id};

pub const TABLE: &str = "inventory";

/// One inventory row projected to (entity, updated_at) for the freshness
/// report. `entity` is a store or a region depending on the query used.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRow {
    pub entity: RecordId,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct InventoryRepository {
    base: BaseRepository,
}

impl InventoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self, store: Option<RecordId>) -> RepoResult<Vec<Inventory>> {
        let rows: Vec<Inventory> = match store {
            Some(s) => {
                self.base
                    .db()
                    .query("SELECT * FROM inventory WHERE store = $store")
                    .bind(("store", s))
                    .await?
                    .take(0)?
            }
            None => self.base.db().query("SELECT * FROM inventory").await?.take(0)?,
        };
        Ok(rows)
    }

    async fn find_by_key(
        &self,
        store: &RecordId,
        product: &RecordId,
        memory_gb: Option<i64>,
    ) -> RepoResult<Option<Inventory>> {
        let mut result = match memory_gb {
            Some(m) => {
                self.base
                    .db()
                    .query(
                        "SELECT * FROM inventory \
                         WHERE store = $store AND product = $product AND memory_gb = $memory \
                         LIMIT 1",
                    )
                    .bind(("store", store.clone()))
                    .bind(("product", product.clone()))
                    .bind(("memory", m))
                    .await?
            }
            None => {
                self.base
                    .db()
                    .query(
                        "SELECT * FROM inventory \
                         WHERE store = $store AND product = $product \
                         AND (memory_gb == NONE OR memory_gb == NULL) \
                         LIMIT 1",
                    )
                    .bind(("store", store.clone()))
                    .bind(("product", product.clone()))
                    .await?
            }
        };
        let rows: Vec<Inventory> = result.take(0)?;
        Ok(rows.into_iter().next())
    }

    /// Insert or overwrite the snapshot for (store, product, memory),
    /// refreshing `updated_at`
    pub async fn upsert(&self, data: InventoryUpsert) -> RepoResult<Inventory> {
        let store = record_id(geo::STORE_TABLE, &data.store_id)?;
        let prod = record_id(product::TABLE, &data.product_id)?;

        if let Some(existing) = self.find_by_key(&store, &prod, data.memory_gb).await? {
            let id = existing
                .id
                .clone()
                .ok_or_else(|| RepoError::Database("Inventory row without id".to_string()))?;
            let updated: Option<Inventory> = self
                .base
                .db()
                .update(id)
                .merge(serde_json::json!({
                    "quantity": data.quantity,
                    "updated_at": Utc::now(),
                }))
                .await?;
            return updated
                .ok_or_else(|| RepoError::Database("Failed to update inventory".to_string()));
        }

        let inventory = Inventory {
            id: None,
            store,
            product: prod,
            memory_gb: data.memory_gb,
            quantity: data.quantity,
            updated_at: Utc::now(),
        };
        let created: Option<Inventory> = self.base.db().create(TABLE).content(inventory).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create inventory".to_string()))
    }

    /// (store, updated_at) pairs for every inventory row
    pub async fn update_rows_by_store(&self) -> RepoResult<Vec<UpdateRow>> {
        let rows: Vec<UpdateRow> = self
            .base
            .db()
            .query("SELECT store AS entity, updated_at FROM inventory")
            .await?
            .take(0)?;
        Ok(rows)
    }

    /// (region, updated_at) pairs, regions reached through the store link
    pub async fn update_rows_by_region(&self) -> RepoResult<Vec<UpdateRow>> {
        let rows: Vec<UpdateRow> = self
            .base
            .db()
            .query("SELECT store.region AS entity, updated_at FROM inventory")
            .await?
            .take(0)?;
        Ok(rows)
    }
}
