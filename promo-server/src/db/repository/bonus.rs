//! Base Bonus and Overachievement Tier Repositories

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::{
    BonusNetwork, BonusNetworkUpdate, BonusTier, BonusTierUpdate,
};

pub const BONUS_TABLE: &str = "bonus_network";
pub const TIER_TABLE: &str = "bonus_tier";

#[derive(Clone)]
pub struct BonusNetworkRepository {
    base: BaseRepository,
}

impl BonusNetworkRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Rows active and valid on `date` for (network, product), any memory
    /// size. The exact-vs-wildcard memory pick happens in `bonus::matcher`.
    pub async fn find_candidates(
        &self,
        network: &RecordId,
        product: &RecordId,
        date: NaiveDate,
    ) -> RepoResult<Vec<BonusNetwork>> {
        let rows: Vec<BonusNetwork> = self
            .base
            .db()
            .query(
                "SELECT * FROM bonus_network \
                 WHERE network = $network AND product = $product \
                 AND is_active = true \
                 AND valid_from <= $date AND (valid_to ?? $date) >= $date",
            )
            .bind(("network", network.clone()))
            .bind(("product", product.clone()))
            .bind(("date", date.to_string()))
            .await?
            .take(0)?;
        Ok(rows)
    }

    /// Rows keyed by (network, product, memory), the import upsert key.
    /// `memory_gb = None` matches only wildcard rows, never `memory_gb = 0`.
    pub async fn find_by_key(
        &self,
        network: &RecordId,
        product: &RecordId,
        memory_gb: Option<i64>,
    ) -> RepoResult<Option<BonusNetwork>> {
        let mut result = match memory_gb {
            Some(m) => {
                self.base
                    .db()
                    .query(
                        "SELECT * FROM bonus_network \
                         WHERE network = $network AND product = $product AND memory_gb = $memory \
                         LIMIT 1",
                    )
                    .bind(("network", network.clone()))
                    .bind(("product", product.clone()))
                    .bind(("memory", m))
                    .await?
            }
            None => {
                self.base
                    .db()
                    .query(
                        "SELECT * FROM bonus_network \
                         WHERE network = $network AND product = $product \
                         AND (memory_gb == NONE OR memory_gb == NULL) \
                         LIMIT 1",
                    )
                    .bind(("network", network.clone()))
                    .bind(("product", product.clone()))
                    .await?
            }
        };
        let rows: Vec<BonusNetwork> = result.take(0)?;
        Ok(rows.into_iter().next())
    }

    pub async fn find_all(&self, network: Option<RecordId>) -> RepoResult<Vec<BonusNetwork>> {
        let rows: Vec<BonusNetwork> = match network {
            Some(n) => {
                self.base
                    .db()
                    .query("SELECT * FROM bonus_network WHERE network = $network ORDER BY valid_from")
                    .bind(("network", n))
                    .await?
                    .take(0)?
            }
            None => {
                self.base
                    .db()
                    .query("SELECT * FROM bonus_network ORDER BY valid_from")
                    .await?
                    .take(0)?
            }
        };
        Ok(rows)
    }

    pub async fn create(&self, bonus: BonusNetwork) -> RepoResult<BonusNetwork> {
        let created: Option<BonusNetwork> =
            self.base.db().create(BONUS_TABLE).content(bonus).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create bonus".to_string()))
    }

    pub async fn update(&self, id: &str, data: BonusNetworkUpdate) -> RepoResult<BonusNetwork> {
        let rid = record_id(BONUS_TABLE, id)?;
        let updated: Option<BonusNetwork> = self.base.db().update(rid).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Bonus {} not found", id)))
    }

    /// Import path: overwrite only the per-unit amount
    pub async fn set_base_amount(&self, id: &RecordId, amount: Decimal) -> RepoResult<()> {
        #[derive(Serialize)]
        struct Patch {
            #[serde(with = "rust_decimal::serde::float")]
            base_bonus: Decimal,
        }
        let _: Option<BonusNetwork> = self
            .base
            .db()
            .update(id.clone())
            .merge(Patch { base_bonus: amount })
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let rid = record_id(BONUS_TABLE, id)?;
        let deleted: Option<BonusNetwork> = self.base.db().delete(rid).await?;
        Ok(deleted.is_some())
    }
}

#[derive(Clone)]
pub struct BonusTierRepository {
    base: BaseRepository,
}

impl BonusTierRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All tiers of a network, ordered by lower bound. Tier matching against
    /// a percent happens in `bonus::matcher` on the fetched rows.
    pub async fn find_by_network(&self, network: &RecordId) -> RepoResult<Vec<BonusTier>> {
        let tiers: Vec<BonusTier> = self
            .base
            .db()
            .query("SELECT * FROM bonus_tier WHERE network = $network ORDER BY min_percent")
            .bind(("network", network.clone()))
            .await?
            .take(0)?;
        Ok(tiers)
    }

    pub async fn create(&self, tier: BonusTier) -> RepoResult<BonusTier> {
        let created: Option<BonusTier> = self.base.db().create(TIER_TABLE).content(tier).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create tier".to_string()))
    }

    pub async fn update(&self, id: &str, data: BonusTierUpdate) -> RepoResult<BonusTier> {
        let rid = record_id(TIER_TABLE, id)?;
        let updated: Option<BonusTier> = self.base.db().update(rid).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Tier {} not found", id)))
    }

    /// Import path: overwrite only the flat amount
    pub async fn set_amount(&self, id: &RecordId, amount: Decimal) -> RepoResult<()> {
        #[derive(Serialize)]
        struct Patch {
            #[serde(with = "rust_decimal::serde::float")]
            bonus_amount: Decimal,
        }
        let _: Option<BonusTier> = self
            .base
            .db()
            .update(id.clone())
            .merge(Patch { bonus_amount: amount })
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let rid = record_id(TIER_TABLE, id)?;
        let deleted: Option<BonusTier> = self.base.db().delete(rid).await?;
        Ok(deleted.is_some())
    }
}
