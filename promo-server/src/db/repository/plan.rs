//! Promoter Plan Repository

use chrono::NaiveDate;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::PromoterPlan;

pub const TABLE: &str = "promoter_plan";

#[derive(Clone)]
pub struct PlanRepository {
    base: BaseRepository,
}

impl PlanRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// The unique plan for (promoter, network, month), if any
    pub async fn find_one(
        &self,
        promoter: &RecordId,
        network: &RecordId,
        month_start: NaiveDate,
    ) -> RepoResult<Option<PromoterPlan>> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM promoter_plan \
                 WHERE promoter = $promoter AND network = $network AND month_start = $month \
                 LIMIT 1",
            )
            .bind(("promoter", promoter.clone()))
            .bind(("network", network.clone()))
            .bind(("month", month_start.to_string()))
            .await?;
        let plans: Vec<PromoterPlan> = result.take(0)?;
        Ok(plans.into_iter().next())
    }

    /// Plans matching any combination of the optional filters
    pub async fn find_filtered(
        &self,
        promoter: Option<RecordId>,
        network: Option<RecordId>,
        month_start: Option<NaiveDate>,
    ) -> RepoResult<Vec<PromoterPlan>> {
        let mut conditions: Vec<&str> = Vec::new();
        if promoter.is_some() {
            conditions.push("promoter = $promoter");
        }
        if network.is_some() {
            conditions.push("network = $network");
        }
        if month_start.is_some() {
            conditions.push("month_start = $month");
        }

        let sql = if conditions.is_empty() {
            "SELECT * FROM promoter_plan ORDER BY month_start".to_string()
        } else {
            format!(
                "SELECT * FROM promoter_plan WHERE {} ORDER BY month_start",
                conditions.join(" AND ")
            )
        };

        let mut query = self.base.db().query(sql);
        if let Some(p) = promoter {
            query = query.bind(("promoter", p));
        }
        if let Some(n) = network {
            query = query.bind(("network", n));
        }
        if let Some(m) = month_start {
            query = query.bind(("month", m.to_string()));
        }

        let plans: Vec<PromoterPlan> = query.await?.take(0)?;
        Ok(plans)
    }

    /// Insert, or overwrite the target of the existing tuple
    pub async fn upsert(
        &self,
        promoter: RecordId,
        network: RecordId,
        month_start: NaiveDate,
        target_qty: i64,
    ) -> RepoResult<PromoterPlan> {
        if let Some(existing) = self.find_one(&promoter, &network, month_start).await? {
            let id = existing
                .id
                .clone()
                .ok_or_else(|| RepoError::Database("Plan row without id".to_string()))?;
            let updated: Option<PromoterPlan> = self
                .base
                .db()
                .update(id)
                .merge(serde_json::json!({ "target_qty": target_qty }))
                .await?;
            return updated.ok_or_else(|| RepoError::Database("Failed to update plan".to_string()));
        }

        let plan = PromoterPlan {
            id: None,
            promoter,
            network,
            month_start,
            target_qty,
        };
        let created: Option<PromoterPlan> = self.base.db().create(TABLE).content(plan).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create plan".to_string()))
    }
}
