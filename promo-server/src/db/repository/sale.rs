//! Sale Repository

use chrono::NaiveDate;
use serde::Deserialize;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Sale;

pub const TABLE: &str = "sale";

#[derive(Clone)]
pub struct SaleRepository {
    base: BaseRepository,
}

impl SaleRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, sale: Sale) -> RepoResult<Sale> {
        let created: Option<Sale> = self.base.db().create(TABLE).content(sale).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create sale".to_string()))
    }

    /// Sum of quantities sold by a promoter in stores of a network within
    /// `[from, to]` inclusive. Stores are reached through the record link on
    /// the sale row.
    pub async fn sold_quantity(
        &self,
        promoter: &RecordId,
        network: &RecordId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> RepoResult<i64> {
        #[derive(Deserialize)]
        struct SoldRow {
            sold: Option<i64>,
        }

        let mut result = self
            .base
            .db()
            .query(
                "SELECT math::sum(quantity) AS sold FROM sale \
                 WHERE promoter = $promoter AND store.network = $network \
                 AND sale_date >= $from AND sale_date <= $to \
                 GROUP ALL",
            )
            .bind(("promoter", promoter.clone()))
            .bind(("network", network.clone()))
            .bind(("from", from.to_string()))
            .bind(("to", to.to_string()))
            .await?;

        let row: Option<SoldRow> = result.take(0)?;
        Ok(row.and_then(|r| r.sold).unwrap_or(0))
    }

    /// Recent sales of a promoter, newest first
    pub async fn find_by_promoter(&self, promoter: &RecordId, limit: usize) -> RepoResult<Vec<Sale>> {
        let sales: Vec<Sale> = self
            .base
            .db()
            .query(
                "SELECT * FROM sale WHERE promoter = $promoter \
                 ORDER BY sale_date DESC LIMIT $limit",
            )
            .bind(("promoter", promoter.clone()))
            .bind(("limit", limit))
            .await?
            .take(0)?;
        Ok(sales)
    }
}
