//! Bonus engine orchestration
//!
//! Wires the pure decision functions to the repositories. One engine instance
//! lives in the server state and is shared by the sale, plan and import
//! handlers.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;
use tracing::info;

use crate::db::models::{BonusNetwork, Sale, SaleCreate};
use crate::db::repository::{
    self, BonusNetworkRepository, BonusTierRepository, NetworkRepository, PlanRepository,
    ProductRepository, SaleRepository, StoreRepository,
};
use crate::utils::time::{month_end, month_start};
use crate::utils::{AppError, AppResult};

use super::calculator::{self, BonusCalculation};
use super::import::{ImportItem, ImportSummary};
use super::matcher;
use super::progress::{self, PlanProgress};

#[derive(Clone)]
pub struct BonusEngine {
    networks: NetworkRepository,
    stores: StoreRepository,
    products: ProductRepository,
    bonuses: BonusNetworkRepository,
    tiers: BonusTierRepository,
    plans: PlanRepository,
    sales: SaleRepository,
}

impl BonusEngine {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            networks: NetworkRepository::new(db.clone()),
            stores: StoreRepository::new(db.clone()),
            products: ProductRepository::new(db.clone()),
            bonuses: BonusNetworkRepository::new(db.clone()),
            tiers: BonusTierRepository::new(db.clone()),
            plans: PlanRepository::new(db.clone()),
            sales: SaleRepository::new(db),
        }
    }

    /// The base-bonus row applicable on `date`, exact memory match first
    pub async fn active_bonus(
        &self,
        network: &RecordId,
        product: &RecordId,
        memory_gb: Option<i64>,
        date: NaiveDate,
    ) -> AppResult<Option<BonusNetwork>> {
        let candidates = self.bonuses.find_candidates(network, product, date).await?;
        Ok(matcher::pick_base(&candidates, memory_gb).cloned())
    }

    /// Plan progress for the month containing `month`, as seen on `today`
    pub async fn progress(
        &self,
        promoter: &RecordId,
        network: &RecordId,
        month: NaiveDate,
        today: NaiveDate,
    ) -> AppResult<PlanProgress> {
        let start = month_start(month);
        let plan = self.plans.find_one(promoter, network, start).await?;
        let target_qty = plan.map(|p| p.target_qty).unwrap_or(0);
        let sold_qty = self
            .sales
            .sold_quantity(promoter, network, start, month_end(month))
            .await?;
        Ok(progress::compute(sold_qty, target_qty, start, today))
    }

    /// Create a sale with its bonus computed at creation time. The persisted
    /// `bonus_amount` is never recomputed afterwards.
    pub async fn create_sale(
        &self,
        data: SaleCreate,
        today: NaiveDate,
    ) -> AppResult<(Sale, BonusCalculation)> {
        let store_id = repository::record_id(repository::geo::STORE_TABLE, &data.store_id)?;
        let store = self
            .stores
            .find_by_id(&store_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Store {} not found", data.store_id)))?;

        let promoter = repository::record_id(repository::user::TABLE, &data.promoter_id)?;
        let product = repository::record_id(repository::product::TABLE, &data.product_id)?;

        let base = self
            .active_bonus(&store.network, &product, data.memory_gb, data.sale_date)
            .await?;
        let progress = self
            .progress(&promoter, &store.network, data.sale_date, today)
            .await?;
        let tiers = self.tiers.find_by_network(&store.network).await?;
        let tier = matcher::pick_tier(&tiers, progress.percent);
        let calculation = calculator::calculate(base.as_ref(), tier, data.quantity);

        let sale = self
            .sales
            .create(Sale {
                id: None,
                promoter,
                store: store_id,
                product,
                memory_gb: data.memory_gb,
                sale_date: data.sale_date,
                quantity: data.quantity,
                bonus_amount: calculation.total_bonus,
                created_at: Utc::now(),
            })
            .await?;

        info!(
            sale = %sale.id.as_ref().map(|r| r.to_string()).unwrap_or_default(),
            total = %calculation.total_bonus,
            "sale created"
        );
        Ok((sale, calculation))
    }

    /// Reconcile parsed import items against the bonus tables.
    ///
    /// Every product is resolved (by SKU, then name, case-insensitive) before
    /// anything is written, so an unknown product aborts the whole batch with
    /// the database untouched. Networks are then resolved or created by code;
    /// base rows upsert on (network, product, memory), tiers on the exact
    /// (min, max) pair with an absent max treated as the sentinel -1.
    ///
    /// In dry-run mode the plan is computed the same way but nothing is
    /// written; rows that would be created are reported with `pending` labels.
    pub async fn apply_import(
        &self,
        items: Vec<ImportItem>,
        dry_run: bool,
        today: NaiveDate,
    ) -> AppResult<ImportSummary> {
        // Validation pass, no writes
        let mut batch: Vec<(ImportItem, RecordId)> = Vec::with_capacity(items.len());
        for item in items {
            let product = self.resolve_product(&item.product_identifier).await?;
            let product_id = product.id.ok_or_else(|| {
                AppError::database(format!("Product row without id: {}", item.product_identifier))
            })?;
            batch.push((item, product_id));
        }

        let mut summary = ImportSummary {
            dry_run,
            ..Default::default()
        };
        // Networks planned but not persisted during a dry run, by lowercase code
        let mut pending_networks: Vec<String> = Vec::new();

        for (item, product_id) in &batch {
            let code_key = item.network_code.to_lowercase();
            let network = match self.networks.find_by_code(&item.network_code).await? {
                Some(n) => Some(n),
                None if dry_run => {
                    if !pending_networks.contains(&code_key) {
                        pending_networks.push(code_key.clone());
                        summary
                            .created
                            .push(format!("network:pending:{}", item.network_code));
                    }
                    None
                }
                None => {
                    let created = self
                        .networks
                        .create(crate::db::models::NetworkCreate {
                            code: item.network_code.clone(),
                            name: item.network_code.to_uppercase(),
                        })
                        .await?;
                    summary.created.push(record_label(&created.id, "network"));
                    Some(created)
                }
            };

            match &network {
                Some(n) => {
                    let network_id = n.id.clone().ok_or_else(|| {
                        AppError::database(format!("Network row without id: {}", n.code))
                    })?;
                    self.upsert_base_row(
                        &network_id,
                        product_id,
                        item,
                        dry_run,
                        today,
                        &mut summary,
                    )
                    .await?;
                    self.upsert_tier_row(&network_id, item, dry_run, &mut summary)
                        .await?;
                }
                None => {
                    // Network does not exist yet, so every row under it is new
                    summary.created.push(format!(
                        "bonus:pending:{}/{}",
                        item.network_code, item.product_identifier
                    ));
                    if item.over_bonus.is_some() && item.plan_min.is_some() {
                        summary
                            .created
                            .push(format!("tier:pending:{}", item.network_code));
                    }
                }
            }
        }

        info!(
            created = summary.created.len(),
            updated = summary.updated.len(),
            dry_run,
            "bonus import applied"
        );
        Ok(summary)
    }

    /// SKU first, display name as fallback, both case-insensitive. Unknown
    /// products abort the batch.
    async fn resolve_product(&self, identifier: &str) -> AppResult<crate::db::models::Product> {
        if let Some(p) = self.products.find_by_sku(identifier).await? {
            return Ok(p);
        }
        if let Some(p) = self.products.find_by_name(identifier).await? {
            return Ok(p);
        }
        Err(AppError::not_found(format!(
            "Product not found: {identifier}"
        )))
    }

    async fn upsert_base_row(
        &self,
        network: &RecordId,
        product: &RecordId,
        item: &ImportItem,
        dry_run: bool,
        today: NaiveDate,
        summary: &mut ImportSummary,
    ) -> AppResult<()> {
        match self
            .bonuses
            .find_by_key(network, product, item.memory_gb)
            .await?
        {
            Some(existing) => {
                let id = existing
                    .id
                    .ok_or_else(|| AppError::database("Bonus row without id"))?;
                if !dry_run {
                    self.bonuses.set_base_amount(&id, item.base_bonus).await?;
                }
                summary.updated.push(format!("bonus:{id}"));
            }
            None if dry_run => {
                summary.created.push(format!(
                    "bonus:pending:{}/{}",
                    item.network_code, item.product_identifier
                ));
            }
            None => {
                let created = self
                    .bonuses
                    .create(BonusNetwork {
                        id: None,
                        network: network.clone(),
                        product: product.clone(),
                        memory_gb: item.memory_gb,
                        base_bonus: item.base_bonus,
                        is_active: true,
                        valid_from: today,
                        valid_to: None,
                    })
                    .await?;
                summary.created.push(record_label(&created.id, "bonus"));
            }
        }
        Ok(())
    }

    async fn upsert_tier_row(
        &self,
        network: &RecordId,
        item: &ImportItem,
        dry_run: bool,
        summary: &mut ImportSummary,
    ) -> AppResult<()> {
        let (Some(over_bonus), Some(plan_min)) = (item.over_bonus, item.plan_min) else {
            return Ok(());
        };

        let tiers = self.tiers.find_by_network(network).await?;
        let wanted_max = item.plan_max.unwrap_or(-1.0);
        let existing = tiers
            .into_iter()
            .find(|t| t.min_percent == plan_min && t.max_percent.unwrap_or(-1.0) == wanted_max);

        match existing {
            Some(tier) => {
                let id = tier
                    .id
                    .ok_or_else(|| AppError::database("Tier row without id"))?;
                if !dry_run {
                    self.tiers.set_amount(&id, over_bonus).await?;
                }
                summary.updated.push(format!("tier:{id}"));
            }
            None if dry_run => {
                summary
                    .created
                    .push(format!("tier:pending:{}", item.network_code));
            }
            None => {
                let created = self
                    .tiers
                    .create(crate::db::models::BonusTier {
                        id: None,
                        network: network.clone(),
                        min_percent: plan_min,
                        max_percent: item.plan_max,
                        bonus_amount: over_bonus,
                    })
                    .await?;
                summary.created.push(record_label(&created.id, "tier"));
            }
        }
        Ok(())
    }

    /// Flat bonus amount a tier would award for a given percent, used by the
    /// plan progress endpoint to surface the prospective payout.
    pub async fn tier_amount_for(
        &self,
        network: &RecordId,
        percent: f64,
    ) -> AppResult<Option<Decimal>> {
        let tiers = self.tiers.find_by_network(network).await?;
        Ok(matcher::pick_tier(&tiers, percent).map(|t| t.bonus_amount))
    }
}

fn record_label(id: &Option<RecordId>, kind: &str) -> String {
    match id {
        Some(rid) => format!("{kind}:{rid}"),
        None => format!("{kind}:unknown"),
    }
}
