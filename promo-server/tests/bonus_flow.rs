//! End-to-end bonus flow over an in-memory database: seeding the catalog,
//! creating sales with computed bonuses, plan progress and CSV import.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use promo_server::BonusEngine;
use promo_server::db::DbService;
use promo_server::db::models::{
    BonusNetwork, BonusTier, NetworkCreate, ProductCreate, RegionCreate, Sale, SaleCreate,
    StoreCreate, User, UserRole,
};
use promo_server::db::repository::{
    BonusNetworkRepository, BonusTierRepository, NetworkRepository, PlanRepository,
    ProductRepository, RegionRepository, SaleRepository, StoreRepository, UserRepository,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

struct Fixture {
    db: Surreal<Db>,
    engine: BonusEngine,
    network: RecordId,
    store: RecordId,
    product: RecordId,
    promoter: RecordId,
}

async fn fixture() -> Fixture {
    let db = DbService::new_memory().await.unwrap().db;

    let network = NetworkRepository::new(db.clone())
        .create(NetworkCreate {
            code: "MTS".to_string(),
            name: "MTS Retail".to_string(),
        })
        .await
        .unwrap();
    let network_id = network.id.clone().unwrap();

    let region = RegionRepository::new(db.clone())
        .create(RegionCreate {
            name: "Almaty".to_string(),
        })
        .await
        .unwrap();

    let store = StoreRepository::new(db.clone())
        .create(StoreCreate {
            name: "Dostyk Plaza".to_string(),
            network_id: network_id.to_string(),
            region_id: region.id.unwrap().to_string(),
        })
        .await
        .unwrap();

    let product = ProductRepository::new(db.clone())
        .create(ProductCreate {
            sku: "SKU-123".to_string(),
            name: "Galaxy S25".to_string(),
            price: None,
        })
        .await
        .unwrap();

    let promoter = UserRepository::new(db.clone())
        .create(User::new(
            "promo@example.com".to_string(),
            Some("Promo Ter".to_string()),
            "not-a-real-hash".to_string(),
            UserRole::Promoter,
        ))
        .await
        .unwrap();

    Fixture {
        engine: BonusEngine::new(db.clone()),
        db,
        network: network_id,
        store: store.id.unwrap(),
        product: product.id.unwrap(),
        promoter: promoter.id.unwrap(),
    }
}

impl Fixture {
    async fn seed_base_bonus(&self, memory_gb: Option<i64>, amount: i64, valid_from: NaiveDate) {
        BonusNetworkRepository::new(self.db.clone())
            .create(BonusNetwork {
                id: None,
                network: self.network.clone(),
                product: self.product.clone(),
                memory_gb,
                base_bonus: Decimal::from(amount),
                is_active: true,
                valid_from,
                valid_to: None,
            })
            .await
            .unwrap();
    }

    async fn seed_tier(&self, min: f64, max: Option<f64>, amount: i64) {
        BonusTierRepository::new(self.db.clone())
            .create(BonusTier {
                id: None,
                network: self.network.clone(),
                min_percent: min,
                max_percent: max,
                bonus_amount: Decimal::from(amount),
            })
            .await
            .unwrap();
    }

    async fn seed_plan(&self, month_start: NaiveDate, target_qty: i64) {
        PlanRepository::new(self.db.clone())
            .upsert(
                self.promoter.clone(),
                self.network.clone(),
                month_start,
                target_qty,
            )
            .await
            .unwrap();
    }

    /// A pre-existing sale row, bypassing the engine
    async fn seed_sale(&self, sale_date: NaiveDate, quantity: i64) {
        SaleRepository::new(self.db.clone())
            .create(Sale {
                id: None,
                promoter: self.promoter.clone(),
                store: self.store.clone(),
                product: self.product.clone(),
                memory_gb: Some(128),
                sale_date,
                quantity,
                bonus_amount: Decimal::ZERO,
                created_at: Utc::now(),
            })
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn sale_bonus_is_base_times_quantity_plus_flat_tier() {
    let fx = fixture().await;
    fx.seed_base_bonus(Some(128), 9000, d(2025, 1, 1)).await;
    fx.seed_tier(101.0, Some(110.0), 20000).await;
    fx.seed_plan(d(2025, 6, 1), 50).await;
    // 52 of 50 already sold, 104% lands in the 101-110 corridor
    fx.seed_sale(d(2025, 6, 10), 52).await;

    let (sale, calc) = fx
        .engine
        .create_sale(
            SaleCreate {
                promoter_id: fx.promoter.to_string(),
                store_id: fx.store.to_string(),
                product_id: fx.product.to_string(),
                memory_gb: Some(128),
                sale_date: d(2025, 6, 15),
                quantity: 3,
            },
            d(2025, 6, 15),
        )
        .await
        .unwrap();

    assert_eq!(calc.base_bonus, Decimal::from(27000));
    assert_eq!(calc.over_bonus, Decimal::from(20000));
    assert_eq!(calc.total_bonus, Decimal::from(47000));
    assert_eq!(sale.bonus_amount, Decimal::from(47000));
}

#[tokio::test]
async fn expired_base_bonus_contributes_nothing() {
    let fx = fixture().await;
    // window closed before the sale date
    BonusNetworkRepository::new(fx.db.clone())
        .create(BonusNetwork {
            id: None,
            network: fx.network.clone(),
            product: fx.product.clone(),
            memory_gb: Some(128),
            base_bonus: Decimal::from(9000),
            is_active: true,
            valid_from: d(2024, 1, 1),
            valid_to: Some(d(2024, 12, 31)),
        })
        .await
        .unwrap();

    let bonus = fx
        .engine
        .active_bonus(&fx.network, &fx.product, Some(128), d(2025, 6, 15))
        .await
        .unwrap();
    assert!(bonus.is_none());

    let (sale, calc) = fx
        .engine
        .create_sale(
            SaleCreate {
                promoter_id: fx.promoter.to_string(),
                store_id: fx.store.to_string(),
                product_id: fx.product.to_string(),
                memory_gb: Some(128),
                sale_date: d(2025, 6, 15),
                quantity: 2,
            },
            d(2025, 6, 15),
        )
        .await
        .unwrap();
    assert_eq!(calc.total_bonus, Decimal::ZERO);
    assert_eq!(sale.bonus_amount, Decimal::ZERO);
}

#[tokio::test]
async fn exact_memory_row_beats_wildcard_row() {
    let fx = fixture().await;
    fx.seed_base_bonus(None, 5000, d(2025, 1, 1)).await;
    fx.seed_base_bonus(Some(256), 12000, d(2025, 1, 1)).await;

    let exact = fx
        .engine
        .active_bonus(&fx.network, &fx.product, Some(256), d(2025, 6, 1))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(exact.base_bonus, Decimal::from(12000));

    // No exact row for 128, wildcard applies
    let fallback = fx
        .engine
        .active_bonus(&fx.network, &fx.product, Some(128), d(2025, 6, 1))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fallback.base_bonus, Decimal::from(5000));
}

#[tokio::test]
async fn progress_without_plan_has_zero_percent() {
    let fx = fixture().await;
    fx.seed_sale(d(2025, 6, 5), 10).await;

    let progress = fx
        .engine
        .progress(&fx.promoter, &fx.network, d(2025, 6, 1), d(2025, 6, 10))
        .await
        .unwrap();
    assert_eq!(progress.sold_qty, 10);
    assert_eq!(progress.target_qty, 0);
    assert_eq!(progress.percent, 0.0);
}

#[tokio::test]
async fn progress_projects_linearly_from_days_elapsed() {
    let fx = fixture().await;
    fx.seed_plan(d(2025, 6, 1), 100).await;
    fx.seed_sale(d(2025, 6, 3), 20).await;

    // 20 sold in the first 10 of 30 days
    let progress = fx
        .engine
        .progress(&fx.promoter, &fx.network, d(2025, 6, 1), d(2025, 6, 10))
        .await
        .unwrap();
    assert_eq!(progress.percent, 20.0);
    assert_eq!(progress.projection_qty, 60.0);

    // Past month projects exactly the sold quantity
    let past = fx
        .engine
        .progress(&fx.promoter, &fx.network, d(2025, 6, 1), d(2025, 7, 15))
        .await
        .unwrap();
    assert_eq!(past.projection_qty, 20.0);
}

#[tokio::test]
async fn prospective_tier_amount_follows_the_percent() {
    let fx = fixture().await;
    fx.seed_tier(101.0, Some(110.0), 20000).await;
    fx.seed_tier(120.0, None, 50000).await;

    let amount = fx.engine.tier_amount_for(&fx.network, 104.0).await.unwrap();
    assert_eq!(amount, Some(Decimal::from(20000)));

    let open_ended = fx.engine.tier_amount_for(&fx.network, 300.0).await.unwrap();
    assert_eq!(open_ended, Some(Decimal::from(50000)));

    // Below every corridor there is no prospective payout
    assert_eq!(fx.engine.tier_amount_for(&fx.network, 95.0).await.unwrap(), None);
}

#[tokio::test]
async fn sales_outside_the_month_do_not_count() {
    let fx = fixture().await;
    fx.seed_plan(d(2025, 6, 1), 100).await;
    fx.seed_sale(d(2025, 5, 31), 7).await;
    fx.seed_sale(d(2025, 6, 1), 5).await;
    fx.seed_sale(d(2025, 6, 30), 4).await;
    fx.seed_sale(d(2025, 7, 1), 9).await;

    let progress = fx
        .engine
        .progress(&fx.promoter, &fx.network, d(2025, 6, 1), d(2025, 7, 15))
        .await
        .unwrap();
    assert_eq!(progress.sold_qty, 9);
}

mod import {
    use super::*;
    use promo_server::bonus::import::parse_csv;

    const HEADER: &str =
        "network_code,product_sku_or_name,memory_gb,base_bonus,plan_min,plan_max,over_bonus";

    #[tokio::test]
    async fn dry_run_persists_nothing() {
        let fx = fixture().await;
        let csv = format!("{HEADER}\nBEELINE,SKU-123,128,9000,101,110,20000\n");
        let items = parse_csv(&csv).unwrap();

        let summary = fx
            .engine
            .apply_import(items, true, d(2025, 6, 1))
            .await
            .unwrap();
        assert!(summary.dry_run);
        assert!(summary.updated.is_empty());
        assert!(summary.created.iter().any(|c| c.starts_with("network:pending")));
        assert!(summary.created.iter().any(|c| c.starts_with("bonus:pending")));
        assert!(summary.created.iter().any(|c| c.starts_with("tier:pending")));

        // Nothing written
        assert!(
            NetworkRepository::new(fx.db.clone())
                .find_by_code("BEELINE")
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            BonusNetworkRepository::new(fx.db.clone())
                .find_all(None)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn import_creates_then_updates_rows() {
        let fx = fixture().await;
        let csv = format!("{HEADER}\nMTS,SKU-123,128,9000,101,110,20000\n");
        let items = parse_csv(&csv).unwrap();

        let first = fx
            .engine
            .apply_import(items.clone(), false, d(2025, 6, 1))
            .await
            .unwrap();
        assert_eq!(first.created.len(), 2); // bonus + tier, network existed
        assert!(first.updated.is_empty());

        // Same key with new amounts updates in place
        let csv = format!("{HEADER}\nMTS,SKU-123,128,9500,101,110,25000\n");
        let second = fx
            .engine
            .apply_import(parse_csv(&csv).unwrap(), false, d(2025, 6, 1))
            .await
            .unwrap();
        assert!(second.created.is_empty());
        assert_eq!(second.updated.len(), 2);

        let bonus = fx
            .engine
            .active_bonus(&fx.network, &fx.product, Some(128), d(2025, 6, 2))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(bonus.base_bonus, Decimal::from(9500));
    }

    #[tokio::test]
    async fn blank_memory_creates_wildcard_row_distinct_from_zero() {
        let fx = fixture().await;
        let csv = format!("{HEADER}\nMTS,SKU-123,,5000,,,\nMTS,SKU-123,0,6000,,,\n");

        fx.engine
            .apply_import(parse_csv(&csv).unwrap(), false, d(2025, 6, 1))
            .await
            .unwrap();

        let rows = BonusNetworkRepository::new(fx.db.clone())
            .find_all(None)
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().any(|r| r.memory_gb.is_none()));
        assert!(rows.iter().any(|r| r.memory_gb == Some(0)));
    }

    #[tokio::test]
    async fn failing_row_aborts_the_batch_before_any_write() {
        let fx = fixture().await;
        // First row is fully valid and would create a network, a bonus and a
        // tier; the second row's product does not exist
        let csv = format!(
            "{HEADER}\nBEELINE,SKU-123,128,9000,101,110,20000\nMTS,NO-SUCH-SKU,64,7000,,,\n"
        );

        let result = fx
            .engine
            .apply_import(parse_csv(&csv).unwrap(), false, d(2025, 6, 1))
            .await;
        assert!(result.is_err());

        // Nothing from the first row was persisted
        assert!(
            NetworkRepository::new(fx.db.clone())
                .find_by_code("BEELINE")
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            BonusNetworkRepository::new(fx.db.clone())
                .find_all(None)
                .await
                .unwrap()
                .is_empty()
        );
        assert!(
            BonusTierRepository::new(fx.db.clone())
                .find_by_network(&fx.network)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn unknown_product_aborts_the_batch() {
        let fx = fixture().await;
        let csv = format!("{HEADER}\nMTS,NO-SUCH-SKU,128,9000,,,\n");

        let result = fx
            .engine
            .apply_import(parse_csv(&csv).unwrap(), false, d(2025, 6, 1))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn product_resolves_by_name_when_sku_does_not_match() {
        let fx = fixture().await;
        let csv = format!("{HEADER}\nMTS,galaxy s25,64,7000,,,\n");

        let summary = fx
            .engine
            .apply_import(parse_csv(&csv).unwrap(), false, d(2025, 6, 1))
            .await
            .unwrap();
        assert_eq!(summary.created.len(), 1);
    }
}
