//! Network / Region / Store Repositories

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::{
    Network, NetworkCreate, NetworkUpdate, Region, RegionCreate, RegionUpdate, Store, StoreCreate,
    StoreUpdate,
};

pub const NETWORK_TABLE: &str = "network";
pub const REGION_TABLE: &str = "region";
pub const STORE_TABLE: &str = "store";

#[derive(Clone)]
pub struct NetworkRepository {
    base: BaseRepository,
}

impl NetworkRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Network>> {
        let networks: Vec<Network> = self
            .base
            .db()
            .query("SELECT * FROM network ORDER BY code")
            .await?
            .take(0)?;
        Ok(networks)
    }

    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Network>> {
        let network: Option<Network> = self.base.db().select(id.clone()).await?;
        Ok(network)
    }

    /// Find by code, case-insensitive
    pub async fn find_by_code(&self, code: &str) -> RepoResult<Option<Network>> {
        let code_lower = code.to_lowercase();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM network WHERE string::lowercase(code) = $code LIMIT 1")
            .bind(("code", code_lower))
            .await?;
        let networks: Vec<Network> = result.take(0)?;
        Ok(networks.into_iter().next())
    }

    pub async fn create(&self, data: NetworkCreate) -> RepoResult<Network> {
        if self.find_by_code(&data.code).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Network '{}' already exists",
                data.code
            )));
        }
        let network = Network {
            id: None,
            code: data.code.to_uppercase(),
            name: data.name,
        };
        let created: Option<Network> = self.base.db().create(NETWORK_TABLE).content(network).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create network".to_string()))
    }

    pub async fn update(&self, id: &str, data: NetworkUpdate) -> RepoResult<Network> {
        let rid = record_id(NETWORK_TABLE, id)?;
        let updated: Option<Network> = self.base.db().update(rid).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Network {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let rid = record_id(NETWORK_TABLE, id)?;
        let deleted: Option<Network> = self.base.db().delete(rid).await?;
        Ok(deleted.is_some())
    }
}

#[derive(Clone)]
pub struct RegionRepository {
    base: BaseRepository,
}

impl RegionRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Region>> {
        let regions: Vec<Region> = self
            .base
            .db()
            .query("SELECT * FROM region ORDER BY name")
            .await?
            .take(0)?;
        Ok(regions)
    }

    pub async fn create(&self, data: RegionCreate) -> RepoResult<Region> {
        let region = Region {
            id: None,
            name: data.name,
        };
        let created: Option<Region> = self.base.db().create(REGION_TABLE).content(region).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create region".to_string()))
    }

    pub async fn update(&self, id: &str, data: RegionUpdate) -> RepoResult<Region> {
        let rid = record_id(REGION_TABLE, id)?;
        let updated: Option<Region> = self.base.db().update(rid).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Region {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let rid = record_id(REGION_TABLE, id)?;
        let deleted: Option<Region> = self.base.db().delete(rid).await?;
        Ok(deleted.is_some())
    }
}

#[derive(Clone)]
pub struct StoreRepository {
    base: BaseRepository,
}

impl StoreRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Store>> {
        let stores: Vec<Store> = self
            .base
            .db()
            .query("SELECT * FROM store ORDER BY name")
            .await?
            .take(0)?;
        Ok(stores)
    }

    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Store>> {
        let store: Option<Store> = self.base.db().select(id.clone()).await?;
        Ok(store)
    }

    pub async fn create(&self, data: StoreCreate) -> RepoResult<Store> {
        let store = Store {
            id: None,
            name: data.name,
            network: record_id(NETWORK_TABLE, &data.network_id)?,
            region: record_id(REGION_TABLE, &data.region_id)?,
        };
        let created: Option<Store> = self.base.db().create(STORE_TABLE).content(store).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create store".to_string()))
    }

    pub async fn update(&self, id: &str, data: StoreUpdate) -> RepoResult<Store> {
        let rid = record_id(STORE_TABLE, id)?;
        let updated: Option<Store> = self.base.db().update(rid).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Store {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let rid = record_id(STORE_TABLE, id)?;
        let deleted: Option<Store> = self.base.db().delete(rid).await?;
        Ok(deleted.is_some())
    }
}
