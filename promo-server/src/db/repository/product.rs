//! Product Repository

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::{Product, ProductCreate, ProductUpdate};

pub const TABLE: &str = "product";

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product ORDER BY sku")
            .await?
            .take(0)?;
        Ok(products)
    }

    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Product>> {
        let product: Option<Product> = self.base.db().select(id.clone()).await?;
        Ok(product)
    }

    /// Find by SKU, case-insensitive
    pub async fn find_by_sku(&self, sku: &str) -> RepoResult<Option<Product>> {
        let sku_lower = sku.to_lowercase();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM product WHERE string::lowercase(sku) = $sku LIMIT 1")
            .bind(("sku", sku_lower))
            .await?;
        let products: Vec<Product> = result.take(0)?;
        Ok(products.into_iter().next())
    }

    /// Find by display name, case-insensitive
    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<Product>> {
        let name_lower = name.to_lowercase();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM product WHERE string::lowercase(name) = $name LIMIT 1")
            .bind(("name", name_lower))
            .await?;
        let products: Vec<Product> = result.take(0)?;
        Ok(products.into_iter().next())
    }

    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        if self.find_by_sku(&data.sku).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Product '{}' already exists",
                data.sku
            )));
        }
        let product = Product {
            id: None,
            sku: data.sku,
            name: data.name,
            price: data.price,
        };
        let created: Option<Product> = self.base.db().create(TABLE).content(product).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    pub async fn update(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        let rid = record_id(TABLE, id)?;
        let updated: Option<Product> = self.base.db().update(rid).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let rid = record_id(TABLE, id)?;
        let deleted: Option<Product> = self.base.db().delete(rid).await?;
        Ok(deleted.is_some())
    }
}
