//! Repository Module
//!
//! One repository per aggregate over a shared [`BaseRepository`]. All IDs use
//! the `table:key` convention via [`surrealdb::RecordId`].

pub mod bonus;
pub mod communication;
pub mod geo;
pub mod inventory;
pub mod invitation;
pub mod plan;
pub mod product;
pub mod sale;
pub mod user;

pub use bonus::{BonusNetworkRepository, BonusTierRepository};
pub use communication::{MessageRepository, TaskRepository};
pub use geo::{NetworkRepository, RegionRepository, StoreRepository};
pub use inventory::InventoryRepository;
pub use invitation::InvitationRepository;
pub use plan::PlanRepository;
pub use product::ProductRepository;
pub use sale::SaleRepository;
pub use user::UserRepository;

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

/// Parse an API-supplied id into a [`RecordId`] of the expected table.
/// Accepts both the full `table:key` form and a bare key.
pub fn record_id(table: &str, id: &str) -> RepoResult<RecordId> {
    match id.split_once(':') {
        Some((tb, key)) => {
            if tb != table {
                return Err(RepoError::Validation(format!(
                    "Expected {table} id, got: {id}"
                )));
            }
            Ok(RecordId::from_table_key(tb, key))
        }
        None => Ok(RecordId::from_table_key(table, id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_accepts_bare_and_prefixed_keys() {
        assert_eq!(
            record_id("network", "abc").unwrap(),
            RecordId::from_table_key("network", "abc")
        );
        assert_eq!(
            record_id("network", "network:abc").unwrap(),
            RecordId::from_table_key("network", "abc")
        );
    }

    #[test]
    fn record_id_rejects_wrong_table() {
        assert!(record_id("network", "store:abc").is_err());
    }
}
