//! RocksDB-backed storage smoke test

use promo_server::db::DbService;
use promo_server::db::models::NetworkCreate;
use promo_server::db::repository::NetworkRepository;

#[tokio::test]
async fn rocksdb_database_opens_and_stores_rows() {
    let dir = tempfile::tempdir().unwrap();
    let service = DbService::new(dir.path()).await.unwrap();

    let repo = NetworkRepository::new(service.db.clone());
    repo.create(NetworkCreate {
        code: "tele2".to_string(),
        name: "Tele2".to_string(),
    })
    .await
    .unwrap();

    // Codes are stored uppercased and looked up case-insensitively
    let found = repo.find_by_code("TELE2").await.unwrap().unwrap();
    assert_eq!(found.code, "TELE2");

    // Unique index rejects a duplicate code regardless of case
    assert!(
        repo.create(NetworkCreate {
            code: "Tele2".to_string(),
            name: "Tele2 again".to_string(),
        })
        .await
        .is_err()
    );
}
