//! Database Module
//!
//! Embedded SurrealDB storage. One repository type per table under
//! [`repository`], models under [`models`].

pub mod models;
pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "brewtab";
const DATABASE: &str = "main";

/// Database service owning the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database at `db_path`.
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        tracing::info!(path = db_path, "Database connection established");
        Ok(Self { db })
    }

    /// In-memory database for tests.
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory db: {e}")))?;
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;
        Ok(Self { db })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn on_disk_database_opens_and_stores_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db");

        let service = DbService::new(path.to_str().unwrap()).await.unwrap();
        service
            .db
            .query("CREATE cafe SET slug = 'persisted', name = 'P', is_active = true")
            .await
            .unwrap();

        let mut result = service
            .db
            .query("SELECT count() FROM cafe GROUP ALL")
            .await
            .unwrap();
        let count: Option<i64> = result.take((0, "count")).unwrap();
        assert_eq!(count, Some(1));
        assert!(path.exists());
    }
}
