pub mod cache;
pub mod db;

pub use cache::MemoryStore;
pub use db::SqliteStore;

use crate::domain::error::CraftyError;
use crate::domain::traits::CacheStore;
use crate::infrastructure::config::{get_database_path, Config, StorageBackend};
use std::sync::Arc;
use tracing::info;

/// Open the store selected by `[storage] backend`.
pub async fn open_store(config: &Config) -> Result<Arc<dyn CacheStore>, CraftyError> {
    match config.storage.backend {
        StorageBackend::Memory => {
            info!("using in-memory cache store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::Sqlite => {
            let db_path = get_database_path(config);
            if let Some(parent) = db_path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            info!(path = %db_path.display(), "using sqlite cache store");
            let conn = db::init_database(&db_path).await?;
            Ok(Arc::new(SqliteStore::new(conn)))
        }
    }
}
