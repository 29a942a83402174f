use crate::domain::cache::{CacheEntry, Collection};
use crate::domain::error::CraftyError;
use crate::domain::traits::CacheStore;
use async_trait::async_trait;
use std::path::Path;
use tokio_rusqlite::Connection;

pub async fn init_database(db_path: &Path) -> Result<Connection, CraftyError> {
    let db = Connection::open(db_path.to_path_buf()).await?;
    create_schema(&db).await?;
    Ok(db)
}

/// Same schema on a private in-memory database.
pub async fn init_memory_database() -> Result<Connection, CraftyError> {
    let db = Connection::open_in_memory().await?;
    create_schema(&db).await?;
    Ok(db)
}

async fn create_schema(db: &Connection) -> Result<(), CraftyError> {
    db.call(|conn| {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS cache_entries (
                collection TEXT NOT NULL,
                key TEXT NOT NULL,
                payload BLOB NOT NULL,
                compressed_size INTEGER NOT NULL,
                original_size INTEGER NOT NULL,
                stored_at INTEGER NOT NULL,
                PRIMARY KEY (collection, key)
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_cache_stored_at ON cache_entries(stored_at)",
            [],
        )?;

        Ok::<_, rusqlite::Error>(())
    })
    .await?;

    Ok(())
}

/// SQLite document store. Payloads are JSON compressed with zstd.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl CacheStore for SqliteStore {
    async fn get(
        &self,
        collection: Collection,
        key: &str,
    ) -> Result<Option<CacheEntry>, CraftyError> {
        query_entry(&self.conn, collection, key).await
    }

    async fn put(&self, collection: Collection, entry: CacheEntry) -> Result<(), CraftyError> {
        upsert_entry(&self.conn, collection, entry).await
    }

    async fn count(&self, collection: Collection) -> Result<usize, CraftyError> {
        use tokio_rusqlite::params;

        let name = collection.as_str();
        let count: i64 = self
            .conn
            .call(move |conn| {
                conn.query_row(
                    "SELECT COUNT(*) FROM cache_entries WHERE collection = ?",
                    params![name],
                    |row| row.get(0),
                )
            })
            .await?;

        Ok(count as usize)
    }

    async fn prune_older_than(&self, cutoff_ms: i64) -> Result<usize, CraftyError> {
        use tokio_rusqlite::params;

        let removed = self
            .conn
            .call(move |conn| {
                conn.execute(
                    "DELETE FROM cache_entries WHERE stored_at < ?",
                    params![cutoff_ms],
                )
            })
            .await?;

        Ok(removed)
    }
}

async fn query_entry(
    db: &Connection,
    collection: Collection,
    key: &str,
) -> Result<Option<CacheEntry>, CraftyError> {
    use rusqlite::OptionalExtension;
    use std::io::Cursor;
    use tokio_rusqlite::params;
    use zstd::stream::decode_all;

    let name = collection.as_str();
    let key_string = key.to_string();
    let entry = db
        .call(move |conn| {
            conn.query_row(
                "SELECT key, payload, stored_at FROM cache_entries WHERE collection = ? AND key = ?",
                params![name, key_string],
                |row| {
                    let key: String = row.get(0)?;
                    let compressed: Vec<u8> = row.get(1)?;
                    let stored_at: i64 = row.get(2)?;
                    let decompressed = decode_all(Cursor::new(&compressed)).map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(
                            1,
                            rusqlite::types::Type::Blob,
                            Box::new(e),
                        )
                    })?;
                    let payload: serde_json::Value = serde_json::from_slice(&decompressed)
                        .map_err(|e| {
                            rusqlite::Error::FromSqlConversionFailure(
                                1,
                                rusqlite::types::Type::Blob,
                                Box::new(e),
                            )
                        })?;
                    Ok(CacheEntry {
                        key,
                        payload,
                        stored_at,
                    })
                },
            )
            .optional()
        })
        .await?;

    Ok(entry)
}

async fn upsert_entry(
    db: &Connection,
    collection: Collection,
    entry: CacheEntry,
) -> Result<(), CraftyError> {
    use std::io::Cursor;
    use tokio_rusqlite::params;
    use zstd::stream::encode_all;

    let serialized = serde_json::to_vec(&entry.payload)?;
    let compressed = encode_all(Cursor::new(&serialized), 0)?;
    let compressed_len = compressed.len();
    let original_len = serialized.len();
    let name = collection.as_str();

    db.call(move |conn| {
        conn.execute(
            "INSERT OR REPLACE INTO cache_entries (collection, key, payload, compressed_size, original_size, stored_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                name,
                entry.key,
                compressed,
                compressed_len,
                original_len,
                entry.stored_at
            ],
        )
    })
    .await?;

    Ok(())
}
