//! # Pack Repository
//!
//! Database operations for the pack catalog.
//!
//! ## Catalog Replacement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  replace_all([250, 500, 1000])                          │
//! │                                                                         │
//! │  BEGIN                                                                 │
//! │    DELETE FROM packs                                                   │
//! │    INSERT INTO packs (size) VALUES (250)                               │
//! │    INSERT INTO packs (size) VALUES (500)                               │
//! │    INSERT INTO packs (size) VALUES (1000)                              │
//! │  COMMIT  ← readers see the old catalog or the new one, never a mix     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use packs_core::PackSize;

/// Repository for pack catalog operations.
#[derive(Debug, Clone)]
pub struct PackRepository {
    pool: SqlitePool,
}

impl PackRepository {
    /// Creates a new PackRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PackRepository { pool }
    }

    /// Lists the catalog, ascending by size.
    pub async fn list(&self) -> DbResult<Vec<PackSize>> {
        let sizes: Vec<i64> = sqlx::query_scalar("SELECT size FROM packs ORDER BY size ASC")
            .fetch_all(&self.pool)
            .await?;

        sizes
            .into_iter()
            .map(|size| {
                PackSize::try_from(size)
                    .map_err(|e| DbError::Serialization(format!("stored pack size {size}: {e}")))
            })
            .collect()
    }

    /// Replaces the whole catalog in one transaction.
    ///
    /// Duplicate sizes in `sizes` are stored once.
    pub async fn replace_all(&self, sizes: &[PackSize]) -> DbResult<()> {
        debug!(count = sizes.len(), "Replacing pack catalog");

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM packs").execute(&mut *tx).await?;

        for size in sizes {
            sqlx::query("INSERT OR IGNORE INTO packs (size) VALUES (?1)")
                .bind(i64::from(size.get()))
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// Counts catalog entries (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM packs")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};
    use packs_core::{PackSize, DEFAULT_PACK_SIZES};

    fn sizes(raw: &[u32]) -> Vec<PackSize> {
        raw.iter().filter_map(|&s| PackSize::new(s)).collect()
    }

    #[tokio::test]
    async fn test_fresh_database_has_default_catalog() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let catalog = db.packs().list().await.unwrap();
        assert_eq!(catalog, sizes(&DEFAULT_PACK_SIZES));
        assert_eq!(db.packs().count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_replace_all_is_sorted_and_deduplicated_on_read() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.packs();

        repo.replace_all(&sizes(&[53, 23, 31, 23])).await.unwrap();

        assert_eq!(repo.list().await.unwrap(), sizes(&[23, 31, 53]));
    }

    #[tokio::test]
    async fn test_replace_all_with_empty_catalog() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.packs();

        repo.replace_all(&[]).await.unwrap();

        assert!(repo.list().await.unwrap().is_empty());
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
