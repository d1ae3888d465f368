//! Folder closure repository implementation.
//!
//! The associated functions taking a `PgConnection` let the folder
//! repository run closure maintenance inside its own transaction.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::{debug, warn};

use reqhub_core::error::{AppError, ErrorKind};
use reqhub_core::result::AppResult;
use reqhub_core::types::{CollectionId, FolderId};
use reqhub_entity::folder::FolderClosure;
use reqhub_entity::folder::closure::rows_under_parent;

use crate::store::ClosureStore;

/// Repository for the `folder_closures` table.
#[derive(Debug, Clone)]
pub struct ClosureRepository {
    pool: PgPool,
}

impl ClosureRepository {
    /// Create a new closure repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert the reflexive row on the given connection.
    pub async fn insert_reflexive(conn: &mut PgConnection, folder_id: FolderId) -> AppResult<()> {
        sqlx::query("INSERT INTO folder_closures (ancestor, descendant, depth) VALUES ($1, $1, 0)")
            .bind(folder_id)
            .execute(&mut *conn)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                    AppError::conflict(format!("Closure row for folder {folder_id} already exists"))
                }
                _ => AppError::with_source(
                    ErrorKind::Database,
                    "Failed to record folder self-closure",
                    e,
                ),
            })?;
        Ok(())
    }

    /// Link `child` under every ancestor of `parent` on the given connection.
    ///
    /// Existing `(ancestor, descendant)` pairs are skipped by the primary
    /// key, so concurrent or repeated calls never duplicate rows.
    pub async fn insert_under_parent(
        conn: &mut PgConnection,
        parent: FolderId,
        child: FolderId,
    ) -> AppResult<u64> {
        let parent_rows = sqlx::query_as::<_, FolderClosure>(
            "SELECT * FROM folder_closures WHERE descendant = $1",
        )
        .bind(parent)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                "Failed to load parent folder closures",
                e,
            )
        })?;

        let rows = rows_under_parent(parent, &parent_rows, child);
        if rows.is_empty() {
            warn!(
                parent_id = %parent,
                folder_id = %child,
                "Parent folder has no closure rows, folder stays a root"
            );
            return Ok(0);
        }

        let ancestors: Vec<FolderId> = rows.iter().map(|r| r.ancestor).collect();
        let descendants: Vec<FolderId> = rows.iter().map(|r| r.descendant).collect();
        let depths: Vec<i32> = rows.iter().map(|r| r.depth).collect();

        let result = sqlx::query(
            "INSERT INTO folder_closures (ancestor, descendant, depth) \
             SELECT * FROM UNNEST($1::uuid[], $2::uuid[], $3::int4[]) \
             ON CONFLICT (ancestor, descendant) DO NOTHING",
        )
        .bind(ancestors)
        .bind(descendants)
        .bind(depths)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                "Failed to record ancestor folder closures",
                e,
            )
        })?;

        debug!(
            parent_id = %parent,
            folder_id = %child,
            inserted = result.rows_affected(),
            "Propagated folder closures"
        );
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl ClosureStore for ClosureRepository {
    async fn record_self(&self, folder_id: FolderId) -> AppResult<()> {
        let mut conn = self.pool.acquire().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to acquire connection", e)
        })?;
        Self::insert_reflexive(&mut conn, folder_id).await
    }

    async fn record_under_parent(&self, parent: FolderId, child: FolderId) -> AppResult<u64> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;
        let inserted = Self::insert_under_parent(&mut tx, parent, child).await?;
        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit closures", e)
        })?;
        Ok(inserted)
    }

    async fn ancestors_of(&self, folder_id: FolderId) -> AppResult<Vec<FolderClosure>> {
        sqlx::query_as::<_, FolderClosure>(
            "SELECT * FROM folder_closures WHERE descendant = $1 ORDER BY depth DESC",
        )
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find ancestors", e))
    }

    async fn descendants_of(&self, folder_id: FolderId) -> AppResult<Vec<FolderClosure>> {
        sqlx::query_as::<_, FolderClosure>(
            "SELECT * FROM folder_closures WHERE ancestor = $1 ORDER BY depth ASC",
        )
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find descendants", e))
    }

    async fn find_by_collection(
        &self,
        collection_id: CollectionId,
    ) -> AppResult<Vec<FolderClosure>> {
        sqlx::query_as::<_, FolderClosure>(
            "SELECT c.ancestor, c.descendant, c.depth FROM folder_closures c \
             INNER JOIN folders f ON f.folder_id = c.ancestor \
             WHERE f.collection_id = $1 ORDER BY c.depth ASC, f.id ASC",
        )
        .bind(collection_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list folder closures", e)
        })
    }
}
