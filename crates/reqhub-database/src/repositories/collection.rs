//! Collection repository implementation.
//!
//! Structural writes inside a collection lock its row first: folder
//! creation takes a shared lock, subtree and collection deletes take an
//! exclusive one. A delete therefore never interleaves with a create that
//! reads the closure rows it is about to remove.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::info;

use reqhub_core::error::{AppError, ErrorKind};
use reqhub_core::result::AppResult;
use reqhub_core::types::CollectionId;
use reqhub_entity::collection::{Collection, CreateCollection};

use crate::store::{CollectionRemoval, CollectionStore};

/// Repository for the `collections` table.
#[derive(Debug, Clone)]
pub struct CollectionRepository {
    pool: PgPool,
}

impl CollectionRepository {
    /// Create a new collection repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Take a `FOR SHARE` lock on the collection row. `NotFound` if absent.
    pub async fn lock_shared(conn: &mut PgConnection, id: CollectionId) -> AppResult<()> {
        Self::lock(conn, id, "SELECT id FROM collections WHERE collection_id = $1 FOR SHARE")
            .await
    }

    /// Take a `FOR UPDATE` lock on the collection row. `NotFound` if absent.
    pub async fn lock_exclusive(conn: &mut PgConnection, id: CollectionId) -> AppResult<()> {
        Self::lock(conn, id, "SELECT id FROM collections WHERE collection_id = $1 FOR UPDATE")
            .await
    }

    async fn lock(conn: &mut PgConnection, id: CollectionId, sql: &'static str) -> AppResult<()> {
        sqlx::query_scalar::<_, i64>(sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock collection", e))?
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(format!("Collection {id} not found")))
    }
}

#[async_trait]
impl CollectionStore for CollectionRepository {
    async fn find_by_collection_id(&self, id: CollectionId) -> AppResult<Option<Collection>> {
        sqlx::query_as::<_, Collection>("SELECT * FROM collections WHERE collection_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find collection", e))
    }

    async fn find_by_workspace(&self, workspace_id: i64) -> AppResult<Vec<Collection>> {
        sqlx::query_as::<_, Collection>(
            "SELECT * FROM collections WHERE workspace_id = $1 ORDER BY id ASC",
        )
        .bind(workspace_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list collections", e))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Collection>> {
        sqlx::query_as::<_, Collection>("SELECT * FROM collections WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find collection", e))
    }

    async fn create(&self, data: &CreateCollection) -> AppResult<Collection> {
        sqlx::query_as::<_, Collection>(
            "INSERT INTO collections (collection_id, workspace_id, name, owner_id, protocol, description) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(data.collection_id)
        .bind(data.workspace_id)
        .bind(&data.name)
        .bind(data.owner_id)
        .bind(data.protocol)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::conflict(format!("Collection {} already exists", data.collection_id))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create collection", e),
        })
    }

    async fn rename(&self, id: i64, name: &str) -> AppResult<Collection> {
        sqlx::query_as::<_, Collection>(
            "UPDATE collections SET name = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rename collection", e))?
        .ok_or_else(|| AppError::not_found(format!("Collection {id} not found")))
    }

    async fn delete_with_contents(&self, id: i64) -> AppResult<CollectionRemoval> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let collection_id: CollectionId =
            sqlx::query_scalar("SELECT collection_id FROM collections WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to find collection", e)
                })?
                .ok_or_else(|| AppError::not_found(format!("Collection {id} not found")))?;

        let requests = sqlx::query("DELETE FROM requests WHERE collection_id = $1")
            .bind(collection_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete requests", e))?
            .rows_affected();

        let closures = sqlx::query(
            "DELETE FROM folder_closures c USING folders f \
             WHERE f.collection_id = $1 AND (c.ancestor = f.folder_id OR c.descendant = f.folder_id)",
        )
        .bind(collection_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to delete folder closures", e)
        })?
        .rows_affected();

        let folders = sqlx::query("DELETE FROM folders WHERE collection_id = $1")
            .bind(collection_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete folders", e))?
            .rows_affected();

        sqlx::query("DELETE FROM collections WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete collection", e)
            })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit collection deletion", e)
        })?;

        info!(collection_id = %collection_id, folders, closures, requests, "Collection deleted");

        Ok(CollectionRemoval {
            folders,
            closures,
            requests,
        })
    }
}
