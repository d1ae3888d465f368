//! Folder repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use reqhub_core::error::{AppError, ErrorKind};
use reqhub_core::result::AppResult;
use reqhub_core::types::{CollectionId, FolderId};
use reqhub_entity::folder::{Folder, NewFolder};

use crate::repositories::closure::ClosureRepository;
use crate::repositories::collection::CollectionRepository;
use crate::store::{FolderStore, SubtreeRemoval};

/// Repository for folder CRUD; keeps the closure table in step on writes.
///
/// `create` and `delete_subtree` lock the owning collection row (see
/// [`CollectionRepository::lock_shared`]) before reading closure rows.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: PgPool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FolderStore for FolderRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    async fn find_by_folder_id(&self, folder_id: FolderId) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE folder_id = $1")
            .bind(folder_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    async fn find_by_collection(&self, collection_id: CollectionId) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE collection_id = $1 ORDER BY id ASC",
        )
        .bind(collection_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list folders", e))
    }

    async fn create(&self, data: &NewFolder, parent: Option<FolderId>) -> AppResult<Folder> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        CollectionRepository::lock_shared(&mut tx, data.collection_id).await?;

        let folder = sqlx::query_as::<_, Folder>(
            "INSERT INTO folders (folder_id, collection_id, name) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(data.folder_id)
        .bind(data.collection_id)
        .bind(&data.name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::conflict(format!("Folder {} already exists", data.folder_id))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create folder", e),
        })?;

        // Dropping `tx` on any early return rolls the folder row back.
        ClosureRepository::insert_reflexive(&mut tx, folder.folder_id).await?;
        if let Some(parent) = parent {
            ClosureRepository::insert_under_parent(&mut tx, parent, folder.folder_id).await?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit folder creation", e)
        })?;

        Ok(folder)
    }

    async fn rename(&self, id: i64, name: &str) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "UPDATE folders SET name = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rename folder", e))?
        .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))
    }

    async fn delete_subtree(&self, id: i64) -> AppResult<SubtreeRemoval> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let collection_id: CollectionId =
            sqlx::query_scalar("SELECT collection_id FROM folders WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to find folder", e)
                })?
                .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?;

        CollectionRepository::lock_exclusive(&mut tx, collection_id).await?;

        // Re-read under the lock: a concurrent delete may have removed it.
        let folder_id: FolderId =
            sqlx::query_scalar("SELECT folder_id FROM folders WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to find folder", e)
                })?
                .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?;

        let mut subtree: Vec<FolderId> =
            sqlx::query_scalar("SELECT descendant FROM folder_closures WHERE ancestor = $1")
                .bind(folder_id)
                .fetch_all(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to find descendants", e)
                })?;
        if !subtree.contains(&folder_id) {
            subtree.push(folder_id);
        }

        let requests = sqlx::query("DELETE FROM requests WHERE folder_id = ANY($1)")
            .bind(subtree.clone())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete requests", e))?
            .rows_affected();

        let closures = sqlx::query(
            "DELETE FROM folder_closures WHERE ancestor = ANY($1) OR descendant = ANY($1)",
        )
        .bind(subtree.clone())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to delete folder closures", e)
        })?
        .rows_affected();

        let folders = sqlx::query("DELETE FROM folders WHERE folder_id = ANY($1)")
            .bind(subtree)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete folders", e))?
            .rows_affected();

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit folder deletion", e)
        })?;

        info!(folder_id = %folder_id, folders, closures, requests, "Folder subtree deleted");

        Ok(SubtreeRemoval {
            folders,
            closures,
            requests,
        })
    }
}
