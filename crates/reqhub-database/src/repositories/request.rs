//! Request repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use reqhub_core::error::{AppError, ErrorKind};
use reqhub_core::result::AppResult;
use reqhub_core::types::CollectionId;
use reqhub_entity::request::{CreateRequest, Request};

use crate::store::RequestStore;

/// Repository for the `requests` table.
#[derive(Debug, Clone)]
pub struct RequestRepository {
    pool: PgPool,
}

impl RequestRepository {
    /// Create a new request repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RequestStore for RequestRepository {
    async fn find_by_collection(&self, collection_id: CollectionId) -> AppResult<Vec<Request>> {
        sqlx::query_as::<_, Request>(
            "SELECT * FROM requests WHERE collection_id = $1 ORDER BY id ASC",
        )
        .bind(collection_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list requests", e))
    }

    async fn create(&self, data: &CreateRequest) -> AppResult<Request> {
        sqlx::query_as::<_, Request>(
            "INSERT INTO requests (request_id, collection_id, folder_id, name, type, method, path) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(data.request_id)
        .bind(data.collection_id)
        .bind(data.folder_id)
        .bind(&data.name)
        .bind(data.protocol)
        .bind(data.method)
        .bind(&data.path)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create request", e))
    }
}
