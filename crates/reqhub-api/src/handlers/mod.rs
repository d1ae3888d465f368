//! HTTP request handlers, one module per resource.

pub mod collection;
pub mod folder;
pub mod health;
pub mod request;

use reqhub_core::error::AppError;

use crate::error::ApiError;

/// Fallback for unknown routes.
pub async fn not_found() -> ApiError {
    ApiError(AppError::not_found("No such endpoint"))
}
