//! Convenience result type alias for ReqHub.

use crate::error::AppError;

/// A specialized `Result` type for ReqHub operations.
pub type AppResult<T> = Result<T, AppError>;
