//! Maps domain `AppError` to the response envelope.

use axum::Json;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

use reqhub_core::error::AppError;
use reqhub_core::types::ResponseCode;

use crate::dto::response::ApiResponse;

/// Handler error. Renders as an envelope with HTTP 200 and the business
/// code of the wrapped [`AppError`].
#[derive(Debug)]
pub struct ApiError(pub AppError);

/// Result type returned by handlers.
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let code = err.response_code();

        match code {
            ResponseCode::ServerError => {
                error!(kind = %err.kind, error = %err.chain(), "Request failed");
            }
            _ => {
                warn!(kind = %err.kind, error = %err.message, "Request rejected");
            }
        }

        Json(ApiResponse::fail(code, err.message)).into_response()
    }
}
