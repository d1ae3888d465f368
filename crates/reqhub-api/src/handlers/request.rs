//! Request definition handlers.

use axum::Json;
use axum::extract::State;

use reqhub_entity::protocol::{Method, Protocol};
use reqhub_service::request::CreateRequestParams;

use crate::dto::request::CreateRequestBody;
use crate::dto::response::{ApiResponse, CreateRequestResponse};
use crate::error::ApiResult;
use crate::extractors::ValidJson;
use crate::state::AppState;

/// POST /request/create
pub async fn create_request(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<CreateRequestBody>,
) -> ApiResult<CreateRequestResponse> {
    let protocol: Protocol = req.protocol.parse()?;
    let method: Method = req.method.parse()?;

    let request = state
        .request_service
        .create_request(CreateRequestParams {
            collection_id: req.collection_id,
            folder_id: req.folder_id,
            name: req.name,
            protocol,
            method,
            path: req.path,
        })
        .await?;

    Ok(Json(ApiResponse::ok(CreateRequestResponse {
        id: request.id,
        request_id: request.request_id,
    })))
}
