//! Collection handlers.

use axum::Json;
use axum::extract::State;

use reqhub_entity::folder::CollectionNode;
use reqhub_entity::protocol::Protocol;
use reqhub_service::collection::CreateCollectionParams;

use crate::dto::request::{
    CreateCollectionRequest, DeleteCollectionQuery, EditCollectionRequest, WorkspaceQuery,
};
use crate::dto::response::{
    ApiResponse, CreateCollectionResponse, EditCollectionResponse, EmptyResponse, ListResponse,
};
use crate::error::ApiResult;
use crate::extractors::{ValidJson, ValidQuery};
use crate::state::AppState;

/// POST /collections/create
pub async fn create_collection(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<CreateCollectionRequest>,
) -> ApiResult<CreateCollectionResponse> {
    let collection = state
        .collection_service
        .create_collection(CreateCollectionParams {
            workspace_id: req.workspace_id,
            name: req.name,
            protocol: Protocol::parse_or_default(&req.protocol),
            description: req.description,
        })
        .await?;

    Ok(Json(ApiResponse::ok(CreateCollectionResponse {
        id: collection.id,
        collection_id: collection.collection_id,
    })))
}

/// GET /collections/list?workspace_id=
pub async fn list_collections(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<WorkspaceQuery>,
) -> ApiResult<ListResponse<CollectionNode>> {
    let trees = state
        .collection_service
        .list_trees(query.workspace_id)
        .await?;
    Ok(Json(ApiResponse::ok(trees.into())))
}

/// POST /collections/edit
pub async fn edit_collection(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<EditCollectionRequest>,
) -> ApiResult<EditCollectionResponse> {
    let collection = state
        .collection_service
        .rename_collection(req.id, &req.name)
        .await?;
    Ok(Json(ApiResponse::ok(EditCollectionResponse {
        id: collection.id,
        name: collection.name,
    })))
}

/// DELETE /collections/delete?id=
pub async fn delete_collection(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<DeleteCollectionQuery>,
) -> ApiResult<EmptyResponse> {
    state.collection_service.delete_collection(query.id).await?;
    Ok(Json(ApiResponse::ok(EmptyResponse::default())))
}
