//! Folder handlers.

use axum::Json;
use axum::extract::State;

use reqhub_entity::folder::{Folder, TreeNode};
use reqhub_service::folder::CreateFolderParams;

use crate::dto::request::{
    CollectionQuery, CreateFolderRequest, DeleteFolderRequest, FolderQuery, RenameFolderRequest,
};
use crate::dto::response::{
    ApiResponse, CreateFolderResponse, EmptyResponse, ListResponse, RenameFolderResponse,
};
use crate::error::ApiResult;
use crate::extractors::{ValidJson, ValidQuery};
use crate::state::AppState;

/// POST /folder/create
pub async fn create_folder(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<CreateFolderRequest>,
) -> ApiResult<CreateFolderResponse> {
    let folder = state
        .folder_service
        .create_folder(CreateFolderParams {
            collection_id: req.collection_id,
            name: req.name,
            parent_id: req.folder_id,
        })
        .await?;

    Ok(Json(ApiResponse::ok(CreateFolderResponse {
        folder_id: folder.folder_id,
    })))
}

/// POST /folder/delete
pub async fn delete_folder(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<DeleteFolderRequest>,
) -> ApiResult<EmptyResponse> {
    state.folder_service.delete_folder(req.id).await?;
    Ok(Json(ApiResponse::ok(EmptyResponse::default())))
}

/// POST /folder/rename
pub async fn rename_folder(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<RenameFolderRequest>,
) -> ApiResult<RenameFolderResponse> {
    let folder = state.folder_service.rename_folder(req.id, &req.name).await?;
    Ok(Json(ApiResponse::ok(RenameFolderResponse {
        id: folder.id,
        name: folder.name,
    })))
}

/// GET /folder/list?collection_id=
pub async fn list_folders(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<CollectionQuery>,
) -> ApiResult<ListResponse<Folder>> {
    let folders = state
        .folder_service
        .list_by_collection(query.collection_id)
        .await?;
    Ok(Json(ApiResponse::ok(folders.into())))
}

/// GET /folder/tree?folder_id=
///
/// The root is tagged like any other tree node (`kind: "folder"`).
pub async fn get_tree(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<FolderQuery>,
) -> ApiResult<TreeNode> {
    let tree = state.tree_service.get_tree(query.folder_id).await?;
    Ok(Json(ApiResponse::ok(TreeNode::Folder(tree))))
}

/// GET /folder/ancestors?folder_id=
pub async fn get_ancestors(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<FolderQuery>,
) -> ApiResult<ListResponse<Folder>> {
    let trail = state.tree_service.get_breadcrumbs(query.folder_id).await?;
    Ok(Json(ApiResponse::ok(trail.into())))
}
