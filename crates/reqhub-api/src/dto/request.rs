//! Request DTOs with validation.

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use reqhub_core::types::{CollectionId, FolderId};

/// Reads an optional folder reference where `""` means "none".
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<FolderId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// `POST /folder/create` body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFolderRequest {
    /// Owning collection.
    pub collection_id: CollectionId,
    /// Folder name; blank means "New Folder".
    #[validate(length(max = 64, message = "Folder name is too long"))]
    pub name: Option<String>,
    /// Parent folder.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub folder_id: Option<FolderId>,
}

/// `POST /folder/delete` body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DeleteFolderRequest {
    /// Database id of the folder.
    #[validate(range(min = 1, message = "id must be positive"))]
    pub id: i64,
}

/// `POST /folder/rename` body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameFolderRequest {
    /// Database id of the folder.
    #[validate(range(min = 1, message = "id must be positive"))]
    pub id: i64,
    /// New name.
    #[validate(length(min = 1, max = 64, message = "Folder name must be 1-64 characters"))]
    pub name: String,
}

/// `?collection_id=` query.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CollectionQuery {
    /// Collection to read.
    pub collection_id: CollectionId,
}

/// `?folder_id=` query.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FolderQuery {
    /// Folder to read.
    pub folder_id: FolderId,
}

/// `?workspace_id=` query.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WorkspaceQuery {
    /// Workspace to list.
    #[validate(range(min = 1, message = "workspace_id must be positive"))]
    pub workspace_id: i64,
}

/// `POST /collections/create` body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCollectionRequest {
    /// Owning workspace.
    #[validate(range(min = 1, message = "workspace_id must be positive"))]
    pub workspace_id: i64,
    /// Collection name.
    #[validate(length(
        min = 1,
        max = 128,
        message = "Collection name must be 1-128 characters"
    ))]
    pub name: String,
    /// `HTTP`, `WebSocket` or `gRPC`; anything else means `HTTP`.
    #[serde(default)]
    pub protocol: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
}

/// `POST /collections/edit` body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EditCollectionRequest {
    /// Database id of the collection.
    #[validate(range(min = 1, message = "id must be positive"))]
    pub id: i64,
    /// New name.
    #[validate(length(
        min = 1,
        max = 128,
        message = "Collection name must be 1-128 characters"
    ))]
    pub name: String,
}

/// `DELETE /collections/delete?id=` query.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DeleteCollectionQuery {
    /// Database id of the collection.
    #[validate(range(min = 1, message = "id must be positive"))]
    pub id: i64,
}

/// `POST /request/create` body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRequestBody {
    /// Owning collection.
    pub collection_id: CollectionId,
    /// Containing folder; blank places the request at the collection root.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub folder_id: Option<FolderId>,
    /// Request name; blank means "New Request".
    #[validate(length(max = 128, message = "Request name is too long"))]
    pub name: Option<String>,
    /// `HTTP`, `WebSocket` or `gRPC`.
    #[serde(rename = "type")]
    pub protocol: String,
    /// `GET`, `POST`, `PUT` or `DELETE`.
    pub method: String,
    /// Target path.
    #[serde(default)]
    #[validate(length(max = 512, message = "Request path is too long"))]
    pub path: String,
}
