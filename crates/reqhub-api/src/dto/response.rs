//! Response envelope and payload DTOs.

use serde::{Deserialize, Serialize};

use reqhub_core::types::{CollectionId, FolderId, RequestId, ResponseCode};

/// Envelope wrapping every response body. Sent with HTTP 200 whatever the
/// outcome; `code` carries the business result.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Business response code.
    pub code: ResponseCode,
    /// Generic message for the code.
    pub msg: String,
    /// Payload, present on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error detail, present on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            code: ResponseCode::Success,
            msg: ResponseCode::Success.message().to_string(),
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    /// Creates a failure response with an error detail.
    pub fn fail(code: ResponseCode, error: impl Into<String>) -> Self {
        Self {
            code,
            msg: code.message().to_string(),
            data: None,
            error: Some(error.into()),
        }
    }
}

/// `{list: [...]}` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    /// Items.
    pub list: Vec<T>,
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(list: Vec<T>) -> Self {
        Self { list }
    }
}

/// Empty `{}` payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmptyResponse {}

/// Payload of `POST /folder/create`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolderResponse {
    /// Public identity of the new folder.
    pub folder_id: FolderId,
}

/// Payload of `POST /folder/rename`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameFolderResponse {
    /// Database id.
    pub id: i64,
    /// New name.
    pub name: String,
}

/// Payload of `POST /collections/create`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCollectionResponse {
    /// Database id.
    pub id: i64,
    /// Public identity.
    pub collection_id: CollectionId,
}

/// Payload of `POST /collections/edit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditCollectionResponse {
    /// Database id.
    pub id: i64,
    /// New name.
    pub name: String,
}

/// Payload of `POST /request/create`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRequestResponse {
    /// Database id.
    pub id: i64,
    /// Public identity.
    pub request_id: RequestId,
}

/// Health check payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` when the store answers.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Active store backend.
    pub store: String,
}
