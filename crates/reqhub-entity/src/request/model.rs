//! Request entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use reqhub_core::types::{CollectionId, FolderId, RequestId};

use crate::protocol::{Method, Protocol};

/// Name given to a request created without one.
pub const DEFAULT_REQUEST_NAME: &str = "New Request";

/// Width of the `requests.name` column, in characters.
pub const REQUEST_NAME_MAX_CHARS: usize = 128;

/// Width of the `requests.path` column, in characters.
pub const REQUEST_PATH_MAX_CHARS: usize = 512;

/// A request definition, a leaf of the collection tree.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Request {
    /// Database id.
    pub id: i64,
    /// Public identity, distinct from the database id.
    pub request_id: RequestId,
    /// Containing collection.
    pub collection_id: CollectionId,
    /// Containing folder; `None` means the collection root.
    pub folder_id: Option<FolderId>,
    /// Display name.
    pub name: String,
    /// Protocol.
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub protocol: Protocol,
    /// Method.
    pub method: Method,
    /// Target path or URL.
    pub path: String,
    /// Free-form description.
    pub description: String,
    /// When the request was created.
    pub created_at: DateTime<Utc>,
    /// When the request was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to insert a request row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRequest {
    /// Public identity, generated by the caller.
    pub request_id: RequestId,
    /// Containing collection.
    pub collection_id: CollectionId,
    /// Containing folder.
    pub folder_id: Option<FolderId>,
    /// Display name.
    pub name: String,
    /// Protocol.
    pub protocol: Protocol,
    /// Method.
    pub method: Method,
    /// Target path.
    pub path: String,
}
