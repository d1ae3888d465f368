//! Collection entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use reqhub_core::types::CollectionId;

use crate::protocol::Protocol;

/// Width of the `collections.name` column, in characters.
pub const COLLECTION_NAME_MAX_CHARS: usize = 128;

/// Top of the hierarchy: owns folders and requests inside one workspace.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Collection {
    /// Database id.
    pub id: i64,
    /// Public identity referenced by folders and requests.
    pub collection_id: CollectionId,
    /// Owning workspace.
    pub workspace_id: i64,
    /// Display name.
    pub name: String,
    /// Creating user, when known.
    pub owner_id: Option<i64>,
    /// Default protocol for requests in this collection.
    pub protocol: Protocol,
    /// Free-form description.
    pub description: String,
    /// Number of members sharing the collection.
    pub members_count: i32,
    /// When the collection was created.
    pub created_at: DateTime<Utc>,
    /// When the collection was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCollection {
    /// Public identity, generated by the caller.
    pub collection_id: CollectionId,
    /// Owning workspace.
    pub workspace_id: i64,
    /// Display name.
    pub name: String,
    /// Creating user.
    pub owner_id: Option<i64>,
    /// Protocol.
    pub protocol: Protocol,
    /// Description.
    pub description: String,
}
