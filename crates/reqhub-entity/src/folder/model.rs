//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use reqhub_core::types::{CollectionId, FolderId};

/// Name given to a folder created without one.
pub const DEFAULT_FOLDER_NAME: &str = "New Folder";

/// Width of the `folders.name` column, in characters.
pub const FOLDER_NAME_MAX_CHARS: usize = 64;

/// A folder inside a collection.
///
/// The folder's place in the hierarchy is not stored on the row; it lives
/// in the closure table keyed by `folder_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Database id, used by rename and delete.
    pub id: i64,
    /// Public identity, stable across renames and never reused.
    pub folder_id: FolderId,
    /// Containing collection.
    pub collection_id: CollectionId,
    /// Display name.
    pub name: String,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to insert a folder row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFolder {
    /// Public identity, generated by the caller.
    pub folder_id: FolderId,
    /// Containing collection.
    pub collection_id: CollectionId,
    /// Display name.
    pub name: String,
}
