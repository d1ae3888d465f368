//! Store traits: the relational data-access interface used by services.
//!
//! Each trait is implemented by a PostgreSQL repository in
//! [`crate::repositories`] and by [`crate::memory::MemoryStore`]. Both
//! backends must give the same answers, including which calls fail.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use reqhub_core::result::AppResult;
use reqhub_core::types::{CollectionId, FolderId};
use reqhub_entity::collection::{Collection, CreateCollection};
use reqhub_entity::folder::{Folder, FolderClosure, NewFolder};
use reqhub_entity::request::{CreateRequest, Request};

/// Row counts removed by a cascading folder delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtreeRemoval {
    /// Folder rows deleted (the target and every descendant).
    pub folders: u64,
    /// Closure rows deleted.
    pub closures: u64,
    /// Request rows deleted.
    pub requests: u64,
}

/// Row counts removed by a collection delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionRemoval {
    /// Folder rows deleted.
    pub folders: u64,
    /// Closure rows deleted.
    pub closures: u64,
    /// Request rows deleted.
    pub requests: u64,
}

/// Collection rows.
#[async_trait]
pub trait CollectionStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a collection by its public identity.
    async fn find_by_collection_id(&self, id: CollectionId) -> AppResult<Option<Collection>>;

    /// All collections of a workspace, in creation order.
    async fn find_by_workspace(&self, workspace_id: i64) -> AppResult<Vec<Collection>>;

    /// Find a collection by database id.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Collection>>;

    /// Insert a collection.
    async fn create(&self, data: &CreateCollection) -> AppResult<Collection>;

    /// Update the collection name. `NotFound` if the id does not exist.
    async fn rename(&self, id: i64, name: &str) -> AppResult<Collection>;

    /// Delete the collection with its folders, their closure rows and its
    /// requests, atomically. `NotFound` if the id does not exist.
    async fn delete_with_contents(&self, id: i64) -> AppResult<CollectionRemoval>;
}

/// The folder closure table.
#[async_trait]
pub trait ClosureStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert the reflexive `(id, id, 0)` row. Fails with `Conflict` if it
    /// already exists.
    async fn record_self(&self, folder_id: FolderId) -> AppResult<()>;

    /// Insert `(a, child, d + 1)` for every `(a, parent, d)` row, skipping
    /// pairs that already exist. Returns the number of rows inserted; zero
    /// when the parent has no rows.
    async fn record_under_parent(&self, parent: FolderId, child: FolderId) -> AppResult<u64>;

    /// Rows whose descendant is `folder_id`, deepest ancestor first.
    async fn ancestors_of(&self, folder_id: FolderId) -> AppResult<Vec<FolderClosure>>;

    /// Rows whose ancestor is `folder_id`, nearest first.
    async fn descendants_of(&self, folder_id: FolderId) -> AppResult<Vec<FolderClosure>>;

    /// Every row whose ancestor is a folder of the collection.
    async fn find_by_collection(&self, collection_id: CollectionId)
    -> AppResult<Vec<FolderClosure>>;
}

/// Folder rows. Writes that touch the closure table are atomic.
#[async_trait]
pub trait FolderStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a folder by database id.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Folder>>;

    /// Find a folder by public identity.
    async fn find_by_folder_id(&self, folder_id: FolderId) -> AppResult<Option<Folder>>;

    /// Folders of a collection in creation order.
    async fn find_by_collection(&self, collection_id: CollectionId) -> AppResult<Vec<Folder>>;

    /// Insert the folder row, its reflexive closure row and, when `parent`
    /// is given, the rows linking it under the parent's ancestors. All or
    /// nothing: on any failure no row is left behind.
    async fn create(&self, data: &NewFolder, parent: Option<FolderId>) -> AppResult<Folder>;

    /// Update the folder name. `NotFound` if the id does not exist.
    async fn rename(&self, id: i64, name: &str) -> AppResult<Folder>;

    /// Delete the folder, all its descendants, their closure rows and the
    /// requests they hold, atomically. `NotFound` if the id does not exist.
    async fn delete_subtree(&self, id: i64) -> AppResult<SubtreeRemoval>;
}

/// Request rows.
#[async_trait]
pub trait RequestStore: Send + Sync + std::fmt::Debug + 'static {
    /// Requests of a collection in creation order.
    async fn find_by_collection(&self, collection_id: CollectionId) -> AppResult<Vec<Request>>;

    /// Insert a request.
    async fn create(&self, data: &CreateRequest) -> AppResult<Request>;
}
