//! In-memory implementation of every store trait.
//!
//! All tables sit behind one lock, so each trait method is atomic: a write
//! validates everything it needs before touching any table, which gives
//! the same all-or-nothing behaviour as a PostgreSQL transaction.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use reqhub_core::error::AppError;
use reqhub_core::result::AppResult;
use reqhub_core::types::{CollectionId, FolderId};
use reqhub_entity::collection::{Collection, CreateCollection};
use reqhub_entity::folder::closure::rows_under_parent;
use reqhub_entity::folder::{Folder, FolderClosure, NewFolder};
use reqhub_entity::request::{CreateRequest, Request};

use crate::store::{
    ClosureStore, CollectionRemoval, CollectionStore, FolderStore, RequestStore, SubtreeRemoval,
};

#[derive(Debug, Default)]
struct Tables {
    collections: Vec<Collection>,
    folders: Vec<Folder>,
    closures: Vec<FolderClosure>,
    requests: Vec<Request>,
    collection_seq: i64,
    folder_seq: i64,
    request_seq: i64,
}

impl Tables {
    fn has_closure(&self, ancestor: FolderId, descendant: FolderId) -> bool {
        self.closures
            .iter()
            .any(|c| c.ancestor == ancestor && c.descendant == descendant)
    }

    fn rows_with_descendant(&self, descendant: FolderId) -> Vec<FolderClosure> {
        self.closures
            .iter()
            .filter(|c| c.descendant == descendant)
            .copied()
            .collect()
    }

    /// Rows that would link `child` under `parent`, minus pairs already present.
    fn propagation_rows(&self, parent: FolderId, child: FolderId) -> Vec<FolderClosure> {
        let parent_rows = self.rows_with_descendant(parent);
        let rows = rows_under_parent(parent, &parent_rows, child);
        if rows.is_empty() {
            warn!(
                parent_id = %parent,
                folder_id = %child,
                "Parent folder has no closure rows, folder stays a root"
            );
        }
        rows.into_iter()
            .filter(|r| !self.has_closure(r.ancestor, r.descendant))
            .collect()
    }
}

fn next(seq: &mut i64) -> i64 {
    *seq += 1;
    *seq
}

/// Process-local store with PostgreSQL-equivalent semantics.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of closure rows, across all collections.
    pub async fn closure_count(&self) -> usize {
        self.tables.read().await.closures.len()
    }
}

#[async_trait]
impl CollectionStore for MemoryStore {
    async fn find_by_collection_id(&self, id: CollectionId) -> AppResult<Option<Collection>> {
        let t = self.tables.read().await;
        Ok(t.collections.iter().find(|c| c.collection_id == id).cloned())
    }

    async fn find_by_workspace(&self, workspace_id: i64) -> AppResult<Vec<Collection>> {
        let t = self.tables.read().await;
        Ok(t.collections
            .iter()
            .filter(|c| c.workspace_id == workspace_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Collection>> {
        let t = self.tables.read().await;
        Ok(t.collections.iter().find(|c| c.id == id).cloned())
    }

    async fn create(&self, data: &CreateCollection) -> AppResult<Collection> {
        let mut t = self.tables.write().await;
        if t.collections
            .iter()
            .any(|c| c.collection_id == data.collection_id)
        {
            return Err(AppError::conflict(format!(
                "Collection {} already exists",
                data.collection_id
            )));
        }

        let now = Utc::now();
        let collection = Collection {
            id: next(&mut t.collection_seq),
            collection_id: data.collection_id,
            workspace_id: data.workspace_id,
            name: data.name.clone(),
            owner_id: data.owner_id,
            protocol: data.protocol,
            description: data.description.clone(),
            members_count: 0,
            created_at: now,
            updated_at: now,
        };
        t.collections.push(collection.clone());
        Ok(collection)
    }

    async fn rename(&self, id: i64, name: &str) -> AppResult<Collection> {
        let mut t = self.tables.write().await;
        let collection = t
            .collections
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::not_found(format!("Collection {id} not found")))?;
        collection.name = name.to_string();
        collection.updated_at = Utc::now();
        Ok(collection.clone())
    }

    async fn delete_with_contents(&self, id: i64) -> AppResult<CollectionRemoval> {
        let mut t = self.tables.write().await;
        let collection_id = t
            .collections
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.collection_id)
            .ok_or_else(|| AppError::not_found(format!("Collection {id} not found")))?;

        let owned: Vec<FolderId> = t
            .folders
            .iter()
            .filter(|f| f.collection_id == collection_id)
            .map(|f| f.folder_id)
            .collect();

        let before = t.requests.len();
        t.requests.retain(|r| r.collection_id != collection_id);
        let requests = (before - t.requests.len()) as u64;

        let before = t.closures.len();
        t.closures
            .retain(|c| !owned.contains(&c.ancestor) && !owned.contains(&c.descendant));
        let closures = (before - t.closures.len()) as u64;

        let before = t.folders.len();
        t.folders.retain(|f| f.collection_id != collection_id);
        let folders = (before - t.folders.len()) as u64;

        t.collections.retain(|c| c.id != id);

        info!(collection_id = %collection_id, folders, closures, requests, "Collection deleted");

        Ok(CollectionRemoval {
            folders,
            closures,
            requests,
        })
    }
}

#[async_trait]
impl ClosureStore for MemoryStore {
    async fn record_self(&self, folder_id: FolderId) -> AppResult<()> {
        let mut t = self.tables.write().await;
        if t.has_closure(folder_id, folder_id) {
            return Err(AppError::conflict(format!(
                "Closure row for folder {folder_id} already exists"
            )));
        }
        t.closures.push(FolderClosure::reflexive(folder_id));
        Ok(())
    }

    async fn record_under_parent(&self, parent: FolderId, child: FolderId) -> AppResult<u64> {
        let mut t = self.tables.write().await;
        let rows = t.propagation_rows(parent, child);
        let inserted = rows.len() as u64;
        t.closures.extend(rows);
        Ok(inserted)
    }

    async fn ancestors_of(&self, folder_id: FolderId) -> AppResult<Vec<FolderClosure>> {
        let t = self.tables.read().await;
        let mut rows = t.rows_with_descendant(folder_id);
        rows.sort_by(|a, b| b.depth.cmp(&a.depth));
        Ok(rows)
    }

    async fn descendants_of(&self, folder_id: FolderId) -> AppResult<Vec<FolderClosure>> {
        let t = self.tables.read().await;
        let mut rows: Vec<FolderClosure> = t
            .closures
            .iter()
            .filter(|c| c.ancestor == folder_id)
            .copied()
            .collect();
        rows.sort_by_key(|c| c.depth);
        Ok(rows)
    }

    async fn find_by_collection(
        &self,
        collection_id: CollectionId,
    ) -> AppResult<Vec<FolderClosure>> {
        let t = self.tables.read().await;
        let mut rows: Vec<(i32, i64, FolderClosure)> = t
            .closures
            .iter()
            .filter_map(|c| {
                t.folders
                    .iter()
                    .find(|f| f.folder_id == c.ancestor && f.collection_id == collection_id)
                    .map(|f| (c.depth, f.id, *c))
            })
            .collect();
        rows.sort_by_key(|(depth, id, _)| (*depth, *id));
        Ok(rows.into_iter().map(|(_, _, c)| c).collect())
    }
}

#[async_trait]
impl FolderStore for MemoryStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Folder>> {
        let t = self.tables.read().await;
        Ok(t.folders.iter().find(|f| f.id == id).cloned())
    }

    async fn find_by_folder_id(&self, folder_id: FolderId) -> AppResult<Option<Folder>> {
        let t = self.tables.read().await;
        Ok(t.folders.iter().find(|f| f.folder_id == folder_id).cloned())
    }

    async fn find_by_collection(&self, collection_id: CollectionId) -> AppResult<Vec<Folder>> {
        let t = self.tables.read().await;
        Ok(t.folders
            .iter()
            .filter(|f| f.collection_id == collection_id)
            .cloned()
            .collect())
    }

    async fn create(&self, data: &NewFolder, parent: Option<FolderId>) -> AppResult<Folder> {
        let mut t = self.tables.write().await;

        if !t
            .collections
            .iter()
            .any(|c| c.collection_id == data.collection_id)
        {
            return Err(AppError::not_found(format!(
                "Collection {} not found",
                data.collection_id
            )));
        }

        if t.folders.iter().any(|f| f.folder_id == data.folder_id) {
            return Err(AppError::conflict(format!(
                "Folder {} already exists",
                data.folder_id
            )));
        }
        if t.has_closure(data.folder_id, data.folder_id) {
            return Err(AppError::conflict(format!(
                "Closure row for folder {} already exists",
                data.folder_id
            )));
        }

        let mut staged = vec![FolderClosure::reflexive(data.folder_id)];
        if let Some(parent) = parent {
            staged.extend(t.propagation_rows(parent, data.folder_id));
        }

        let now = Utc::now();
        let folder = Folder {
            id: next(&mut t.folder_seq),
            folder_id: data.folder_id,
            collection_id: data.collection_id,
            name: data.name.clone(),
            created_at: now,
            updated_at: now,
        };
        t.folders.push(folder.clone());
        t.closures.extend(staged);
        Ok(folder)
    }

    async fn rename(&self, id: i64, name: &str) -> AppResult<Folder> {
        let mut t = self.tables.write().await;
        let folder = t
            .folders
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?;
        folder.name = name.to_string();
        folder.updated_at = Utc::now();
        Ok(folder.clone())
    }

    async fn delete_subtree(&self, id: i64) -> AppResult<SubtreeRemoval> {
        let mut t = self.tables.write().await;
        let folder_id = t
            .folders
            .iter()
            .find(|f| f.id == id)
            .map(|f| f.folder_id)
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?;

        let mut subtree: Vec<FolderId> = t
            .closures
            .iter()
            .filter(|c| c.ancestor == folder_id)
            .map(|c| c.descendant)
            .collect();
        if !subtree.contains(&folder_id) {
            subtree.push(folder_id);
        }

        let in_subtree = |id: &FolderId| subtree.contains(id);

        let before = t.requests.len();
        t.requests
            .retain(|r| !r.folder_id.as_ref().is_some_and(in_subtree));
        let requests = (before - t.requests.len()) as u64;

        let before = t.closures.len();
        t.closures
            .retain(|c| !in_subtree(&c.ancestor) && !in_subtree(&c.descendant));
        let closures = (before - t.closures.len()) as u64;

        let before = t.folders.len();
        t.folders.retain(|f| !in_subtree(&f.folder_id));
        let folders = (before - t.folders.len()) as u64;

        info!(folder_id = %folder_id, folders, closures, requests, "Folder subtree deleted");

        Ok(SubtreeRemoval {
            folders,
            closures,
            requests,
        })
    }
}

#[async_trait]
impl RequestStore for MemoryStore {
    async fn find_by_collection(&self, collection_id: CollectionId) -> AppResult<Vec<Request>> {
        let t = self.tables.read().await;
        Ok(t.requests
            .iter()
            .filter(|r| r.collection_id == collection_id)
            .cloned()
            .collect())
    }

    async fn create(&self, data: &CreateRequest) -> AppResult<Request> {
        let mut t = self.tables.write().await;
        if t.requests.iter().any(|r| r.request_id == data.request_id) {
            return Err(AppError::conflict(format!(
                "Request {} already exists",
                data.request_id
            )));
        }

        let now = Utc::now();
        let request = Request {
            id: next(&mut t.request_seq),
            request_id: data.request_id,
            collection_id: data.collection_id,
            folder_id: data.folder_id,
            name: data.name.clone(),
            protocol: data.protocol,
            method: data.method,
            path: data.path.clone(),
            description: String::new(),
            created_at: now,
            updated_at: now,
        };
        t.requests.push(request.clone());
        Ok(request)
    }
}
