//! Folder tree reads: a single folder's subtree and its breadcrumb trail.

use std::collections::{HashMap, HashSet};

use reqhub_core::error::AppError;
use reqhub_core::result::AppResult;
use reqhub_core::types::FolderId;
use reqhub_database::Store;
use reqhub_entity::folder::{Folder, FolderNode};

use super::assembler::TreeAssembler;

/// Builds folder trees and breadcrumb trails.
#[derive(Debug, Clone)]
pub struct TreeService {
    /// Store handle.
    store: Store,
    /// Tree assembler.
    assembler: TreeAssembler,
}

impl TreeService {
    /// Creates a new tree service.
    pub fn new(store: Store, assembler: TreeAssembler) -> Self {
        Self { store, assembler }
    }

    async fn find_folder(&self, folder_id: FolderId) -> AppResult<Folder> {
        self.store
            .folders
            .find_by_folder_id(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))
    }

    /// Builds the tree below a folder, the folder itself at the top.
    pub async fn get_tree(&self, folder_id: FolderId) -> AppResult<FolderNode> {
        let root = self.find_folder(folder_id).await?;

        let subtree: HashSet<FolderId> = self
            .store
            .closures
            .descendants_of(folder_id)
            .await?
            .into_iter()
            .map(|c| c.descendant)
            .chain(std::iter::once(folder_id))
            .collect();

        let cid = root.collection_id;
        let mut folders = self.store.folders.find_by_collection(cid).await?;
        folders.retain(|f| subtree.contains(&f.folder_id));

        let mut closures = self.store.closures.find_by_collection(cid).await?;
        closures.retain(|c| subtree.contains(&c.ancestor) && subtree.contains(&c.descendant));

        let mut requests = self.store.requests.find_by_collection(cid).await?;
        requests.retain(|r| r.folder_id.is_some_and(|id| subtree.contains(&id)));

        self.assembler
            .assemble_subtree(folder_id, &folders, &closures, &requests)
            .ok_or_else(|| AppError::internal("Folder vanished while building its tree"))
    }

    /// Returns the folders from the root down to `folder_id`, inclusive.
    pub async fn get_breadcrumbs(&self, folder_id: FolderId) -> AppResult<Vec<Folder>> {
        let folder = self.find_folder(folder_id).await?;
        let rows = self.store.closures.ancestors_of(folder_id).await?;

        let by_id: HashMap<FolderId, Folder> = self
            .store
            .folders
            .find_by_collection(folder.collection_id)
            .await?
            .into_iter()
            .map(|f| (f.folder_id, f))
            .collect();

        let mut breadcrumbs: Vec<Folder> = rows
            .iter()
            .filter_map(|row| by_id.get(&row.ancestor).cloned())
            .collect();
        if breadcrumbs.last().map(|f| f.folder_id) != Some(folder_id) {
            breadcrumbs.push(folder);
        }
        Ok(breadcrumbs)
    }
}
