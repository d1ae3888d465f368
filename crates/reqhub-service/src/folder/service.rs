//! Folder maintenance: create, rename, delete and list.

use tracing::{info, warn};

use reqhub_core::error::AppError;
use reqhub_core::result::AppResult;
use reqhub_core::types::{CollectionId, FolderId};
use reqhub_database::{Store, SubtreeRemoval};
use reqhub_entity::folder::{DEFAULT_FOLDER_NAME, FOLDER_NAME_MAX_CHARS, Folder, NewFolder};

use crate::validation::{name_or_default, required_name};

/// Manages folder rows and their closure index.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Store handle.
    store: Store,
}

/// Request to create a new folder.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateFolderParams {
    /// Owning collection.
    pub collection_id: CollectionId,
    /// Folder name; blank means [`DEFAULT_FOLDER_NAME`].
    pub name: Option<String>,
    /// Parent folder (None for root-level).
    pub parent_id: Option<FolderId>,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Creates a folder, its self closure row and, under a parent, the rows
    /// linking it to every ancestor of that parent. The store performs the
    /// three writes atomically.
    pub async fn create_folder(&self, params: CreateFolderParams) -> AppResult<Folder> {
        self.store
            .collections
            .find_by_collection_id(params.collection_id)
            .await?
            .ok_or_else(|| AppError::not_found("Collection not found"))?;

        let name = name_or_default(
            "Folder",
            params.name.as_deref(),
            DEFAULT_FOLDER_NAME,
            FOLDER_NAME_MAX_CHARS,
        )?;

        if let Some(parent_id) = params.parent_id {
            match self.store.folders.find_by_folder_id(parent_id).await? {
                Some(parent) if parent.collection_id != params.collection_id => {
                    return Err(AppError::validation(
                        "Parent folder belongs to a different collection",
                    ));
                }
                Some(_) => {}
                None => {
                    warn!(
                        parent_id = %parent_id,
                        collection_id = %params.collection_id,
                        "Parent folder does not exist, creating a root folder"
                    );
                }
            }
        }

        let data = NewFolder {
            folder_id: FolderId::new(),
            collection_id: params.collection_id,
            name,
        };
        let folder = self.store.folders.create(&data, params.parent_id).await?;

        info!(
            folder_id = %folder.folder_id,
            collection_id = %folder.collection_id,
            parent_id = ?params.parent_id,
            name = %folder.name,
            "Folder created"
        );

        Ok(folder)
    }

    /// Renames a folder in place.
    pub async fn rename_folder(&self, id: i64, name: &str) -> AppResult<Folder> {
        let name = required_name("Folder", name, FOLDER_NAME_MAX_CHARS)?;
        let folder = self.store.folders.rename(id, &name).await?;
        info!(id, folder_id = %folder.folder_id, name = %folder.name, "Folder renamed");
        Ok(folder)
    }

    /// Deletes a folder together with its whole subtree.
    pub async fn delete_folder(&self, id: i64) -> AppResult<SubtreeRemoval> {
        let removed = self.store.folders.delete_subtree(id).await?;
        info!(
            id,
            folders = removed.folders,
            closures = removed.closures,
            requests = removed.requests,
            "Folder deleted"
        );
        Ok(removed)
    }

    /// Lists every folder of a collection in creation order.
    pub async fn list_by_collection(&self, collection_id: CollectionId) -> AppResult<Vec<Folder>> {
        self.store.folders.find_by_collection(collection_id).await
    }
}
