//! Collection gateway: one assembled tree per collection of a workspace,
//! plus collection create, rename and delete.

use futures::future::try_join_all;
use tracing::{debug, info};

use reqhub_core::result::AppResult;
use reqhub_core::types::CollectionId;
use reqhub_database::{CollectionRemoval, Store};
use reqhub_entity::collection::{COLLECTION_NAME_MAX_CHARS, Collection, CreateCollection};
use reqhub_entity::folder::CollectionNode;
use reqhub_entity::protocol::Protocol;

use crate::folder::TreeAssembler;
use crate::validation::required_name;

/// Maintains collections and lists them as nested trees.
#[derive(Debug, Clone)]
pub struct CollectionService {
    /// Store handle.
    store: Store,
    /// Tree assembler.
    assembler: TreeAssembler,
}

/// Request to create a collection.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateCollectionParams {
    /// Owning workspace.
    pub workspace_id: i64,
    /// Collection name.
    pub name: String,
    /// Default protocol.
    pub protocol: Protocol,
    /// Free-form description.
    pub description: String,
}

impl CollectionService {
    /// Creates a new collection service.
    pub fn new(store: Store, assembler: TreeAssembler) -> Self {
        Self { store, assembler }
    }

    /// Creates a collection.
    pub async fn create_collection(&self, params: CreateCollectionParams) -> AppResult<Collection> {
        let name = required_name("Collection", &params.name, COLLECTION_NAME_MAX_CHARS)?;

        let collection = self
            .store
            .collections
            .create(&CreateCollection {
                collection_id: CollectionId::new(),
                workspace_id: params.workspace_id,
                name,
                owner_id: None,
                protocol: params.protocol,
                description: params.description,
            })
            .await?;

        info!(
            collection_id = %collection.collection_id,
            workspace_id = collection.workspace_id,
            "Collection created"
        );
        Ok(collection)
    }

    /// Renames a collection in place.
    pub async fn rename_collection(&self, id: i64, name: &str) -> AppResult<Collection> {
        let name = required_name("Collection", name, COLLECTION_NAME_MAX_CHARS)?;
        let collection = self.store.collections.rename(id, &name).await?;
        info!(
            id,
            collection_id = %collection.collection_id,
            name = %collection.name,
            "Collection renamed"
        );
        Ok(collection)
    }

    /// Deletes a collection with every folder, closure row and request it
    /// owns.
    pub async fn delete_collection(&self, id: i64) -> AppResult<CollectionRemoval> {
        let removed = self.store.collections.delete_with_contents(id).await?;
        info!(
            id,
            folders = removed.folders,
            closures = removed.closures,
            requests = removed.requests,
            "Collection deleted"
        );
        Ok(removed)
    }

    /// Lists every collection of a workspace with its folder/request tree.
    /// Any failed fetch aborts the whole listing.
    pub async fn list_trees(&self, workspace_id: i64) -> AppResult<Vec<CollectionNode>> {
        let collections = self.store.collections.find_by_workspace(workspace_id).await?;
        debug!(workspace_id, count = collections.len(), "Assembling collection trees");

        try_join_all(collections.iter().map(|c| self.collection_tree(c))).await
    }

    async fn collection_tree(&self, collection: &Collection) -> AppResult<CollectionNode> {
        let cid = collection.collection_id;
        let (folders, closures, requests) = tokio::try_join!(
            self.store.folders.find_by_collection(cid),
            self.store.closures.find_by_collection(cid),
            self.store.requests.find_by_collection(cid),
        )?;

        let children = self.assembler.assemble(&folders, &closures, &requests);
        Ok(CollectionNode::new(collection, children))
    }
}
