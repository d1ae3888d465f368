//! Nested tree shapes returned by the collection listing.

use serde::{Deserialize, Serialize};

use reqhub_core::types::{CollectionId, FolderId, RequestId};

use crate::collection::Collection;
use crate::folder::Folder;
use crate::protocol::{Method, Protocol};
use crate::request::Request;

/// A child of a collection or folder node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TreeNode {
    /// A folder with its own children.
    Folder(FolderNode),
    /// A leaf request definition.
    Request(RequestNode),
}

impl TreeNode {
    /// Display name of the node.
    pub fn name(&self) -> &str {
        match self {
            Self::Folder(f) => &f.name,
            Self::Request(r) => &r.name,
        }
    }

    /// Borrow as a folder node.
    pub fn as_folder(&self) -> Option<&FolderNode> {
        match self {
            Self::Folder(f) => Some(f),
            Self::Request(_) => None,
        }
    }

    /// Borrow as a request node.
    pub fn as_request(&self) -> Option<&RequestNode> {
        match self {
            Self::Request(r) => Some(r),
            Self::Folder(_) => None,
        }
    }
}

/// Folder node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderNode {
    /// Database id.
    pub id: i64,
    /// Folder name.
    pub name: String,
    /// Containing collection.
    pub collection_id: CollectionId,
    /// Public folder identity.
    pub folder_id: FolderId,
    /// Sub-folders followed by requests.
    pub children: Vec<TreeNode>,
}

impl FolderNode {
    /// Childless node for a folder row.
    pub fn from_folder(folder: &Folder) -> Self {
        Self {
            id: folder.id,
            name: folder.name.clone(),
            collection_id: folder.collection_id,
            folder_id: folder.folder_id,
            children: Vec::new(),
        }
    }

    /// Find a direct child by name.
    pub fn child(&self, name: &str) -> Option<&TreeNode> {
        self.children.iter().find(|c| c.name() == name)
    }
}

/// Request leaf node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestNode {
    /// Database id.
    pub id: i64,
    /// Request name.
    pub name: String,
    /// Protocol.
    #[serde(rename = "type")]
    pub protocol: Protocol,
    /// Method.
    pub method: Method,
    /// Containing collection.
    pub collection_id: CollectionId,
    /// Public request identity.
    pub request_id: RequestId,
    /// Containing folder; `None` at the collection root.
    pub folder_id: Option<FolderId>,
}

impl From<&Request> for RequestNode {
    fn from(request: &Request) -> Self {
        Self {
            id: request.id,
            name: request.name.clone(),
            protocol: request.protocol,
            method: request.method,
            collection_id: request.collection_id,
            request_id: request.request_id,
            folder_id: request.folder_id,
        }
    }
}

/// A collection with its reassembled hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename = "collection")]
pub struct CollectionNode {
    /// Database id.
    pub id: i64,
    /// Collection name.
    pub name: String,
    /// Owning workspace.
    pub workspace_id: i64,
    /// Public collection identity.
    pub collection_id: CollectionId,
    /// Root folders followed by root-level requests.
    pub children: Vec<TreeNode>,
}

impl CollectionNode {
    /// Wrap assembled children under a collection row.
    pub fn new(collection: &Collection, children: Vec<TreeNode>) -> Self {
        Self {
            id: collection.id,
            name: collection.name.clone(),
            workspace_id: collection.workspace_id,
            collection_id: collection.collection_id,
            children,
        }
    }

    /// Find a root child by name.
    pub fn child(&self, name: &str) -> Option<&TreeNode> {
        self.children.iter().find(|c| c.name() == name)
    }
}
