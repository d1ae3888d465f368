//! Folder domain entities: rows, closure relation and tree nodes.

pub mod closure;
pub mod model;
pub mod tree;

pub use closure::FolderClosure;
pub use model::{DEFAULT_FOLDER_NAME, FOLDER_NAME_MAX_CHARS, Folder, NewFolder};
pub use tree::{CollectionNode, FolderNode, RequestNode, TreeNode};
