//! Folder maintenance, tree assembly and tree reads.

pub mod assembler;
pub mod service;
pub mod tree;

pub use assembler::TreeAssembler;
pub use service::{CreateFolderParams, FolderService};
pub use tree::TreeService;
