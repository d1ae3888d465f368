//! # reqhub-service
//!
//! Business logic service layer for ReqHub. Each service orchestrates the
//! table stores of a [`reqhub_database::Store`] to implement one group of
//! use cases: folder maintenance, folder tree reads, the per-workspace
//! collection listing and request creation.
//!
//! Services follow constructor injection: the store handle and the tree
//! settings are provided at construction time.

pub mod collection;
pub mod folder;
pub mod request;
pub mod validation;

pub use collection::CollectionService;
pub use folder::{FolderService, TreeAssembler, TreeService};
pub use request::RequestService;
