//! PostgreSQL repository implementations, one per table.

pub mod closure;
pub mod collection;
pub mod folder;
pub mod request;

pub use closure::ClosureRepository;
pub use collection::CollectionRepository;
pub use folder::FolderRepository;
pub use request::RequestRepository;
