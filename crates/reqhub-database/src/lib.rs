//! # reqhub-database
//!
//! The relational data-access interface for ReqHub: store traits, their
//! PostgreSQL implementations (one repository per table, sqlx), an
//! in-memory implementation with the same semantics, and the [`Store`]
//! handle that picks one of them from configuration.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod provider;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use provider::Store;
pub use store::{
    ClosureStore, CollectionRemoval, CollectionStore, FolderStore, RequestStore, SubtreeRemoval,
};
