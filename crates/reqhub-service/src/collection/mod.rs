//! Collection creation and the per-workspace tree listing.

pub mod service;

pub use service::{CollectionService, CreateCollectionParams};
