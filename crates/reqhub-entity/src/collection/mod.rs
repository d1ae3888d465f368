//! Collection domain entities.

pub mod model;

pub use model::{COLLECTION_NAME_MAX_CHARS, Collection, CreateCollection};
