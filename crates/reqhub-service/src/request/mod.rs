//! Request definition creation.

pub mod service;

pub use service::{CreateRequestParams, RequestService};
