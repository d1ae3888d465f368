//! # reqhub-core
//!
//! Core crate for ReqHub. Contains the unified error system, configuration
//! schemas, typed identifiers and the business response codes shared by
//! the store, service and HTTP layers.
//!
//! This crate has **no** internal dependencies on other ReqHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
