//! Custom Axum extractors.
//!
//! Axum's own `Json` and `Query` reject bad input with a plain-text 4xx.
//! These wrappers report the rejection, and any `validator` failure, as an
//! `InvalidParams` envelope instead.

pub mod json;
pub mod query;

pub use json::ValidJson;
pub use query::ValidQuery;
