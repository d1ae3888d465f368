//! # reqhub-api
//!
//! HTTP API layer for ReqHub built on Axum.
//!
//! Provides the folder, collection and request endpoints, the logging and
//! CORS middleware, body/query extractors that report rejections through
//! the response envelope, DTOs and the error-to-envelope mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
