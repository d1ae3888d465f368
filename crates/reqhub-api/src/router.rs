//! Route definitions for the ReqHub HTTP API.
//!
//! Routes are grouped by resource. Every handler answers with HTTP 200 and
//! an envelope; unknown paths get a `NotFound` envelope from the fallback.

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes and the logging middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(folder_routes())
        .merge(collection_routes())
        .merge(request_routes())
        .merge(health_routes())
        .fallback(handlers::not_found)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Folder maintenance and tree reads
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route("/folder/create", post(handlers::folder::create_folder))
        .route("/folder/delete", post(handlers::folder::delete_folder))
        .route("/folder/rename", post(handlers::folder::rename_folder))
        .route("/folder/list", get(handlers::folder::list_folders))
        .route("/folder/tree", get(handlers::folder::get_tree))
        .route("/folder/ancestors", get(handlers::folder::get_ancestors))
}

/// Collection maintenance and per-workspace tree listing
fn collection_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/collections/create",
            post(handlers::collection::create_collection),
        )
        .route(
            "/collections/edit",
            post(handlers::collection::edit_collection),
        )
        .route(
            "/collections/delete",
            delete(handlers::collection::delete_collection),
        )
        .route(
            "/collections/list",
            get(handlers::collection::list_collections),
        )
}

/// Request definitions
fn request_routes() -> Router<AppState> {
    Router::new().route("/request/create", post(handlers::request::create_request))
}

/// Liveness
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
