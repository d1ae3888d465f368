//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use reqhub_core::config::AppConfig;
use reqhub_database::Store;
use reqhub_service::folder::TreeAssembler;
use reqhub_service::{CollectionService, FolderService, RequestService, TreeService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Table stores (PostgreSQL or in-memory)
    pub store: Store,

    // ── Services ─────────────────────────────────────────────
    /// Folder create/rename/delete/list
    pub folder_service: Arc<FolderService>,
    /// Folder subtree and breadcrumbs
    pub tree_service: Arc<TreeService>,
    /// Collection create and tree listing
    pub collection_service: Arc<CollectionService>,
    /// Request definition create
    pub request_service: Arc<RequestService>,
}

impl AppState {
    /// Wires every service over one store.
    pub fn new(config: AppConfig, store: Store) -> Self {
        let assembler = TreeAssembler::new(config.tree.edge_policy);

        Self {
            folder_service: Arc::new(FolderService::new(store.clone())),
            tree_service: Arc::new(TreeService::new(store.clone(), assembler)),
            collection_service: Arc::new(CollectionService::new(store.clone(), assembler)),
            request_service: Arc::new(RequestService::new(store.clone())),
            config: Arc::new(config),
            store,
        }
    }
}
