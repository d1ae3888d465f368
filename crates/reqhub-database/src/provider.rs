//! Store handle that dispatches to the configured backend.

use std::sync::Arc;

use tracing::info;

use reqhub_core::config::{DatabaseConfig, StoreProvider};
use reqhub_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::MemoryStore;
use crate::migration::{run_migrations, verify_schema};
use crate::repositories::{
    ClosureRepository, CollectionRepository, FolderRepository, RequestRepository,
};
use crate::store::{ClosureStore, CollectionStore, FolderStore, RequestStore};

#[derive(Debug, Clone)]
enum Backend {
    Postgres(DatabasePool),
    Memory,
}

/// Bundle of the four table stores backed by one provider.
///
/// The provider is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct Store {
    /// Collection rows.
    pub collections: Arc<dyn CollectionStore>,
    /// Folder rows.
    pub folders: Arc<dyn FolderStore>,
    /// Folder closure rows.
    pub closures: Arc<dyn ClosureStore>,
    /// Request rows.
    pub requests: Arc<dyn RequestStore>,
    backend: Backend,
}

impl Store {
    /// Build the store selected by `database.provider`.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider {
            StoreProvider::Postgres => {
                info!("Initializing PostgreSQL store");
                let pool = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    run_migrations(pool.pool()).await?;
                } else {
                    verify_schema(pool.pool()).await?;
                }
                Ok(Self::postgres(pool))
            }
            StoreProvider::Memory => {
                info!("Initializing in-memory store");
                Ok(Self::memory())
            }
        }
    }

    /// Store over a fresh [`MemoryStore`].
    pub fn memory() -> Self {
        Self::from_memory(MemoryStore::new())
    }

    /// Store over an existing [`MemoryStore`] (for testing).
    pub fn from_memory(store: MemoryStore) -> Self {
        let shared = Arc::new(store);
        Self {
            collections: shared.clone(),
            folders: shared.clone(),
            closures: shared.clone(),
            requests: shared,
            backend: Backend::Memory,
        }
    }

    /// Store over PostgreSQL repositories sharing one pool.
    pub fn postgres(pool: DatabasePool) -> Self {
        let pg = pool.pool().clone();
        Self {
            collections: Arc::new(CollectionRepository::new(pg.clone())),
            folders: Arc::new(FolderRepository::new(pg.clone())),
            closures: Arc::new(ClosureRepository::new(pg.clone())),
            requests: Arc::new(RequestRepository::new(pg)),
            backend: Backend::Postgres(pool),
        }
    }

    /// Name of the active backend, for logs and the health endpoint.
    pub fn backend_name(&self) -> &'static str {
        match self.backend {
            Backend::Postgres(_) => "postgres",
            Backend::Memory => "memory",
        }
    }

    /// Check backend connectivity. Always healthy for the memory backend.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.backend {
            Backend::Postgres(pool) => pool.health_check().await,
            Backend::Memory => Ok(true),
        }
    }

    /// Release backend resources.
    pub async fn close(&self) {
        if let Backend::Postgres(pool) = &self.backend {
            pool.close().await;
        }
    }
}
