use std::sync::Arc;

use reservas_core::storage::ObjectStore;
use sqlx::PgPool;

use crate::config::AppConfig;

/// Shared application state, passed to all handlers via Axum's `State` extractor.
/// Wrapped in `Arc` so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    pool: PgPool,
    config: AppConfig,
    store: ObjectStore,
}

impl AppState {
    pub fn new(pool: PgPool, config: AppConfig) -> Self {
        let store = ObjectStore::new(&config.storage_dir, &config.public_base_url);
        Self {
            inner: Arc::new(InnerState {
                pool,
                config,
                store,
            }),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &ObjectStore {
        &self.inner.store
    }
}
