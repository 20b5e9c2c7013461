//! Application state shared across handlers

use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::store::TodoStore;
use crate::services::CategoryService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    store: Arc<dyn TodoStore>,
    categories: CategoryService,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn TodoStore>) -> Self {
        let categories = CategoryService::new(store.clone());
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                categories,
            }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &Arc<dyn TodoStore> {
        &self.inner.store
    }

    pub fn categories(&self) -> &CategoryService {
        &self.inner.categories
    }
}
