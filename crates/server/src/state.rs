use std::sync::Arc;

use pricescout_core::{Config, DiscoveryEngine, OfferStore, SanitizedConfig};

/// Shared application state
pub struct AppState {
    config: Config,
    /// Absent when no candidate source is configured; search requests
    /// answer 503 in that case.
    engine: Option<DiscoveryEngine>,
    store: Arc<dyn OfferStore>,
}

impl AppState {
    pub fn new(config: Config, engine: Option<DiscoveryEngine>, store: Arc<dyn OfferStore>) -> Self {
        Self {
            config,
            engine,
            store,
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn engine(&self) -> Option<&DiscoveryEngine> {
        self.engine.as_ref()
    }

    pub fn store(&self) -> &dyn OfferStore {
        self.store.as_ref()
    }
}
