//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::data::{Latency, MockBackend};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and gives handlers the
/// configuration and the mock data layer.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    backend: MockBackend,
}

impl AppState {
    /// Create application state with a freshly seeded mock backend whose
    /// delays follow `config.mock_latency_percent`.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let backend = MockBackend::new(Latency::percent(config.mock_latency_percent));
        Self::with_backend(config, backend)
    }

    /// Create application state around an existing backend.
    #[must_use]
    pub fn with_backend(config: StorefrontConfig, backend: MockBackend) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, backend }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the mock data layer.
    #[must_use]
    pub fn backend(&self) -> &MockBackend {
        &self.inner.backend
    }
}
