//! Shared application state for the devdemo server.
//!
//! Owns the metrics registry for the life of the process. The registry is
//! created here, once, and handed to both the timing middleware and the
//! `/metrics` handler through this state.

use std::sync::Arc;

use devdemo_core::metrics::MetricsRegistry;

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    metrics: Arc<MetricsRegistry>,
}

struct AppStateInner {
    cfg: ServerConfig,
}

impl AppState {
    pub fn new(cfg: ServerConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner { cfg }),
            metrics: Arc::new(MetricsRegistry::new()),
        }
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.inner.cfg
    }

    pub fn metrics(&self) -> Arc<MetricsRegistry> {
        Arc::clone(&self.metrics)
    }
}
