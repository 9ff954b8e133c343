//! Request timing guard.
//!
//! A [`RequestTimer`] is started when a request enters the service and reports
//! exactly one sample to the [`MetricsRegistry`]: the status passed to
//! [`RequestTimer::finish`], or [`ERROR_STATUS`] if the guard is dropped first.
//! Dropping without finishing happens when the wrapped handler panics or the
//! request future is cancelled, so those requests still show up in the metrics.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::metrics::MetricsRegistry;

/// Status label used when no response was produced.
pub const ERROR_STATUS: &str = "error";

pub struct RequestTimer {
    registry: Arc<MetricsRegistry>,
    method: String,
    endpoint: String,
    started: Instant,
    recorded: bool,
}

impl RequestTimer {
    /// Capture the start instant for one request.
    pub fn start(
        registry: Arc<MetricsRegistry>,
        method: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            method: method.into(),
            endpoint: endpoint.into(),
            started: Instant::now(),
            recorded: false,
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Time since start; zero if the clock went backwards.
    pub fn elapsed(&self) -> Duration {
        Instant::now().saturating_duration_since(self.started)
    }

    /// Record the request with its response status and return the measured duration.
    pub fn finish(mut self, status: u16) -> Duration {
        self.record(&status.to_string())
    }

    fn record(&mut self, status: &str) -> Duration {
        self.recorded = true;
        let elapsed = self.elapsed();
        self.registry.increment_counter(&self.method, &self.endpoint, status);
        self.registry.observe_histogram(&self.endpoint, elapsed.as_secs_f64());
        elapsed
    }
}

impl Drop for RequestTimer {
    fn drop(&mut self) {
        if self.recorded {
            return;
        }
        let elapsed = self.record(ERROR_STATUS);
        tracing::warn!(
            method = %self.method,
            endpoint = %self.endpoint,
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            "request ended without a response"
        );
    }
}
