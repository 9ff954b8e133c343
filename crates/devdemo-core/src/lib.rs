//! devdemo core: the in-process metrics registry, the request timer, and the
//! error surface shared with the HTTP server.
//!
//! Nothing here depends on an HTTP framework or an async runtime. The server
//! crate drives these types from its middleware; tests drive them directly.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Recording a sample must never take the process down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod metrics;
pub mod timing;

/// Shared result type.
pub use error::{DemoError, Result};
pub use metrics::{HistogramSnapshot, MetricsRegistry};
pub use timing::RequestTimer;
