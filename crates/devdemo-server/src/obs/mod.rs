//! Request observability.
//!
//! `track_http` is the timing middleware. It wraps every route, including the
//! ops endpoints, and feeds the registry held in [`crate::app_state::AppState`].

pub mod middleware;

pub use middleware::track_http;
