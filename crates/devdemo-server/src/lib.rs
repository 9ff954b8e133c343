//! devdemo HTTP server library entry.
//!
//! Wires the health, echo, and metrics routes behind the request timing
//! middleware. Consumed by the binary (`main.rs`) and by integration tests,
//! which drive the router in-process.

pub mod app_state;
pub mod config;
pub mod error;
pub mod obs;
pub mod ops;
pub mod router;
pub mod services;
