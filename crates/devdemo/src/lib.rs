//! Top-level facade crate for devdemo.
//!
//! Re-exports the metrics core and the HTTP server library so users can depend on a single crate.

pub mod core {
    pub use devdemo_core::*;
}

pub mod server {
    pub use devdemo_server::*;
}
