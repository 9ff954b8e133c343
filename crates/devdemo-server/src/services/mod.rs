//! Application routes wrapped by the timing middleware.

pub mod echo;
