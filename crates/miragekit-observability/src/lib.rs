//! # miragekit-observability
//!
//! Tracing subscriber setup, span macros for the load/evaluate/audit/integrity
//! phases, and structured log events.

pub mod tracing_setup;

pub use tracing_setup::{init_tracing, init_tracing_with_config, init_tracing_with_filter};
