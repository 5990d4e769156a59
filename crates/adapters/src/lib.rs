//! # fieldcheck-adapters
//!
//! Adapter implementations for ports (structured logging).
//! This crate depends on `ports` only.

pub mod log_sink;
pub mod logger;

pub use log_sink::{LogSink, MemoryLogSink, StderrLogSink};
pub use logger::{JsonLogger, TracingLogger};

/// Returns the adapters crate version.
#[must_use]
pub const fn adapters_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
