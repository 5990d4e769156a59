//! # fieldcheck-ports
//!
//! Port traits for the fieldcheck hexagonal architecture.
//!
//! This crate defines the interfaces between the validation use cases and
//! infrastructure. It depends only on `domain`.

/// Returns the ports crate version.
#[must_use]
pub const fn ports_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub mod logger;

pub use logger::*;

// Re-export the domain types used in port signatures, so adapter crates can
// implement ports without directly depending on `fieldcheck-domain`.
pub use fieldcheck_domain::{DataRecord, ErrorReport, Validator};
