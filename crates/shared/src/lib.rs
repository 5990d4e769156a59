//! # fieldcheck-shared
//!
//! Shared result types and error handling for the fieldcheck workspace.
//!
//! Every typed error raised by the other crates (rule construction, record
//! validation, configuration parsing) converts into [`ErrorEnvelope`] so that
//! callers get one stable shape at the boundary.
//!
//! ## Design Principles
//!
//! 1. **No workspace dependencies** - This crate only depends on external crates
//! 2. **Serde-compatible** - All public types support serialization

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod errors;
pub mod result;

pub use errors::{ErrorClass, ErrorCode, ErrorEnvelope, ErrorKind, ErrorMetadata};
pub use result::{Result, ResultExt};

/// Returns the shared crate version.
#[must_use]
pub const fn shared_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
