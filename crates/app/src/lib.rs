//! # fieldcheck-app
//!
//! Application use cases for record validation.
//! This crate depends on `ports`, `domain`, and `shared`.

pub mod validate_record;

pub use validate_record::{ValidateRecordDeps, validate_record};

/// Returns the app crate version.
#[must_use]
pub const fn app_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
