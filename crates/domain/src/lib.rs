//! # fieldcheck-domain
//!
//! Field rules, error reports, and the validator contract.
//!
//! This crate contains the validation model with no infrastructure dependencies:
//!
//! - **Records** - `DataRecord`, `ValueKind`
//! - **Rule toolkit** - `PrefixPattern`, `matches_regex`, `has_value_between`,
//!   `validate_key_value`, `classify_key_value`
//! - **Reports** - `Classification`, `ErrorReport`, `ValidationFailure`
//! - **Validators** - the `Validator` trait, `RuleSet`, `CarValidator`
//!
//! ## Dependency Rules
//!
//! - Depends only on `shared` crate
//! - No infrastructure or adapter dependencies
//! - Pure domain logic with no I/O

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

// Re-export shared types for convenience
pub use fieldcheck_shared::shared_crate_version;

// =============================================================================
// DOMAIN MODULES
// =============================================================================

pub mod car;
pub mod classification;
pub mod record;
pub mod report;
pub mod rules;
pub mod validator;

pub use car::CarValidator;
pub use classification::Classification;
pub use record::{DataRecord, ValueKind, is_integer_like};
pub use report::{ErrorReport, FieldError, ValidationFailure};
pub use rules::{
    PrefixPattern, RuleError, classify_key_value, has_value_between, matches_regex,
    validate_key_value,
};
pub use validator::{FieldCheck, FieldRule, RuleSet, Validator};

/// Returns the domain crate version.
#[must_use]
pub const fn domain_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// =============================================================================
// TESTS
// =============================================================================
