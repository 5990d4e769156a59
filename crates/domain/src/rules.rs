//! Rule toolkit: stateless predicates shared by every validator.
//!
//! Nothing here holds per-call state. Patterns are compiled once, when a
//! rule is built, and every helper is a pure function of its inputs.

use crate::classification::Classification;
use crate::record::DataRecord;
use fieldcheck_shared::{ErrorCode, ErrorEnvelope};
use regex::Regex;
use serde_json::Value;
use std::fmt;

/// Regex that must match at the start of the text.
///
/// The pattern compiles exactly as written and a match only counts when it
/// begins at offset 0. A pattern without a trailing `$` accepts any text
/// whose prefix matches, so `^[A-Z]+` accepts `"AUDI1"` while `^[A-Z]+$`
/// does not.
///
/// `$` follows the `regex` crate: without `(?m)` it matches only at the very
/// end of the text, so `^[A-Z]+$` rejects `"AUDI\n"`. This is stricter than
/// engines where `$` also matches before a trailing newline.
#[derive(Debug, Clone)]
pub struct PrefixPattern {
    source: Box<str>,
    regex: Regex,
}

impl PrefixPattern {
    /// Compile `pattern`; fails when the pattern itself does not compile.
    pub fn new(pattern: &str) -> Result<Self, RuleError> {
        let regex = Regex::new(pattern).map_err(|error| RuleError::InvalidPattern {
            pattern: pattern.to_owned(),
            reason: error.to_string(),
        })?;
        Ok(Self {
            source: pattern.into(),
            regex,
        })
    }

    /// The pattern text as supplied by the caller.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns true when the pattern matches at the start of `text`.
    ///
    /// A leftmost search reports offset 0 whenever any match begins there.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex
            .find(text)
            .is_some_and(|found| found.start() == 0)
    }
}

impl PartialEq for PrefixPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for PrefixPattern {}

impl fmt::Display for PrefixPattern {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.source)
    }
}

/// True iff `text` matches `pattern` at its start.
#[must_use]
pub fn matches_regex(pattern: &PrefixPattern, text: &str) -> bool {
    pattern.is_match(text)
}

/// True iff `min <= value <= max`.
#[must_use]
pub fn has_value_between<T: PartialOrd>(min: T, max: T, value: T) -> bool {
    (min..=max).contains(&value)
}

/// Two-state field check: `Required` when absent, `NotCorrect` when the
/// predicate rejects the value, `Ok` otherwise.
pub fn validate_key_value<F>(key: &str, data: &DataRecord, predicate: F) -> Classification
where
    F: FnOnce(&Value) -> bool,
{
    classify_key_value(key, data, |value| {
        if predicate(value) {
            Classification::Ok
        } else {
            Classification::NotCorrect
        }
    })
}

/// Field check with caller-chosen classifications for present values.
///
/// Absence always classifies as `Required`; `classify` only sees present values.
pub fn classify_key_value<F>(key: &str, data: &DataRecord, classify: F) -> Classification
where
    F: FnOnce(&Value) -> Classification,
{
    data.get(key).map_or(Classification::Required, classify)
}

/// Failures raised while building rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// The regex source does not compile.
    InvalidPattern {
        /// Pattern text as supplied.
        pattern: String,
        /// Compiler diagnostic.
        reason: String,
    },
    /// Range bounds are inverted (`min > max`).
    InvertedRange {
        /// Field the range applies to.
        field: String,
        /// Lower bound as rendered text.
        min: String,
        /// Upper bound as rendered text.
        max: String,
    },
}

impl RuleError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::InvalidPattern { .. } => ErrorCode::new("domain", "invalid_pattern"),
            Self::InvertedRange { .. } => ErrorCode::new("domain", "invalid_range"),
        }
    }
}

impl fmt::Display for RuleError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPattern { pattern, reason } => {
                write!(formatter, "invalid pattern {pattern:?}: {reason}")
            },
            Self::InvertedRange { field, min, max } => {
                write!(formatter, "{field} range minimum {min} exceeds maximum {max}")
            },
        }
    }
}

impl std::error::Error for RuleError {}

impl From<RuleError> for ErrorEnvelope {
    fn from(error: RuleError) -> Self {
        let envelope = Self::expected(error.error_code(), error.to_string());
        match error {
            RuleError::InvalidPattern { pattern, .. } => envelope.with_metadata("pattern", pattern),
            RuleError::InvertedRange { field, min, max } => envelope
                .with_metadata("field", field)
                .with_metadata("min", min)
                .with_metadata("max", max),
        }
    }
}
