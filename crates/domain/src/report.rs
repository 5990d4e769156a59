//! Error reports and the aggregated validation failure.

use crate::classification::Classification;
use fieldcheck_shared::{ErrorCode, ErrorEnvelope};
use serde::Serialize;
use std::fmt;

/// One failing field and its message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Record key that failed.
    pub field: Box<str>,
    /// Human-readable failure message.
    pub message: Box<str>,
}

impl fmt::Display for FieldError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}: {}", self.field, self.message)
    }
}

/// Per-call mapping of failing fields to messages, in check order.
///
/// A report is built fresh by each validation call and never shared between
/// calls. At most one message is kept per field; the first one recorded wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorReport {
    entries: Vec<FieldError>,
}

impl ErrorReport {
    /// Create an empty report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a failure message for `field`.
    ///
    /// Returns false (and keeps the earlier message) when the field already failed.
    pub fn record(&mut self, field: &str, message: impl Into<Box<str>>) -> bool {
        if self.get(field).is_some() {
            return false;
        }
        self.entries.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
        true
    }

    /// Record a classification, ignoring the `Ok` sentinel.
    pub fn record_classification(&mut self, field: &str, outcome: Classification) -> bool {
        if outcome.is_ok() {
            return false;
        }
        self.record(field, outcome.label())
    }

    /// Returns true when no field failed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of failing fields.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Message recorded for `field`, if it failed.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| &*entry.field == field)
            .map(|entry| &*entry.message)
    }

    /// Failing entries in check order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.entries.iter()
    }

    /// Failing field names in check order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| &*entry.field)
    }

    /// Render as `"field: message, field: message"`.
    #[must_use]
    pub fn errors_to_str(&self) -> String {
        self.to_string()
    }

    /// `Ok(value)` when the report is empty, otherwise the aggregated failure.
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationFailure> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(ValidationFailure { report: self })
        }
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, entry) in self.entries.iter().enumerate() {
            if index > 0 {
                formatter.write_str(", ")?;
            }
            write!(formatter, "{entry}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ErrorReport {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// A record failed at least one field rule.
///
/// This is the only validation error; missing fields, wrong types, range
/// and pattern failures differ only by their per-field messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    report: ErrorReport,
}

impl ValidationFailure {
    /// The full report (never empty).
    #[must_use]
    pub const fn report(&self) -> &ErrorReport {
        &self.report
    }

    /// Consume the failure and return its report.
    #[must_use]
    pub fn into_report(self) -> ErrorReport {
        self.report
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.report, formatter)
    }
}

impl std::error::Error for ValidationFailure {}

impl From<ValidationFailure> for ErrorEnvelope {
    fn from(failure: ValidationFailure) -> Self {
        let message = failure.to_string();
        Self::expected(ErrorCode::validation_failed(), message).with_metadata_entries(
            failure
                .report
                .entries
                .into_iter()
                .map(|entry| (format!("field.{}", entry.field), String::from(entry.message))),
        )
    }
}
