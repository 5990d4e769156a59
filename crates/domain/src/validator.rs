//! The validator contract and the declarative rule-set variant.

use crate::classification::Classification;
use crate::record::{DataRecord, ValueKind};
use crate::report::{ErrorReport, ValidationFailure};
use crate::rules::{
    PrefixPattern, RuleError, classify_key_value, has_value_between, matches_regex,
    validate_key_value,
};
use serde_json::Value;

/// A concrete rule set that checks records.
///
/// Implementors hold only immutable configuration. Each call to
/// [`Validator::check`] builds its own [`ErrorReport`], so one validator can
/// serve any number of calls, from any number of threads, without one call
/// observing another's failures.
pub trait Validator: Send + Sync {
    /// Short identifier used in logs and error metadata.
    fn name(&self) -> &str;

    /// Check every configured field, in declared order, into a fresh report.
    fn check(&self, data: &DataRecord) -> ErrorReport;

    /// Return `data` untouched when every field passes, otherwise the
    /// aggregated failure carrying every failing field.
    fn validate<'d>(&self, data: &'d DataRecord) -> Result<&'d DataRecord, ValidationFailure> {
        self.check(data).into_result(data)
    }
}

/// Check applied to a field once it is known to be present.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldCheck {
    /// Presence only.
    Present,
    /// String value matching a prefix-anchored pattern.
    Pattern(PrefixPattern),
    /// Value of the given kind.
    Type(ValueKind),
    /// Integer-like value within inclusive bounds.
    IntegerRange {
        /// Inclusive lower bound.
        min: i64,
        /// Inclusive upper bound.
        max: i64,
    },
    /// Any number within inclusive bounds.
    NumberRange {
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },
}

/// A required field and the check its value must pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    key: Box<str>,
    check: FieldCheck,
}

impl FieldRule {
    /// Field must be present.
    pub fn present(key: impl Into<Box<str>>) -> Self {
        Self::new(key, FieldCheck::Present)
    }

    /// Field must be a string matching `pattern` at its start.
    pub fn pattern(key: impl Into<Box<str>>, pattern: PrefixPattern) -> Self {
        Self::new(key, FieldCheck::Pattern(pattern))
    }

    /// Field must be of `kind`.
    pub fn of_type(key: impl Into<Box<str>>, kind: ValueKind) -> Self {
        Self::new(key, FieldCheck::Type(kind))
    }

    /// Field must be integer-like and within `[min, max]`.
    pub fn integer_range(key: impl Into<Box<str>>, min: i64, max: i64) -> Result<Self, RuleError> {
        let key = key.into();
        if min > max {
            return Err(inverted(&key, min, max));
        }
        Ok(Self::new(key, FieldCheck::IntegerRange { min, max }))
    }

    /// Field must be a number within `[min, max]`.
    pub fn number_range(key: impl Into<Box<str>>, min: f64, max: f64) -> Result<Self, RuleError> {
        let key = key.into();
        if min.is_nan() || max.is_nan() || min > max {
            return Err(inverted(&key, min, max));
        }
        Ok(Self::new(key, FieldCheck::NumberRange { min, max }))
    }

    fn new(key: impl Into<Box<str>>, check: FieldCheck) -> Self {
        Self {
            key: key.into(),
            check,
        }
    }

    /// Record key this rule checks.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The check applied to a present value.
    #[must_use]
    pub const fn check(&self) -> &FieldCheck {
        &self.check
    }

    /// Classify this rule's field in `data`.
    #[must_use]
    pub fn classify(&self, data: &DataRecord) -> Classification {
        match &self.check {
            FieldCheck::Present => classify_key_value(&self.key, data, |_| Classification::Ok),
            FieldCheck::Pattern(pattern) => validate_key_value(&self.key, data, |value| {
                value
                    .as_str()
                    .is_some_and(|text| matches_regex(pattern, text))
            }),
            FieldCheck::Type(kind) => classify_key_value(&self.key, data, |value| {
                if kind.accepts(value) {
                    Classification::Ok
                } else {
                    Classification::WrongType(*kind)
                }
            }),
            FieldCheck::IntegerRange { min, max } => {
                classify_key_value(&self.key, data, |value| classify_integer(value, *min, *max))
            },
            FieldCheck::NumberRange { min, max } => {
                classify_key_value(&self.key, data, |value| match value.as_f64() {
                    None => Classification::WrongType(ValueKind::Number),
                    Some(number) if has_value_between(*min, *max, number) => Classification::Ok,
                    Some(_) => Classification::NotInRange,
                })
            },
        }
    }
}

/// Integer-like check, then inclusive range check.
///
/// Integers beyond `i64` can never fall inside `i64` bounds and classify as
/// `NotInRange`.
/// Integer-range classification shared by [`FieldCheck::IntegerRange`] and
/// the car `speed` field.
///
/// Only JSON integers qualify. `true` and `120.0` are wrong-type, and an
/// integer outside the `i64` range is `NotInRange`.
pub(crate) fn classify_integer(value: &Value, min: i64, max: i64) -> Classification {
    let Some(number) = value.as_number().filter(|number| number.is_i64() || number.is_u64())
    else {
        return Classification::WrongType(ValueKind::Integer);
    };
    match number.as_i64() {
        Some(integer) if has_value_between(min, max, integer) => Classification::Ok,
        _ => Classification::NotInRange,
    }
}

fn inverted(key: &str, min: impl ToString, max: impl ToString) -> RuleError {
    RuleError::InvertedRange {
        field: key.to_owned(),
        min: min.to_string(),
        max: max.to_string(),
    }
}

/// Ordered list of field rules evaluated as one validator.
///
/// Several rules may target the same key; they run in order and the first
/// failing one supplies that field's message.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    name: Box<str>,
    rules: Vec<FieldRule>,
}

impl RuleSet {
    /// Create an empty rule set.
    pub fn new(name: impl Into<Box<str>>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
        }
    }

    /// Append a rule.
    #[must_use]
    pub fn with_rule(mut self, rule: FieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }
}

impl Validator for RuleSet {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self, data: &DataRecord) -> ErrorReport {
        let mut report = ErrorReport::new();
        for rule in &self.rules {
            report.record_classification(rule.key(), rule.classify(data));
        }
        report
    }
}
