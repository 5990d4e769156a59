//! Car rule set: a `model` pattern and an integer `speed` range.

use crate::classification::Classification;
use crate::record::DataRecord;
use crate::report::ErrorReport;
use crate::rules::{PrefixPattern, RuleError, classify_key_value, matches_regex, validate_key_value};
use crate::validator::{Validator, classify_integer};

const MODEL_FIELD: &str = "model";
const SPEED_FIELD: &str = "speed";

/// Validates car records.
///
/// - `model`: required, a string matching the configured pattern at its start.
/// - `speed`: required, integer-like, within the inclusive speed bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarValidator {
    model_pattern: PrefixPattern,
    speed_min: i64,
    speed_max: i64,
}

impl CarValidator {
    /// Build a car validator; fails on an invalid pattern or `speed_min > speed_max`.
    pub fn new(model_regex: &str, speed_min: i64, speed_max: i64) -> Result<Self, RuleError> {
        if speed_min > speed_max {
            return Err(RuleError::InvertedRange {
                field: SPEED_FIELD.to_owned(),
                min: speed_min.to_string(),
                max: speed_max.to_string(),
            });
        }
        Ok(Self {
            model_pattern: PrefixPattern::new(model_regex)?,
            speed_min,
            speed_max,
        })
    }

    /// Pattern the `model` field must match.
    #[must_use]
    pub const fn model_pattern(&self) -> &PrefixPattern {
        &self.model_pattern
    }

    /// Inclusive lower speed bound.
    #[must_use]
    pub const fn speed_min(&self) -> i64 {
        self.speed_min
    }

    /// Inclusive upper speed bound.
    #[must_use]
    pub const fn speed_max(&self) -> i64 {
        self.speed_max
    }

    fn classify_speed(&self, data: &DataRecord) -> Classification {
        classify_key_value(SPEED_FIELD, data, |speed| {
            classify_integer(speed, self.speed_min, self.speed_max)
        })
    }
}

impl Validator for CarValidator {
    fn name(&self) -> &str {
        "car"
    }

    fn check(&self, data: &DataRecord) -> ErrorReport {
        let mut report = ErrorReport::new();

        let model = validate_key_value(MODEL_FIELD, data, |value| {
            value
                .as_str()
                .is_some_and(|text| matches_regex(&self.model_pattern, text))
        });
        report.record_classification(MODEL_FIELD, model);
        report.record_classification(SPEED_FIELD, self.classify_speed(data));

        report
    }
}
