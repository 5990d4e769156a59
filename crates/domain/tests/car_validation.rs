//! End-to-end coverage for the car validator and the validator contract.

use fieldcheck_domain::{
    CarValidator, DataRecord, ErrorReport, PrefixPattern, RuleError, Validator,
    has_value_between, matches_regex,
};
use fieldcheck_shared::ErrorEnvelope;
use proptest::prelude::*;
use serde_json::{Value, json};
use std::error::Error;
use std::sync::Arc;
use std::thread;

fn record(value: Value) -> DataRecord {
    match value {
        Value::Object(map) => map,
        _ => DataRecord::new(),
    }
}

fn failure_message(validator: &CarValidator, data: &DataRecord) -> Option<String> {
    validator.validate(data).err().map(|failure| failure.to_string())
}

#[test]
fn out_of_range_speed_fails_even_when_model_passes() -> Result<(), RuleError> {
    let validator = CarValidator::new("^[A-Z]+$", 150, 250)?;
    let data = record(json!({"model": "AUDI", "speed": 120}));

    let message = failure_message(&validator, &data);
    assert_eq!(message.as_deref(), Some("speed: not in range"));
    Ok(())
}

#[test]
fn passing_record_is_returned_unchanged() -> Result<(), Box<dyn Error>> {
    let validator = CarValidator::new("^[A-Z]+$", 100, 250)?;
    let data = record(json!({"model": "AUDI", "speed": 120}));

    let validated = validator.validate(&data)?;
    assert!(std::ptr::eq(validated, &data));
    assert_eq!(Value::Object(validated.clone()), json!({"model": "AUDI", "speed": 120}));
    Ok(())
}

#[test]
fn unchecked_fields_pass_through() -> Result<(), Box<dyn Error>> {
    let validator = CarValidator::new("^[A-Z]+$", 100, 250)?;
    let data = record(json!({"model": "AUDI", "speed": 120, "colour": ["red"]}));

    let validated = validator.validate(&data)?;
    assert_eq!(validated.get("colour"), Some(&json!(["red"])));
    assert_eq!(validated.len(), 3);
    Ok(())
}

#[test]
fn empty_record_reports_both_fields_in_declared_order() -> Result<(), RuleError> {
    let validator = CarValidator::new("^[A-Z]+$", 150, 250)?;

    let message = failure_message(&validator, &DataRecord::new());
    assert_eq!(message.as_deref(), Some("model: required, speed: required"));
    Ok(())
}

#[test]
fn non_integer_speed_is_not_a_number() -> Result<(), RuleError> {
    let validator = CarValidator::new("^[A-Z]+$", 150, 250)?;
    let data = record(json!({"model": "AUDI", "speed": "fast"}));

    let message = failure_message(&validator, &data);
    assert_eq!(message.as_deref(), Some("speed: not a number"));
    Ok(())
}

#[test]
fn two_failing_fields_are_both_reported() -> Result<(), RuleError> {
    let validator = CarValidator::new("^[A-Z]+$", 150, 250)?;
    let data = record(json!({"model": "Audi", "speed": 999}));

    let failure = validator.validate(&data).err();
    let report = failure.map(fieldcheck_domain::ValidationFailure::into_report);
    let fields: Vec<String> = report
        .iter()
        .flat_map(ErrorReport::fields)
        .map(str::to_owned)
        .collect();
    assert_eq!(fields, vec!["model".to_string(), "speed".to_string()]);
    Ok(())
}

#[test]
fn failing_call_does_not_leak_into_next_call() -> Result<(), Box<dyn Error>> {
    let validator = CarValidator::new("^[A-Z]+$", 100, 250)?;

    let bad = record(json!({"speed": "fast"}));
    assert!(validator.validate(&bad).is_err());

    let good = record(json!({"model": "BMW", "speed": 200}));
    let validated = validator.validate(&good)?;
    assert!(std::ptr::eq(validated, &good));
    assert!(validator.check(&good).is_empty());
    Ok(())
}

#[test]
fn report_text_is_idempotent() -> Result<(), RuleError> {
    let validator = CarValidator::new("^[A-Z]+$", 150, 250)?;
    let report = validator.check(&record(json!({"model": "audi"})));

    assert_eq!(report.errors_to_str(), report.errors_to_str());
    assert_eq!(report.errors_to_str(), "model: not correct, speed: required");
    Ok(())
}

#[test]
fn toolkit_properties_hold() -> Result<(), RuleError> {
    assert!(has_value_between(150, 250, 150));
    assert!(has_value_between(150, 250, 250));
    assert!(!has_value_between(150, 250, 149));
    assert!(!has_value_between(150, 250, 251));

    let pattern = PrefixPattern::new("^[A-Z]+$")?;
    assert!(matches_regex(&pattern, "AUDI"));
    assert!(!matches_regex(&pattern, "Audi"));
    assert!(!matches_regex(&pattern, "AUDI1"));
    Ok(())
}

#[test]
fn failure_surfaces_as_error_envelope() -> Result<(), RuleError> {
    let validator = CarValidator::new("^[A-Z]+$", 150, 250)?;
    let data = record(json!({"model": "AUDI", "speed": 120}));

    let envelope = validator.validate(&data).map_err(ErrorEnvelope::from).err();
    assert_eq!(
        envelope
            .as_ref()
            .and_then(|envelope| envelope.metadata.get("field.speed"))
            .map(String::as_str),
        Some("not in range")
    );
    Ok(())
}

#[test]
fn one_validator_serves_concurrent_callers() -> Result<(), Box<dyn Error>> {
    let validator = Arc::new(CarValidator::new("^[A-Z]+$", 100, 250)?);

    let handles: Vec<_> = (0..8_i64)
        .map(|index| {
            let validator = Arc::clone(&validator);
            thread::spawn(move || {
                let data = if index % 2 == 0 {
                    record(json!({"model": "AUDI", "speed": 120}))
                } else {
                    record(json!({"speed": index}))
                };
                validator.check(&data).errors_to_str()
            })
        })
        .collect();

    for (index, handle) in handles.into_iter().enumerate() {
        let message = handle.join().map_err(|_| "validator thread panicked")?;
        if index % 2 == 0 {
            assert_eq!(message, "");
        } else {
            assert_eq!(message, "model: required, speed: not in range");
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn valid_speeds_pass_and_invalid_speeds_fail(speed in -1000i64..1000) {
        let validator = CarValidator::new("^[A-Z]+$", 100, 250)
            .map_err(|error| TestCaseError::fail(error.to_string()))?;
        let data = record(json!({"model": "AUDI", "speed": speed}));

        let passed = validator.validate(&data).is_ok();
        prop_assert_eq!(passed, (100..=250).contains(&speed));
    }

    #[test]
    fn revalidation_matches_fresh_validator(first in "[A-Za-z0-9]{0,6}", second in "[A-Z]{1,6}") {
        let shared = CarValidator::new("^[A-Z]+$", 100, 250)
            .map_err(|error| TestCaseError::fail(error.to_string()))?;
        let fresh = shared.clone();

        let _ = shared.check(&record(json!({"model": first})));
        let data = record(json!({"model": second, "speed": 150}));
        prop_assert_eq!(shared.check(&data), fresh.check(&data));
    }
}
