//! Validate one record against a configured validator.

use fieldcheck_domain::{DataRecord, Validator};
use fieldcheck_ports::{LogFields, LoggerPort, report_fields};
use fieldcheck_shared::{Result, ResultExt};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

/// Dependencies required by validate-record.
#[derive(Clone)]
pub struct ValidateRecordDeps {
    /// Validator applied to each record.
    pub validator: Arc<dyn Validator>,
    /// Optional logger.
    pub logger: Option<Arc<dyn LoggerPort>>,
}

/// Validate `data`, returning the same record when every rule passes.
///
/// Failures are surfaced as a `validation:failed` envelope whose metadata
/// maps `field.<name>` to the failure message and `validator` to the
/// validator name.
pub fn validate_record<'d>(
    deps: &ValidateRecordDeps,
    data: &'d DataRecord,
) -> Result<&'d DataRecord> {
    let started_at = Instant::now();
    let validator_name = deps.validator.name();

    if let Some(logger) = deps.logger.as_ref() {
        logger.debug(
            "validation.record.start",
            "Record validation started",
            Some(log_fields_start(validator_name, data)),
        );
    }

    let outcome = deps.validator.validate(data);
    if let Some(logger) = deps.logger.as_ref() {
        let mut fields = log_fields_done(validator_name, started_at);
        match &outcome {
            Ok(_) => logger.info(
                "validation.record.passed",
                "Record passed validation",
                Some(fields),
            ),
            Err(failure) => {
                fields.extend(report_fields(failure.report()));
                logger.warn(
                    "validation.record.failed",
                    "Record failed validation",
                    Some(fields),
                );
            },
        }
    }

    outcome.with_context("validator", validator_name)
}

fn duration_ms(started_at: Instant) -> u64 {
    u64::try_from(started_at.elapsed().as_millis()).unwrap_or(u64::MAX)
}

fn log_fields_start(validator_name: &str, data: &DataRecord) -> LogFields {
    let mut fields = LogFields::new();
    fields.insert("validator".into(), Value::from(validator_name));
    fields.insert("fieldCount".into(), Value::from(data.len()));
    fields
}

fn log_fields_done(validator_name: &str, started_at: Instant) -> LogFields {
    let mut fields = LogFields::new();
    fields.insert("validator".into(), Value::from(validator_name));
    fields.insert("durationMs".into(), Value::from(duration_ms(started_at)));
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldcheck_domain::{FieldRule, RuleSet, ValueKind};
    use fieldcheck_ports::{LogEvent, LogLevel};
    use serde_json::json;
    use std::error::Error;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<LogEvent>>,
    }

    impl RecordingLogger {
        fn events(&self) -> Vec<LogEvent> {
            self.events
                .lock()
                .map(|events| events.clone())
                .unwrap_or_default()
        }
    }

    impl LoggerPort for RecordingLogger {
        fn log(&self, event: LogEvent) {
            if let Ok(mut events) = self.events.lock() {
                events.push(event);
            }
        }

        fn child(&self, _fields: LogFields) -> Box<dyn LoggerPort> {
            Box::new(Self::default())
        }
    }

    fn deps(logger: &Arc<RecordingLogger>) -> ValidateRecordDeps {
        let validator = RuleSet::new("person")
            .with_rule(FieldRule::present("name"))
            .with_rule(FieldRule::of_type("age", ValueKind::Integer));
        let logger: Arc<dyn LoggerPort> = logger.clone();
        ValidateRecordDeps {
            validator: Arc::new(validator),
            logger: Some(logger),
        }
    }

    fn record(value: Value) -> DataRecord {
        match value {
            Value::Object(map) => map,
            _ => DataRecord::new(),
        }
    }

    #[test]
    fn passing_record_logs_start_and_passed() -> std::result::Result<(), Box<dyn Error>> {
        let logger = Arc::new(RecordingLogger::default());
        let data = record(json!({"name": "Ada", "age": 36}));

        let validated = validate_record(&deps(&logger), &data)?;
        assert!(std::ptr::eq(validated, &data));

        let events: Vec<(String, LogLevel)> = logger
            .events()
            .into_iter()
            .map(|event| (event.event.to_string(), event.level))
            .collect();
        assert_eq!(
            events,
            vec![
                ("validation.record.start".to_string(), LogLevel::Debug),
                ("validation.record.passed".to_string(), LogLevel::Info),
            ]
        );
        Ok(())
    }

    #[test]
    fn failing_record_logs_field_names_but_not_values() {
        let logger = Arc::new(RecordingLogger::default());
        let data = record(json!({"age": "secret-value"}));

        let error = validate_record(&deps(&logger), &data).err();
        assert_eq!(
            error.as_ref().map(|error| error.code.to_string()).as_deref(),
            Some("validation:failed")
        );
        assert_eq!(
            error
                .as_ref()
                .and_then(|error| error.metadata.get("field.age"))
                .map(String::as_str),
            Some("not a number")
        );
        assert_eq!(
            error
                .as_ref()
                .and_then(|error| error.metadata.get("validator"))
                .map(String::as_str),
            Some("person")
        );

        let events = logger.events();
        let failed = events.last().filter(|event| event.level == LogLevel::Warn);
        let fields = failed.and_then(|event| event.fields.clone()).unwrap_or_default();
        assert_eq!(fields.get("failedFields"), Some(&json!(["name", "age"])));
        assert!(!Value::Object(
            fields
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect()
        )
        .to_string()
        .contains("secret-value"));
    }

    #[test]
    fn missing_logger_is_allowed() -> std::result::Result<(), Box<dyn Error>> {
        let deps = ValidateRecordDeps {
            validator: Arc::new(RuleSet::new("empty")),
            logger: None,
        };
        let data = DataRecord::new();
        assert!(validate_record(&deps, &data)?.is_empty());
        Ok(())
    }
}
