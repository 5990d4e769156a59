//! Validator configuration schema, validation, and normalization.

use fieldcheck_domain::{CarValidator, RuleError};
use fieldcheck_shared::{ErrorCode, ErrorEnvelope};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Current config schema version.
pub const CURRENT_CONFIG_VERSION: u32 = 1;

/// Default `car.modelPattern`.
pub const DEFAULT_MODEL_PATTERN: &str = "^[A-Z]+$";
/// Default `car.speedMin`.
pub const DEFAULT_SPEED_MIN: i64 = 150;
/// Default `car.speedMax`.
pub const DEFAULT_SPEED_MAX: i64 = 250;

/// Top-level validator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct ValidatorConfig {
    /// Schema version.
    pub version: u32,
    /// Car rule settings.
    pub car: CarRulesConfig,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_CONFIG_VERSION,
            car: CarRulesConfig::default(),
        }
    }
}

impl ValidatorConfig {
    /// Validate the config and build the configured validators.
    ///
    /// Patterns are kept verbatim; surrounding whitespace is part of the regex.
    pub fn validate_and_normalize(self) -> Result<ValidatedValidatorConfig, ConfigSchemaError> {
        self.validate_version()?;
        let car = self.car.build()?;
        Ok(ValidatedValidatorConfig { raw: self, car })
    }

    const fn validate_version(&self) -> Result<(), ConfigSchemaError> {
        if self.version != CURRENT_CONFIG_VERSION {
            return Err(ConfigSchemaError::UnsupportedVersion {
                found: self.version,
                supported: CURRENT_CONFIG_VERSION,
            });
        }
        Ok(())
    }
}

/// Car rule settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct CarRulesConfig {
    /// Regular expression `model` must match at its start.
    pub model_pattern: Box<str>,
    /// Inclusive lower bound for `speed`.
    pub speed_min: i64,
    /// Inclusive upper bound for `speed`.
    pub speed_max: i64,
}

impl Default for CarRulesConfig {
    fn default() -> Self {
        Self {
            model_pattern: DEFAULT_MODEL_PATTERN.into(),
            speed_min: DEFAULT_SPEED_MIN,
            speed_max: DEFAULT_SPEED_MAX,
        }
    }
}

impl CarRulesConfig {
    fn build(&self) -> Result<CarValidator, ConfigSchemaError> {
        if self.model_pattern.trim().is_empty() {
            return Err(ConfigSchemaError::EmptyValue {
                section: "car",
                field: "modelPattern",
            });
        }
        if self.speed_min > self.speed_max {
            return Err(ConfigSchemaError::InvertedRange {
                section: "car",
                min_field: "speedMin",
                max_field: "speedMax",
                min: self.speed_min,
                max: self.speed_max,
            });
        }
        CarValidator::new(&self.model_pattern, self.speed_min, self.speed_max).map_err(|error| {
            match error {
                RuleError::InvalidPattern { pattern, reason } => {
                    ConfigSchemaError::InvalidPattern {
                        section: "car",
                        field: "modelPattern",
                        pattern,
                        reason,
                    }
                },
                RuleError::InvertedRange { .. } => ConfigSchemaError::InvertedRange {
                    section: "car",
                    min_field: "speedMin",
                    max_field: "speedMax",
                    min: self.speed_min,
                    max: self.speed_max,
                },
            }
        })
    }
}

/// Validated config wrapper carrying ready-to-use validators.
#[derive(Debug, Clone)]
pub struct ValidatedValidatorConfig {
    raw: ValidatorConfig,
    car: CarValidator,
}

impl ValidatedValidatorConfig {
    /// The car validator built from `car`.
    #[must_use]
    pub const fn car_validator(&self) -> &CarValidator {
        &self.car
    }

    /// Borrow the normalized config.
    #[must_use]
    pub const fn as_ref(&self) -> &ValidatorConfig {
        &self.raw
    }

    /// Return the normalized config.
    #[must_use]
    pub fn into_inner(self) -> ValidatorConfig {
        self.raw
    }
}

impl AsRef<ValidatorConfig> for ValidatedValidatorConfig {
    fn as_ref(&self) -> &ValidatorConfig {
        &self.raw
    }
}

impl std::ops::Deref for ValidatedValidatorConfig {
    type Target = ValidatorConfig;

    fn deref(&self) -> &Self::Target {
        &self.raw
    }
}

/// Parse a validator config from a JSON string, applying validation and normalization.
pub fn parse_validator_config_json(
    input: &str,
) -> Result<ValidatedValidatorConfig, ErrorEnvelope> {
    let config: ValidatorConfig = serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_json"),
            format!("invalid config JSON: {error}"),
        )
    })?;

    config.validate_and_normalize().map_err(Into::into)
}

/// Parse a validator config from a TOML string, applying validation and normalization.
pub fn parse_validator_config_toml(
    input: &str,
) -> Result<ValidatedValidatorConfig, ErrorEnvelope> {
    let config: ValidatorConfig = toml::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_toml"),
            format!("invalid config TOML: {error}"),
        )
    })?;

    config.validate_and_normalize().map_err(Into::into)
}

/// Config schema validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSchemaError {
    /// The config version is not supported by this crate.
    UnsupportedVersion {
        /// Version found in the config.
        found: u32,
        /// Version supported by this crate.
        supported: u32,
    },
    /// A required string field is empty or whitespace only.
    EmptyValue {
        /// Schema section (e.g. `car`).
        section: &'static str,
        /// Field name in the config file (e.g. `modelPattern`).
        field: &'static str,
    },
    /// A pattern failed to compile.
    InvalidPattern {
        /// Schema section.
        section: &'static str,
        /// Field name in the config file.
        field: &'static str,
        /// Pattern as written.
        pattern: String,
        /// Compiler diagnostic.
        reason: String,
    },
    /// A lower bound exceeds its upper bound.
    InvertedRange {
        /// Schema section.
        section: &'static str,
        /// Lower bound field name.
        min_field: &'static str,
        /// Upper bound field name.
        max_field: &'static str,
        /// Lower bound value.
        min: i64,
        /// Upper bound value.
        max: i64,
    },
}

impl ConfigSchemaError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnsupportedVersion { .. } => ErrorCode::new("config", "unsupported_version"),
            Self::EmptyValue { .. } => ErrorCode::new("config", "empty_value"),
            Self::InvalidPattern { .. } => ErrorCode::new("config", "invalid_pattern"),
            Self::InvertedRange { .. } => ErrorCode::new("config", "invalid_range"),
        }
    }
}

impl fmt::Display for ConfigSchemaError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedVersion { found, supported } => write!(
                formatter,
                "unsupported config version {found} (supported: {supported})"
            ),
            Self::EmptyValue { section, field } => {
                write!(formatter, "{section}.{field} must be non-empty")
            },
            Self::InvalidPattern {
                section,
                field,
                reason,
                ..
            } => write!(formatter, "{section}.{field} is not a valid pattern: {reason}"),
            Self::InvertedRange {
                section,
                min_field,
                max_field,
                min,
                max,
            } => write!(
                formatter,
                "{section}.{min_field} ({min}) must not exceed {section}.{max_field} ({max})"
            ),
        }
    }
}

impl std::error::Error for ConfigSchemaError {}

impl From<ConfigSchemaError> for ErrorEnvelope {
    fn from(error: ConfigSchemaError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            ConfigSchemaError::UnsupportedVersion { found, supported } => envelope
                .with_metadata("found", found.to_string())
                .with_metadata("supported", supported.to_string()),
            ConfigSchemaError::EmptyValue { section, field } => envelope
                .with_metadata("section", section)
                .with_metadata("field", field),
            ConfigSchemaError::InvalidPattern {
                section,
                field,
                pattern,
                ..
            } => envelope
                .with_metadata("section", section)
                .with_metadata("field", field)
                .with_metadata("pattern", pattern),
            ConfigSchemaError::InvertedRange {
                section,
                min_field,
                max_field,
                min,
                max,
            } => envelope
                .with_metadata("section", section)
                .with_metadata("field", format!("{min_field}/{max_field}"))
                .with_metadata("min", min.to_string())
                .with_metadata("max", max.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldcheck_domain::Validator;
    use serde_json::json;
    use std::error::Error;

    #[test]
    fn defaults_build_the_reference_car_validator() -> Result<(), Box<dyn Error>> {
        let validated = ValidatorConfig::default().validate_and_normalize()?;
        let car = validated.car_validator();
        assert_eq!(car.model_pattern().as_str(), DEFAULT_MODEL_PATTERN);
        assert_eq!(car.speed_min(), DEFAULT_SPEED_MIN);
        assert_eq!(car.speed_max(), DEFAULT_SPEED_MAX);

        let data = json!({"model": "AUDI", "speed": 120});
        let data = data.as_object().ok_or("expected object")?;
        assert_eq!(car.check(data).errors_to_str(), "speed: not in range");
        Ok(())
    }

    #[test]
    fn pattern_is_kept_verbatim() -> Result<(), Box<dyn Error>> {
        let validated = parse_validator_config_json(r#"{"car":{"modelPattern":" AUDI"}}"#)?;
        assert_eq!(validated.car.model_pattern().as_str(), " AUDI");

        let car = validated.car_validator();
        assert_eq!(car.model_pattern().as_str(), " AUDI");
        let leading_space = json!({"model": " AUDI", "speed": 200});
        let bare = json!({"model": "AUDI", "speed": 200});
        assert!(car.check(leading_space.as_object().ok_or("expected object")?).is_empty());
        assert_eq!(
            car.check(bare.as_object().ok_or("expected object")?).errors_to_str(),
            "model: not correct"
        );
        Ok(())
    }

    #[test]
    fn rejects_unsupported_version() {
        let error = ValidatorConfig {
            version: 2,
            ..ValidatorConfig::default()
        }
        .validate_and_normalize()
        .err();
        assert_eq!(
            error,
            Some(ConfigSchemaError::UnsupportedVersion {
                found: 2,
                supported: CURRENT_CONFIG_VERSION,
            })
        );
    }

    #[test]
    fn rejects_blank_and_invalid_patterns() {
        let blank = parse_validator_config_json(r#"{"car":{"modelPattern":"   "}}"#).err();
        assert_eq!(
            blank.map(|error| error.code.to_string()).as_deref(),
            Some("config:empty_value")
        );

        let invalid = parse_validator_config_json(r#"{"car":{"modelPattern":"^[A-Z"}}"#).err();
        assert_eq!(
            invalid
                .as_ref()
                .and_then(|error| error.metadata.get("field"))
                .map(String::as_str),
            Some("modelPattern")
        );

        let unbalanced =
            parse_validator_config_json(r#"{"car":{"modelPattern":"x)|(?:[0-9]"}}"#).err();
        assert_eq!(
            unbalanced.map(|error| error.code.to_string()).as_deref(),
            Some("config:invalid_pattern")
        );
    }

    #[test]
    fn rejects_inverted_speed_range() {
        let error = parse_validator_config_toml("[car]\nspeedMin = 300\nspeedMax = 100\n").err();
        assert_eq!(
            error.map(|error| error.code.to_string()).as_deref(),
            Some("config:invalid_range")
        );
    }

    #[test]
    fn rejects_unknown_fields() {
        let error = parse_validator_config_json(r#"{"car":{"topSpeed":300}}"#).err();
        assert_eq!(
            error.map(|error| error.code.to_string()).as_deref(),
            Some("config:invalid_json")
        );
    }
}
