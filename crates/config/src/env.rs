//! Environment variable parsing and env-to-config merging.
//!
//! Env parsing is strict: a variable that is set must hold a usable value.

use crate::schema::{ValidatedValidatorConfig, ValidatorConfig};
use fieldcheck_shared::{ErrorCode, ErrorEnvelope};
use std::collections::BTreeMap;
use std::fmt;

/// Env var: car model pattern.
pub const ENV_CAR_MODEL_PATTERN: &str = "FIELDCHECK_CAR_MODEL_PATTERN";
/// Env var: car speed lower bound.
pub const ENV_CAR_SPEED_MIN: &str = "FIELDCHECK_CAR_SPEED_MIN";
/// Env var: car speed upper bound.
pub const ENV_CAR_SPEED_MAX: &str = "FIELDCHECK_CAR_SPEED_MAX";

const ENV_VARS: [&str; 3] = [ENV_CAR_MODEL_PATTERN, ENV_CAR_SPEED_MIN, ENV_CAR_SPEED_MAX];

/// Parsed env overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatorEnv {
    /// Override for `car.modelPattern`.
    pub car_model_pattern: Option<Box<str>>,
    /// Override for `car.speedMin`.
    pub car_speed_min: Option<i64>,
    /// Override for `car.speedMax`.
    pub car_speed_max: Option<i64>,
}

impl ValidatorEnv {
    /// Parse overrides from a variable map.
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        Ok(Self {
            car_model_pattern: parse_optional_pattern(map, ENV_CAR_MODEL_PATTERN)?,
            car_speed_min: parse_optional_i64(map, ENV_CAR_SPEED_MIN)?,
            car_speed_max: parse_optional_i64(map, ENV_CAR_SPEED_MAX)?,
        })
    }

    /// Parse overrides from the process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let mut map = BTreeMap::new();
        for var in ENV_VARS {
            if let Ok(value) = std::env::var(var) {
                map.insert(var.to_string(), value);
            }
        }
        Self::from_map(&map)
    }

    /// Returns true when no override is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.car_model_pattern.is_none()
            && self.car_speed_min.is_none()
            && self.car_speed_max.is_none()
    }
}

/// Apply env overrides, then validate and normalize the result.
pub fn apply_env_overrides(
    mut config: ValidatorConfig,
    env: &ValidatorEnv,
) -> Result<ValidatedValidatorConfig, ErrorEnvelope> {
    if let Some(pattern) = env.car_model_pattern.as_ref() {
        config.car.model_pattern.clone_from(pattern);
    }
    if let Some(min) = env.car_speed_min {
        config.car.speed_min = min;
    }
    if let Some(max) = env.car_speed_max {
        config.car.speed_max = max;
    }

    config.validate_and_normalize().map_err(Into::into)
}

/// Env parsing errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvParseError {
    /// The variable is set but empty or whitespace only.
    EmptyValue {
        /// Variable name.
        var: &'static str,
    },
    /// The variable is not a valid signed integer.
    InvalidInt {
        /// Variable name.
        var: &'static str,
        /// Raw value.
        value: String,
    },
}

impl EnvParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyValue { .. } => ErrorCode::new("config", "empty_env_var"),
            Self::InvalidInt { .. } => ErrorCode::new("config", "invalid_env_int"),
        }
    }
}

impl fmt::Display for EnvParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyValue { var } => write!(formatter, "{var} must be non-empty"),
            Self::InvalidInt { var, .. } => write!(formatter, "{var} must be an integer"),
        }
    }
}

impl std::error::Error for EnvParseError {}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            EnvParseError::EmptyValue { var } => envelope.with_metadata("env_var", var),
            EnvParseError::InvalidInt { var, value } => envelope
                .with_metadata("env_var", var)
                .with_metadata("value", value),
        }
    }
}

/// Blank values are rejected; anything else is kept byte for byte.
fn parse_optional_pattern(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<Box<str>>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    if raw.trim().is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }
    Ok(Some(raw.as_str().into()))
}

fn parse_optional_i64(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<i64>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    trimmed
        .parse::<i64>()
        .map(Some)
        .map_err(|_| EnvParseError::InvalidInt {
            var,
            value: raw.clone(),
        })
}
