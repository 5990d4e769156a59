//! Config loading helpers (env + config text + overrides).
//!
//! The loader owns the merge order and surfaces user-facing errors as
//! typed `ErrorEnvelope`s. Callers supply text; nothing here touches the
//! filesystem.

use crate::{ValidatedValidatorConfig, ValidatorConfig, ValidatorEnv, apply_env_overrides};
use fieldcheck_shared::{ErrorClass, ErrorCode, ErrorEnvelope};
use serde::Deserialize;

/// Serialization format of a config document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON document.
    Json,
    /// TOML document.
    Toml,
}

impl ConfigFormat {
    /// Resolve a format from a file extension (`json`, `toml`), case-insensitively.
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        if extension.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else if extension.eq_ignore_ascii_case("toml") {
            Some(Self::Toml)
        } else {
            None
        }
    }
}

/// Load the validator config from sources using a deterministic precedence order.
///
/// Precedence (highest wins):
/// - env overrides (`ValidatorEnv`)
/// - overrides JSON (partial config)
/// - config text in `format`
/// - defaults (`ValidatorConfig::default()`)
pub fn load_validator_config_from_sources(
    config_text: Option<&str>,
    format: ConfigFormat,
    overrides_json: Option<&str>,
    env: &ValidatorEnv,
) -> Result<ValidatedValidatorConfig, ErrorEnvelope> {
    let mut config = match config_text {
        None => ValidatorConfig::default(),
        Some(input) => parse_config_unvalidated(input, format)?,
    };

    if let Some(input) = overrides_json {
        let overrides = parse_overrides_json(input)?;
        apply_overrides(&mut config, &overrides);
    }

    // env is applied last and also validates/normalizes the resulting config.
    apply_env_overrides(config, env)
}

/// Load the validator config using the process environment for env overrides.
pub fn load_validator_config_std_env(
    config_text: Option<&str>,
    format: ConfigFormat,
    overrides_json: Option<&str>,
) -> Result<ValidatedValidatorConfig, ErrorEnvelope> {
    let env = ValidatorEnv::from_std_env()?;
    load_validator_config_from_sources(config_text, format, overrides_json, &env)
}

/// Serialize a config as pretty JSON with a trailing newline.
pub fn to_pretty_json(config: &ValidatorConfig) -> Result<String, ErrorEnvelope> {
    let mut output = serde_json::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::new("config", "serialize_json_failed"),
            format!("failed to serialize config as JSON: {error}"),
            ErrorClass::NonRetriable,
        )
    })?;
    output.push('\n');
    Ok(output)
}

/// Serialize a config as pretty TOML.
pub fn to_pretty_toml(config: &ValidatorConfig) -> Result<String, ErrorEnvelope> {
    toml::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::new("config", "serialize_toml_failed"),
            format!("failed to serialize config as TOML: {error}"),
            ErrorClass::NonRetriable,
        )
    })
}

fn parse_config_unvalidated(
    input: &str,
    format: ConfigFormat,
) -> Result<ValidatorConfig, ErrorEnvelope> {
    match format {
        ConfigFormat::Json => serde_json::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_json"),
                format!("invalid config JSON: {error}"),
            )
        }),
        ConfigFormat::Toml => toml::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_toml"),
                format!("invalid config TOML: {error}"),
            )
        }),
    }
}

fn parse_overrides_json(input: &str) -> Result<ValidatorConfigOverrides, ErrorEnvelope> {
    serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_overrides_json"),
            format!("invalid overrides JSON: {error}"),
        )
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ValidatorConfigOverrides {
    version: Option<u32>,
    car: Option<CarRulesOverrides>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct CarRulesOverrides {
    model_pattern: Option<Box<str>>,
    speed_min: Option<i64>,
    speed_max: Option<i64>,
}

fn apply_overrides(config: &mut ValidatorConfig, overrides: &ValidatorConfigOverrides) {
    if let Some(version) = overrides.version {
        config.version = version;
    }
    let Some(car) = overrides.car.as_ref() else {
        return;
    };
    if let Some(pattern) = car.model_pattern.as_ref() {
        config.car.model_pattern.clone_from(pattern);
    }
    if let Some(min) = car.speed_min {
        config.car.speed_min = min;
    }
    if let Some(max) = car.speed_max {
        config.car.speed_max = max;
    }
}
