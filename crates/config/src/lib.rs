//! # fieldcheck-config
//!
//! Validator configuration schema, env overrides, and layered loading.
//! This crate depends on `domain` and `shared` only.

/// JSON Schema export for the validator config.
pub mod config_schema;
/// Environment variable parsing and merging.
pub mod env;
/// Config loading helpers (config text + overrides + env).
pub mod load;
/// Configuration schema types and helpers.
pub mod schema;

pub use config_schema::validator_config_schema;
pub use env::{
    ENV_CAR_MODEL_PATTERN, ENV_CAR_SPEED_MAX, ENV_CAR_SPEED_MIN, EnvParseError, ValidatorEnv,
    apply_env_overrides,
};
pub use load::{
    ConfigFormat, load_validator_config_from_sources, load_validator_config_std_env,
    to_pretty_json, to_pretty_toml,
};
pub use schema::{
    CURRENT_CONFIG_VERSION, CarRulesConfig, ConfigSchemaError, DEFAULT_MODEL_PATTERN,
    DEFAULT_SPEED_MAX, DEFAULT_SPEED_MIN, ValidatedValidatorConfig, ValidatorConfig,
    parse_validator_config_json, parse_validator_config_toml,
};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
