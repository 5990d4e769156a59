//! JSON Schema export for the validator config.

use crate::ValidatorConfig;
use schemars::{Schema, schema_for};

/// JSON Schema for `ValidatorConfig`.
#[must_use]
pub fn validator_config_schema() -> Schema {
    schema_for!(ValidatorConfig)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_names_car_fields() -> Result<(), serde_json::Error> {
        let schema = serde_json::to_value(validator_config_schema())?;
        assert!(schema.pointer("/properties/car").is_some());
        let rendered = schema.to_string();
        assert!(rendered.contains("modelPattern"));
        assert!(rendered.contains("speedMin"));
        assert!(rendered.contains("speedMax"));
        Ok(())
    }
}
