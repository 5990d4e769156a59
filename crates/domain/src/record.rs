//! Data records and dynamic value kinds.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Externally supplied mapping from field name to dynamic value.
///
/// Validators only ever borrow a record; a passing record is handed back
/// untouched, including any keys no rule mentions.
pub type DataRecord = serde_json::Map<String, Value>;

/// Coarse type of a dynamic record value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// JSON `null`.
    Null,
    /// `true` / `false`.
    Boolean,
    /// Number representable as `i64` or `u64`.
    Integer,
    /// Any number, including floats.
    Number,
    /// UTF-8 string.
    String,
    /// Ordered list of values.
    Array,
    /// Nested mapping.
    Object,
}

impl ValueKind {
    /// Classify a value by its most specific kind.
    ///
    /// Integer-like numbers report [`ValueKind::Integer`]; every other number
    /// (including `120.0`) reports [`ValueKind::Number`].
    #[must_use]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(number) if number.is_i64() || number.is_u64() => Self::Integer,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Returns true when `value` satisfies this kind.
    ///
    /// `Number` accepts integers too; every other kind is exact.
    #[must_use]
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            Self::Number => value.is_number(),
            kind => Self::of(value) == kind,
        }
    }

    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Returns true for numbers with no fractional representation.
///
/// Booleans are never integer-like, so a `true` speed is reported as
/// `not a number` rather than treated as `1`. Floats with a zero fraction
/// such as `120.0` are not integer-like either.
#[must_use]
pub fn is_integer_like(value: &Value) -> bool {
    ValueKind::of(value) == ValueKind::Integer
}
