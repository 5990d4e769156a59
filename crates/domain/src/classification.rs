//! Outcome of checking a single field.

use crate::record::ValueKind;
use std::fmt;

/// Why a field failed, or [`Classification::Ok`] when it passed.
///
/// The label of each failing classification is the exact message recorded
/// in an [`ErrorReport`](crate::ErrorReport).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// The field passed its rule.
    Ok,
    /// The key is absent from the record.
    Required,
    /// The value is present but fails the rule's predicate.
    NotCorrect,
    /// The value is present but of the wrong kind.
    WrongType(ValueKind),
    /// The value has the right kind but lies outside the inclusive bounds.
    NotInRange,
}

impl Classification {
    /// Returns true for the passing sentinel.
    #[must_use]
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Failure message for this classification (empty for `Ok`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => "",
            Self::Required => "required",
            Self::NotCorrect => "not correct",
            Self::WrongType(kind) => match kind {
                ValueKind::Integer | ValueKind::Number => "not a number",
                ValueKind::String => "not a string",
                ValueKind::Boolean => "not a boolean",
                ValueKind::Array => "not an array",
                ValueKind::Object => "not an object",
                ValueKind::Null => "not null",
            },
            Self::NotInRange => "not in range",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_match_report_messages() {
        assert_eq!(Classification::Ok.label(), "");
        assert_eq!(Classification::Required.to_string(), "required");
        assert_eq!(Classification::NotCorrect.to_string(), "not correct");
        assert_eq!(Classification::NotInRange.to_string(), "not in range");
        assert_eq!(
            Classification::WrongType(ValueKind::Integer).to_string(),
            "not a number"
        );
        assert_eq!(
            Classification::WrongType(ValueKind::Array).to_string(),
            "not an array"
        );
    }

    #[test]
    fn only_ok_is_ok() {
        assert!(Classification::Ok.is_ok());
        assert!(!Classification::Required.is_ok());
        assert!(!Classification::WrongType(ValueKind::String).is_ok());
    }
}
