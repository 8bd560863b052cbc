//! Error types for the inspector crate.

use orientation::OrderParseError;
use thiserror::Error;

/// Errors raised by the collaborator layer around the orientation core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InspectorError {
    /// A segment of the content path does not name a field of the message.
    #[error("no field {field:?} while resolving {path:?}")]
    MissingField {
        /// The full content path being resolved.
        path: String,
        /// The segment that could not be found.
        field: String,
    },

    /// The addressed field exists but is not quaternion-shaped.
    #[error("unable to display {found} at {path:?} as a quaternion")]
    UnsupportedFieldType {
        /// The full content path being resolved.
        path: String,
        /// The kind of value found there.
        found: &'static str,
    },

    /// Settings failed validation.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// A rotation-order code in the settings did not parse.
    #[error(transparent)]
    Order(#[from] OrderParseError),
}

impl InspectorError {
    #[must_use]
    pub fn missing_field(path: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingField {
            path: path.into(),
            field: field.into(),
        }
    }

    #[must_use]
    pub fn unsupported_field_type(path: impl Into<String>, found: &'static str) -> Self {
        Self::UnsupportedFieldType {
            path: path.into(),
            found,
        }
    }

    #[must_use]
    pub fn invalid_settings(reason: impl Into<String>) -> Self {
        Self::InvalidSettings(reason.into())
    }
}

/// Result type for inspector operations.
pub type Result<T> = std::result::Result<T, InspectorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_names_path_and_segment() {
        let err = InspectorError::missing_field("pose/orientaton", "orientaton");
        let msg = err.to_string();
        assert!(msg.contains("pose/orientaton"));
        assert!(msg.contains("no field"));
    }

    #[test]
    fn unsupported_type_names_the_kind() {
        let err = InspectorError::unsupported_field_type("header/stamp", "number");
        assert!(err.to_string().contains("unable to display number"));
    }

    #[test]
    fn order_errors_convert() {
        let err: InspectorError = OrderParseError::Malformed("zz".into()).into();
        assert!(matches!(err, InspectorError::Order(_)));
        assert!(err.to_string().contains("zz"));
    }
}
