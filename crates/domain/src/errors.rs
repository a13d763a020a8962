//! Error types used throughout the adapter

use thiserror::Error;

/// Main error type for the Dental Office adapter
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DentalOfficeError {
    /// Locally detected input problem. Never sent over the wire.
    #[error("{message}")]
    Validation { field: Option<String>, message: String },

    #[error("operation \"{operation}\" is not supported for resource \"{resource}\"")]
    UnsupportedOperation { operation: String, resource: String },

    /// Token issuance failed, or a request still failed after re-authenticating.
    #[error("authentication error: {0}")]
    Authentication(String),

    /// Non-2xx response (or transport failure) from the vendor API.
    #[error("Dental Office API error ({}): {message} [{endpoint}]", status_label(.status))]
    Api { status: Option<u16>, message: String, endpoint: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),
}

fn status_label(status: &Option<u16>) -> String {
    status.map_or_else(|| "unknown".to_string(), |code| code.to_string())
}

impl DentalOfficeError {
    /// Validation error attributed to a single parameter.
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        Self::Validation { field: Some(field.to_string()), message: message.into() }
    }

    pub fn missing_parameter(field: &str) -> Self {
        Self::invalid_field(field, format!("missing required parameter `{field}`"))
    }

    pub fn unsupported(operation: impl Into<String>, resource: impl Into<String>) -> Self {
        Self::UnsupportedOperation { operation: operation.into(), resource: resource.into() }
    }

    /// Parameter name for validation errors, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => field.as_deref(),
            _ => None,
        }
    }

    /// HTTP status carried by API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => *status,
            _ => None,
        }
    }

    /// Stable label suitable for structured logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::UnsupportedOperation { .. } => "unsupported_operation",
            Self::Authentication(_) => "authentication",
            Self::Api { .. } => "api",
            Self::Config(_) => "config",
            Self::Internal(_) => "internal",
        }
    }
}

/// Result type alias for adapter operations
pub type Result<T> = std::result::Result<T, DentalOfficeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_names_field() {
        let err = DentalOfficeError::invalid_field("addressesAttributes", "invalid JSON");

        assert_eq!(err.field(), Some("addressesAttributes"));
        assert_eq!(err.to_string(), "invalid JSON");
        assert_eq!(err.label(), "validation");
    }

    #[test]
    fn missing_parameter_message() {
        let err = DentalOfficeError::missing_parameter("clinicId");
        assert_eq!(err.to_string(), "missing required parameter `clinicId`");
    }

    #[test]
    fn api_error_display_includes_status_and_endpoint() {
        let err = DentalOfficeError::Api {
            status: Some(422),
            message: "name can't be blank".to_string(),
            endpoint: "POST /v1/users".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "Dental Office API error (422): name can't be blank [POST /v1/users]"
        );
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn api_error_without_status_is_unknown() {
        let err = DentalOfficeError::Api {
            status: None,
            message: "connection refused".to_string(),
            endpoint: "GET /v1/users".to_string(),
        };

        assert!(err.to_string().contains("(unknown)"));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn unsupported_operation_names_both_parts() {
        let err = DentalOfficeError::unsupported("getAvailableHours", "user");

        assert_eq!(
            err.to_string(),
            "operation \"getAvailableHours\" is not supported for resource \"user\""
        );
        assert_eq!(err.label(), "unsupported_operation");
    }
}
