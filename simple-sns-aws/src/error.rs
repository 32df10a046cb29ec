//! SNS gateway error types.

use thiserror::Error;

/// Result type for gateway operations.
pub type Result<T> = std::result::Result<T, AwsError>;

/// SNS error code for a missing endpoint.
pub const CODE_NOT_FOUND: &str = "NotFound";

/// SNS error code for a disabled endpoint.
pub const CODE_ENDPOINT_DISABLED: &str = "EndpointDisabled";

/// SNS error code for an invalid request parameter.
pub const CODE_INVALID_PARAMETER: &str = "InvalidParameter";

/// SNS error code for throttled requests.
pub const CODE_THROTTLED: &str = "Throttling";

/// SNS error code for a service-side failure.
pub const CODE_INTERNAL_ERROR: &str = "InternalError";

/// Errors reported by the SNS gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AwsError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The service rejected or failed the request.
    #[error("SNS {operation} failed{}: {message}", code_suffix(.code))]
    Service {
        /// SNS operation name.
        operation: &'static str,
        /// SNS error code, when the service returned one.
        code: Option<String>,
        /// Error message.
        message: String,
    },

    /// A successful response lacked a required field.
    #[error("SNS {operation} response is missing {field}")]
    MissingField {
        /// SNS operation name.
        operation: &'static str,
        /// Missing field name.
        field: &'static str,
    },
}

fn code_suffix(code: &Option<String>) -> String {
    code.as_deref()
        .map(|c| format!(" ({c})"))
        .unwrap_or_default()
}

impl AwsError {
    /// Create a service error.
    pub fn service(
        operation: &'static str,
        code: Option<impl Into<String>>,
        message: impl Into<String>,
    ) -> Self {
        Self::Service {
            operation,
            code: code.map(Into::into),
            message: message.into(),
        }
    }

    /// SNS error code, if any.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Service { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// The endpoint does not exist.
    pub fn is_not_found(&self) -> bool {
        self.code() == Some(CODE_NOT_FOUND)
    }

    /// The endpoint exists but SNS has disabled it.
    pub fn is_endpoint_disabled(&self) -> bool {
        self.code() == Some(CODE_ENDPOINT_DISABLED)
    }

    /// The request was throttled or hit a transient service failure.
    pub fn is_throttled(&self) -> bool {
        matches!(self.code(), Some(CODE_THROTTLED) | Some(CODE_INTERNAL_ERROR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_code() {
        let err = AwsError::service("Publish", Some("EndpointDisabled"), "Endpoint is disabled");
        assert_eq!(
            err.to_string(),
            "SNS Publish failed (EndpointDisabled): Endpoint is disabled"
        );
        assert!(err.is_endpoint_disabled());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_display_without_code() {
        let err = AwsError::service("DeleteEndpoint", None::<String>, "dispatch failure");
        assert_eq!(err.to_string(), "SNS DeleteEndpoint failed: dispatch failure");
        assert_eq!(err.code(), None);
    }

    #[test]
    fn test_classification() {
        assert!(AwsError::service("GetEndpointAttributes", Some(CODE_NOT_FOUND), "x").is_not_found());
        assert!(AwsError::service("Publish", Some(CODE_THROTTLED), "x").is_throttled());
        assert!(AwsError::service("Publish", Some(CODE_INTERNAL_ERROR), "x").is_throttled());
        assert!(!AwsError::Config("bad".into()).is_throttled());
    }
}
