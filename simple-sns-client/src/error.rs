//! Notification client error types.

use simple_sns_aws::AwsError;
use thiserror::Error;

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, PushError>;

/// Notification client errors.
///
/// Every variant wraps the gateway error that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PushError {
    /// Creating a platform endpoint failed.
    #[error("Device registration failed: {0}")]
    Registration(#[source] AwsError),

    /// Updating endpoint attributes failed.
    #[error("Device update failed for {device_arn}: {source}")]
    Update {
        /// Target endpoint.
        device_arn: String,
        /// Gateway error.
        #[source]
        source: AwsError,
    },

    /// The endpoint does not exist.
    #[error("Device not found: {device_arn}")]
    NotFound {
        /// Target endpoint.
        device_arn: String,
        /// Gateway error.
        #[source]
        source: AwsError,
    },

    /// Reading endpoint attributes failed for a reason other than absence.
    #[error("Device lookup failed for {device_arn}: {source}")]
    Lookup {
        /// Target endpoint.
        device_arn: String,
        /// Gateway error.
        #[source]
        source: AwsError,
    },

    /// Deleting the endpoint failed.
    #[error("Device removal failed for {device_arn}: {source}")]
    Removal {
        /// Target endpoint.
        device_arn: String,
        /// Gateway error.
        #[source]
        source: AwsError,
    },

    /// Publishing to the endpoint failed.
    #[error("Delivery to {device_arn} failed: {source}")]
    Delivery {
        /// Target endpoint.
        device_arn: String,
        /// Gateway error.
        #[source]
        source: AwsError,
    },
}

impl PushError {
    /// The gateway error behind this failure.
    pub fn remote(&self) -> &AwsError {
        match self {
            Self::Registration(source)
            | Self::Update { source, .. }
            | Self::NotFound { source, .. }
            | Self::Lookup { source, .. }
            | Self::Removal { source, .. }
            | Self::Delivery { source, .. } => source,
        }
    }

    /// The endpoint the failed operation targeted, if one existed.
    pub fn device_arn(&self) -> Option<&str> {
        match self {
            Self::Registration(_) => None,
            Self::Update { device_arn, .. }
            | Self::NotFound { device_arn, .. }
            | Self::Lookup { device_arn, .. }
            | Self::Removal { device_arn, .. }
            | Self::Delivery { device_arn, .. } => Some(device_arn),
        }
    }

    /// Check if this error indicates the device should be removed.
    pub fn should_remove_device(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Delivery { source, .. } => source.is_endpoint_disabled() || source.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        self.remote().is_throttled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simple_sns_aws::{CODE_ENDPOINT_DISABLED, CODE_INVALID_PARAMETER, CODE_THROTTLED};
    use std::error::Error as _;

    fn delivery(code: &str) -> PushError {
        PushError::Delivery {
            device_arn: "arn:endpoint".into(),
            source: AwsError::service("Publish", Some(code), "failed"),
        }
    }

    #[test]
    fn test_should_remove_device() {
        assert!(delivery(CODE_ENDPOINT_DISABLED).should_remove_device());
        assert!(!delivery(CODE_INVALID_PARAMETER).should_remove_device());
        assert!(!PushError::Registration(AwsError::Config("x".into())).should_remove_device());
    }

    #[test]
    fn test_is_retryable() {
        assert!(delivery(CODE_THROTTLED).is_retryable());
        assert!(!delivery(CODE_ENDPOINT_DISABLED).is_retryable());
    }

    #[test]
    fn test_source_chain() {
        let err = delivery(CODE_ENDPOINT_DISABLED);
        assert_eq!(err.device_arn(), Some("arn:endpoint"));
        assert!(err.source().is_some());
        assert_eq!(
            err.to_string(),
            "Delivery to arn:endpoint failed: SNS Publish failed (EndpointDisabled): failed"
        );
    }
}
