//! # Simple SNS AWS
//!
//! The Amazon SNS side of simple-sns: configuration, the [`SnsGateway`]
//! capability the notification client is written against, and its AWS SDK
//! implementation.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use simple_sns_aws::{AwsSnsGateway, PublishRequest, SnsConfig, SnsGateway};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SnsConfig::from_env()
//!         .ios_application_arn("arn:aws:sns:ap-northeast-1:123456789012:app/APNS/my-app")
//!         .build();
//!
//!     let gateway = AwsSnsGateway::new(&config).await?;
//!     gateway
//!         .publish(PublishRequest::json("arn:aws:sns:...:endpoint/APNS/my-app/...", "{...}"))
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Testing
//!
//! The `testing` feature adds [`mock::MockGateway`], an in-memory gateway that
//! records calls and can be told to fail.

mod config;
mod error;
mod gateway;
mod platform;
mod sns;

#[cfg(any(test, feature = "testing"))]
pub mod mock;

pub use config::{
    ApplicationArnMap, CredentialsSource, DEFAULT_MAX_CONCURRENT_PUBLISHES, DEFAULT_REGION,
    SnsConfig, SnsConfigBuilder,
};
pub use error::{
    AwsError, CODE_ENDPOINT_DISABLED, CODE_INTERNAL_ERROR, CODE_INVALID_PARAMETER, CODE_NOT_FOUND,
    CODE_THROTTLED, Result,
};
pub use gateway::{
    ATTR_CUSTOM_USER_DATA, ATTR_ENABLED, ATTR_TOKEN, CreateEndpointRequest, EndpointAttributes,
    PublishReceipt, PublishRequest, SnsGateway,
};
pub use platform::Platform;
pub use sns::AwsSnsGateway;

// Re-export AWS types for convenience
pub use aws_config;
pub use aws_sdk_sns;
