//! # Simple SNS
//!
//! Mobile push notifications over Amazon SNS.
//!
//! - **Payloads**: one JSON message that SNS fans out to GCM and APNS
//! - **Devices**: register, update, look up and remove platform endpoints
//! - **Delivery**: publish to one device, or to many with per-device results
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use simple_sns::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     simple_sns::log::init();
//!
//!     let config = SnsConfig::from_env().build();
//!     let client = NotificationClient::connect(config).await?;
//!
//!     let notification = Notification::new("order.shipped", "Your order is on the way")
//!         .data(serde_json::json!({ "order_id": 1001 }))
//!         .badge(1);
//!
//!     let report = client
//!         .send_to_many(&notification, "arn:aws:sns:...:endpoint/A arn:aws:sns:...:endpoint/B")
//!         .await;
//!
//!     for arn in report.stale_devices() {
//!         client.remove_device(arn).await?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `log` (default) - `simple_sns::log` subscriber setup
//! - `testing` - `simple_sns::aws::mock::MockGateway`

pub use simple_sns_aws as aws;
pub use simple_sns_client as client;
pub use simple_sns_payload as payload;

#[cfg(feature = "log")]
pub use simple_sns_log as log;

pub use simple_sns_aws::{
    ApplicationArnMap, AwsError, AwsSnsGateway, CredentialsSource, SnsConfig, SnsGateway,
};
pub use simple_sns_client::{
    DeliveryOutcome, DeliveryReport, Device, DeviceArn, DeviceArns, DeviceRegistration,
    DeviceUpdate, NotificationClient, Platform, PublishReceipt, PushError,
};
pub use simple_sns_payload::{Notification, NotificationBuilder, Payload, build_payload};

/// Prelude for common imports.
///
/// ```
/// use simple_sns::prelude::*;
/// ```
pub mod prelude {
    pub use simple_sns_aws::{ApplicationArnMap, SnsConfig, SnsGateway};
    pub use simple_sns_client::prelude::*;
}
