//! # Simple SNS Client
//!
//! Mobile push over Amazon SNS: register device tokens as platform
//! endpoints, then publish one notification to iOS and Android devices alike.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use simple_sns_client::{DeviceRegistration, NotificationClient, Notification};
//! use simple_sns_aws::{ApplicationArnMap, SnsConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SnsConfig::new(ApplicationArnMap::new(
//!         "arn:aws:sns:ap-northeast-1:123456789012:app/APNS/my-ios-app",
//!         "arn:aws:sns:ap-northeast-1:123456789012:app/GCM/my-android-app",
//!     ));
//!     let client = NotificationClient::connect(config).await?;
//!
//!     let device = client
//!         .register_device(DeviceRegistration::ios("device-token").user_data("user-42"))
//!         .await?;
//!
//!     let report = client
//!         .send_to_many(&Notification::new("chat.message", "New message"), vec![device])
//!         .await;
//!
//!     for (arn, err) in report.failed() {
//!         eprintln!("{arn}: {err}");
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod delivery;
mod device;
mod error;

pub use client::NotificationClient;
pub use delivery::{DeliveryOutcome, DeliveryReport};
pub use device::{Device, DeviceArn, DeviceArns, DeviceRegistration, DeviceUpdate};
pub use error::{PushError, Result};

pub use simple_sns_aws::{Platform, PublishReceipt};
pub use simple_sns_payload::{Notification, Payload, build_payload};

/// Prelude for common imports.
///
/// ```
/// use simple_sns_client::prelude::*;
/// ```
pub mod prelude {
    pub use crate::client::NotificationClient;
    pub use crate::delivery::{DeliveryOutcome, DeliveryReport};
    pub use crate::device::{Device, DeviceArn, DeviceArns, DeviceRegistration, DeviceUpdate};
    pub use crate::error::{PushError, Result};
    pub use simple_sns_aws::{Platform, PublishReceipt};
    pub use simple_sns_payload::{Notification, Payload, build_payload};
}
