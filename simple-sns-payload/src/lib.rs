//! # Simple SNS Payload
//!
//! Builds the JSON message Amazon SNS expects when one publish must reach
//! both Android (GCM/FCM) and iOS (APNS) endpoints.
//!
//! ## Quick Start
//!
//! ```rust
//! use simple_sns_payload::{Notification, build_payload};
//!
//! let notification = Notification::new("chat.message", "You have a new message")
//!     .data(serde_json::json!({ "room_id": 12 }))
//!     .badge(1);
//!
//! let payload = build_payload(&notification);
//! assert!(payload.as_str().starts_with(r#"{"default":"default","GCM":"#));
//! ```

mod notification;
mod payload;

pub use notification::{DEFAULT_BADGE, DEFAULT_SOUND, Notification, NotificationBuilder};
pub use payload::{
    APNS_KEY, APNS_SANDBOX_KEY, DEFAULT_MESSAGE, GCM_KEY, Payload, build_payload,
};
