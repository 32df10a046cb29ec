//! SNS multi-platform message construction.
//!
//! SNS accepts one JSON document per publish when `MessageStructure` is
//! `json`. Each platform key holds its own payload as an escaped JSON string,
//! so the platform objects are serialized once and then embedded in the
//! outer document, which is serialized again.

use serde_json::{Map, Value, json};
use std::fmt;
use tracing::trace;

use crate::Notification;

/// Value of the mandatory `default` key.
pub const DEFAULT_MESSAGE: &str = "default";

/// Key for the Android (GCM/FCM) sub-payload.
pub const GCM_KEY: &str = "GCM";

/// Key for the production APNS sub-payload.
pub const APNS_KEY: &str = "APNS";

/// Key for the sandbox APNS sub-payload.
pub const APNS_SANDBOX_KEY: &str = "APNS_SANDBOX";

/// A serialized SNS message ready to publish with `MessageStructure=json`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Payload(String);

impl Payload {
    /// Wrap an already serialized payload.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The payload text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the payload text.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Size of the payload in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Payload {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Payload> for String {
    fn from(payload: Payload) -> Self {
        payload.0
    }
}

/// Build the payload string for a notification.
///
/// `GCM` receives `{"data": basic}`, `APNS` and `APNS_SANDBOX` receive
/// `{"aps": basic + sound + badge}` where `basic` is `message`, `alert` and
/// (when present) `data`.
pub fn build_payload(notification: &Notification) -> Payload {
    let basic = basic_record(notification);

    let gcm = json!({ "data": Value::Object(basic.clone()) });

    let mut aps = basic;
    aps.insert(
        "sound".to_string(),
        Value::from(notification.effective_sound()),
    );
    aps.insert("badge".to_string(), Value::from(notification.effective_badge()));
    let apns = json!({ "aps": Value::Object(aps) });

    let apns = apns.to_string();
    let envelope = json!({
        "default": DEFAULT_MESSAGE,
        "GCM": gcm.to_string(),
        "APNS": apns.clone(),
        "APNS_SANDBOX": apns,
    });

    let payload = Payload(envelope.to_string());
    trace!(payload_len = payload.len(), "Payload built");
    payload
}

fn basic_record(notification: &Notification) -> Map<String, Value> {
    let mut basic = Map::new();
    basic.insert(
        "message".to_string(),
        Value::from(notification.message.as_str()),
    );
    basic.insert("alert".to_string(), Value::from(notification.alert.as_str()));
    if let Some(data) = &notification.data {
        basic.insert("data".to_string(), data.clone());
    }
    basic
}
