//! Logical push notification.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{Payload, build_payload};

/// Sound played on iOS when none is given.
pub const DEFAULT_SOUND: &str = "Ding";

/// Badge count sent to iOS when none is given.
pub const DEFAULT_BADGE: u32 = 0;

/// Push notification content shared by Android and iOS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// App side action identifier.
    pub message: String,
    /// Main text displayed to the user.
    pub alert: String,
    /// Extra data.
    ///
    /// `None` omits the key from the payload. `Some(Value::Null)` sends an
    /// explicit `null`.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<Value>,
    /// Sound to play (iOS).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
    /// Badge count (iOS).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<u32>,
}

// A present `"data": null` must survive deserialization as `Some(Value::Null)`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl Notification {
    /// Create a new notification.
    pub fn new(message: impl Into<String>, alert: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            alert: alert.into(),
            data: None,
            sound: None,
            badge: None,
        }
    }

    /// Create a builder.
    pub fn builder() -> NotificationBuilder {
        NotificationBuilder::new()
    }

    /// Attach extra data.
    pub fn data(mut self, data: impl Into<Value>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Set the sound.
    pub fn sound(mut self, sound: impl Into<String>) -> Self {
        self.sound = Some(sound.into());
        self
    }

    /// Set the badge count.
    pub fn badge(mut self, count: u32) -> Self {
        self.badge = Some(count);
        self
    }

    /// Sound that will be sent to APNS.
    ///
    /// An empty sound name falls back to [`DEFAULT_SOUND`].
    pub fn effective_sound(&self) -> &str {
        self.sound
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SOUND)
    }

    /// Badge count that will be sent to APNS.
    pub fn effective_badge(&self) -> u32 {
        self.badge.unwrap_or(DEFAULT_BADGE)
    }

    /// Build the SNS payload for this notification.
    pub fn to_payload(&self) -> Payload {
        build_payload(self)
    }
}

/// Builder for notifications.
#[derive(Debug, Default)]
pub struct NotificationBuilder {
    message: String,
    alert: String,
    data: Option<Value>,
    sound: Option<String>,
    badge: Option<u32>,
}

impl NotificationBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the message identifier.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Set the alert text.
    pub fn alert(mut self, alert: impl Into<String>) -> Self {
        self.alert = alert.into();
        self
    }

    /// Set extra data.
    pub fn data(mut self, data: impl Into<Value>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Set the sound.
    pub fn sound(mut self, sound: impl Into<String>) -> Self {
        self.sound = Some(sound.into());
        self
    }

    /// Set the badge.
    pub fn badge(mut self, badge: u32) -> Self {
        self.badge = Some(badge);
        self
    }

    /// Build the notification.
    pub fn build(self) -> Notification {
        Notification {
            message: self.message,
            alert: self.alert,
            data: self.data,
            sound: self.sound,
            badge: self.badge,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let n = Notification::new("m", "a");
        assert_eq!(n.effective_sound(), "Ding");
        assert_eq!(n.effective_badge(), 0);
        assert!(n.data.is_none());
    }

    #[test]
    fn test_empty_sound_uses_default() {
        let n = Notification::new("m", "a").sound("");
        assert_eq!(n.effective_sound(), DEFAULT_SOUND);
    }

    #[test]
    fn test_builder_matches_setters() {
        let built = Notification::builder()
            .message("chat.new")
            .alert("You have a message")
            .data(json!({"room": 7}))
            .sound("chime")
            .badge(3)
            .build();

        let chained = Notification::new("chat.new", "You have a message")
            .data(json!({"room": 7}))
            .sound("chime")
            .badge(3);

        assert_eq!(built, chained);
    }

    #[test]
    fn test_deserialize_keeps_explicit_null_data() {
        let with_null: Notification =
            serde_json::from_str(r#"{"message":"m","alert":"a","data":null}"#).unwrap();
        assert_eq!(with_null.data, Some(Value::Null));

        let without: Notification = serde_json::from_str(r#"{"message":"m","alert":"a"}"#).unwrap();
        assert_eq!(without.data, None);
    }
}
