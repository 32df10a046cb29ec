//! Remote SNS capability.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::Result;

/// Endpoint attribute holding the device token.
pub const ATTR_TOKEN: &str = "Token";

/// Endpoint attribute holding caller supplied user data.
pub const ATTR_CUSTOM_USER_DATA: &str = "CustomUserData";

/// Endpoint attribute holding the enabled flag.
pub const ATTR_ENABLED: &str = "Enabled";

/// Request to create a platform endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEndpointRequest {
    /// Platform application the token belongs to.
    pub platform_application_arn: String,
    /// Device token.
    pub token: String,
    /// Custom user data stored with the endpoint.
    pub custom_user_data: Option<String>,
}

/// Request to publish a message to one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    /// Target endpoint arn.
    pub target_arn: String,
    /// Message body.
    pub message: String,
    /// `json` for per-platform messages, `None` for a raw string.
    pub message_structure: Option<String>,
}

impl PublishRequest {
    /// A per-platform JSON message for one endpoint.
    pub fn json(target_arn: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            target_arn: target_arn.into(),
            message: message.into(),
            message_structure: Some("json".to_string()),
        }
    }
}

/// Result of a successful publish.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishReceipt {
    /// SNS message id.
    pub message_id: Option<String>,
}

/// Typed view over the SNS endpoint attribute map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointAttributes {
    /// Device token.
    pub token: Option<String>,
    /// Custom user data.
    pub custom_user_data: Option<String>,
    /// Whether SNS will deliver to the endpoint.
    pub enabled: Option<bool>,
}

impl EndpointAttributes {
    /// Parse from the raw attribute map.
    pub fn from_map(map: &HashMap<String, String>) -> Self {
        Self {
            token: map.get(ATTR_TOKEN).cloned(),
            custom_user_data: map.get(ATTR_CUSTOM_USER_DATA).cloned(),
            enabled: map
                .get(ATTR_ENABLED)
                .map(|v| v.eq_ignore_ascii_case("true")),
        }
    }

    /// Convert to the raw attribute map, skipping unset attributes.
    pub fn to_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        if let Some(token) = &self.token {
            map.insert(ATTR_TOKEN.to_string(), token.clone());
        }
        if let Some(data) = &self.custom_user_data {
            map.insert(ATTR_CUSTOM_USER_DATA.to_string(), data.clone());
        }
        if let Some(enabled) = self.enabled {
            map.insert(ATTR_ENABLED.to_string(), enabled.to_string());
        }
        map
    }

    /// Whether no attribute is set.
    pub fn is_empty(&self) -> bool {
        self.token.is_none() && self.custom_user_data.is_none() && self.enabled.is_none()
    }
}

/// The SNS operations the notification client depends on.
#[async_trait]
pub trait SnsGateway: Send + Sync {
    /// Publish a message to a target arn.
    async fn publish(&self, request: PublishRequest) -> Result<PublishReceipt>;

    /// Register a device token, returning the endpoint arn.
    async fn create_platform_endpoint(&self, request: CreateEndpointRequest) -> Result<String>;

    /// Read endpoint attributes.
    async fn get_endpoint_attributes(&self, endpoint_arn: &str) -> Result<EndpointAttributes>;

    /// Overwrite the given endpoint attributes.
    async fn set_endpoint_attributes(
        &self,
        endpoint_arn: &str,
        attributes: EndpointAttributes,
    ) -> Result<()>;

    /// Delete an endpoint.
    async fn delete_endpoint(&self, endpoint_arn: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_from_map() {
        let map: HashMap<String, String> = [
            ("Token".to_string(), "tok".to_string()),
            ("Enabled".to_string(), "False".to_string()),
        ]
        .into_iter()
        .collect();

        let attrs = EndpointAttributes::from_map(&map);
        assert_eq!(attrs.token.as_deref(), Some("tok"));
        assert_eq!(attrs.custom_user_data, None);
        assert_eq!(attrs.enabled, Some(false));
    }

    #[test]
    fn test_attributes_to_map_skips_unset() {
        let attrs = EndpointAttributes {
            custom_user_data: Some("user-1".into()),
            enabled: Some(true),
            ..Default::default()
        };

        let map = attrs.to_map();
        assert_eq!(map.len(), 2);
        assert_eq!(map["CustomUserData"], "user-1");
        assert_eq!(map["Enabled"], "true");
        assert!(!map.contains_key("Token"));
    }

    #[test]
    fn test_publish_request_json() {
        let req = PublishRequest::json("arn:endpoint", "{}");
        assert_eq!(req.message_structure.as_deref(), Some("json"));
        assert!(EndpointAttributes::default().is_empty());
    }
}
