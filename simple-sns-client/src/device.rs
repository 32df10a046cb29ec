//! Device endpoint types.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use simple_sns_aws::Platform;

/// SNS endpoint arn identifying a registered device.
pub type DeviceArn = String;

/// A device token to register with SNS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRegistration {
    /// Platform type.
    pub platform: Platform,
    /// The device token or registration ID.
    pub token: String,
    /// Custom user data stored with the endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_data: Option<String>,
}

impl DeviceRegistration {
    /// Create a new registration.
    pub fn new(platform: Platform, token: impl Into<String>) -> Self {
        Self {
            platform,
            token: token.into(),
            user_data: None,
        }
    }

    /// Register an iOS device token.
    pub fn ios(token: impl Into<String>) -> Self {
        Self::new(Platform::Ios, token)
    }

    /// Register an Android device token.
    pub fn android(token: impl Into<String>) -> Self {
        Self::new(Platform::Android, token)
    }

    /// Set the custom user data.
    pub fn user_data(mut self, user_data: impl Into<String>) -> Self {
        self.user_data = Some(user_data.into());
        self
    }
}

/// Attribute changes for an existing endpoint. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceUpdate {
    /// Target endpoint.
    pub device_arn: DeviceArn,
    /// New device token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// New custom user data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_data: Option<String>,
    /// Enable or disable delivery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl DeviceUpdate {
    /// Start an update for an endpoint.
    pub fn new(device_arn: impl Into<DeviceArn>) -> Self {
        Self {
            device_arn: device_arn.into(),
            ..Default::default()
        }
    }

    /// Replace the device token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Replace the custom user data.
    pub fn user_data(mut self, user_data: impl Into<String>) -> Self {
        self.user_data = Some(user_data.into());
        self
    }

    /// Enable or disable the endpoint.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }
}

/// A registered device as reported by SNS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Endpoint arn.
    pub device_arn: DeviceArn,
    /// Device token.
    pub token: Option<String>,
    /// Custom user data.
    pub user_data: Option<String>,
    /// Whether SNS delivers to this endpoint.
    pub enabled: bool,
}

/// Target endpoints of a batch send.
///
/// Blank entries are dropped and duplicates keep their first position, so
/// every endpoint receives at most one publish.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceArns(Vec<DeviceArn>);

impl DeviceArns {
    /// Create from any list of arns.
    pub fn new<I, S>(arns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut unique: Vec<DeviceArn> = Vec::new();
        for arn in arns {
            let arn = arn.into();
            let arn = arn.trim();
            if !arn.is_empty() && seen.insert(arn.to_string()) {
                unique.push(arn.to_string());
            }
        }
        Self(unique)
    }

    /// Parse a whitespace-separated list of arns.
    pub fn parse(list: &str) -> Self {
        Self::new(list.split_whitespace())
    }

    /// Number of distinct arns.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there is no target.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the arns.
    pub fn iter(&self) -> std::slice::Iter<'_, DeviceArn> {
        self.0.iter()
    }
}

impl IntoIterator for DeviceArns {
    type Item = DeviceArn;
    type IntoIter = std::vec::IntoIter<DeviceArn>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<&str> for DeviceArns {
    fn from(list: &str) -> Self {
        Self::parse(list)
    }
}

impl From<String> for DeviceArns {
    fn from(list: String) -> Self {
        Self::parse(&list)
    }
}

impl From<Vec<String>> for DeviceArns {
    fn from(arns: Vec<String>) -> Self {
        Self::new(arns)
    }
}

impl From<&[String]> for DeviceArns {
    fn from(arns: &[String]) -> Self {
        Self::new(arns.iter().cloned())
    }
}

impl From<&[&str]> for DeviceArns {
    fn from(arns: &[&str]) -> Self {
        Self::new(arns.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for DeviceArns {
    fn from(arns: [&str; N]) -> Self {
        Self::new(arns)
    }
}
