//! SNS client configuration.

use serde::{Deserialize, Serialize};

use crate::Platform;

/// Region used when none is configured.
pub const DEFAULT_REGION: &str = "ap-northeast-1";

/// Default upper bound on in-flight publishes for one batch.
pub const DEFAULT_MAX_CONCURRENT_PUBLISHES: usize = 16;

/// Credentials source for AWS authentication.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialsSource {
    /// Use environment variables (AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY).
    Environment,
    /// Use AWS profile from ~/.aws/credentials.
    Profile(String),
    /// Use explicit credentials.
    Explicit {
        access_key_id: String,
        secret_access_key: String,
        session_token: Option<String>,
    },
    /// Auto-detect credentials (default AWS SDK behavior).
    #[default]
    Auto,
}

/// Platform application arns, one per supported platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationArnMap {
    /// APNS (or APNS_SANDBOX) platform application arn.
    #[serde(default)]
    pub ios: String,
    /// GCM/FCM platform application arn.
    #[serde(default)]
    pub android: String,
}

impl ApplicationArnMap {
    /// Create a map from both arns.
    pub fn new(ios: impl Into<String>, android: impl Into<String>) -> Self {
        Self {
            ios: ios.into(),
            android: android.into(),
        }
    }

    /// Platform application arn for a platform, if configured.
    pub fn get(&self, platform: Platform) -> Option<&str> {
        let arn = match platform {
            Platform::Ios => &self.ios,
            Platform::Android => &self.android,
        };
        if arn.is_empty() { None } else { Some(arn) }
    }
}

/// SNS client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnsConfig {
    /// Platform application arns.
    #[serde(default)]
    pub application_arn_map: ApplicationArnMap,
    /// AWS region.
    #[serde(default = "default_region")]
    pub region: String,
    /// Credentials source.
    #[serde(default)]
    pub credentials: CredentialsSource,
    /// Custom endpoint URL (for LocalStack).
    #[serde(default)]
    pub endpoint_url: Option<String>,
    /// Maximum publishes in flight during a batch send.
    #[serde(default = "default_max_concurrent_publishes")]
    pub max_concurrent_publishes: usize,
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_max_concurrent_publishes() -> usize {
    DEFAULT_MAX_CONCURRENT_PUBLISHES
}

impl Default for SnsConfig {
    fn default() -> Self {
        Self {
            application_arn_map: ApplicationArnMap::default(),
            region: default_region(),
            credentials: CredentialsSource::Auto,
            endpoint_url: None,
            max_concurrent_publishes: DEFAULT_MAX_CONCURRENT_PUBLISHES,
        }
    }
}

impl SnsConfig {
    /// Create a configuration for the given platform applications.
    pub fn new(application_arn_map: ApplicationArnMap) -> Self {
        Self {
            application_arn_map,
            ..Self::default()
        }
    }

    /// Create a builder.
    pub fn builder() -> SnsConfigBuilder {
        SnsConfigBuilder::new()
    }

    /// Load configuration from environment variables.
    ///
    /// Reads `SIMPLE_SNS_REGION` (falling back to `AWS_REGION` and
    /// `AWS_DEFAULT_REGION`), `SIMPLE_SNS_IOS_APP_ARN`,
    /// `SIMPLE_SNS_ANDROID_APP_ARN` and `AWS_ENDPOINT_URL`.
    pub fn from_env() -> SnsConfigBuilder {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> SnsConfigBuilder
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = SnsConfigBuilder::new();

        let region = ["SIMPLE_SNS_REGION", "AWS_REGION", "AWS_DEFAULT_REGION"]
            .into_iter()
            .find_map(|key| lookup(key).filter(|v| !v.is_empty()));
        if let Some(region) = region {
            builder = builder.region(region);
        }

        if let Some(arn) = lookup("SIMPLE_SNS_IOS_APP_ARN") {
            builder = builder.ios_application_arn(arn);
        }

        if let Some(arn) = lookup("SIMPLE_SNS_ANDROID_APP_ARN") {
            builder = builder.android_application_arn(arn);
        }

        if let Some(endpoint) = lookup("AWS_ENDPOINT_URL") {
            builder = builder.endpoint_url(endpoint);
        }

        builder
    }

    /// Platform application arn for a platform, if configured.
    pub fn application_arn(&self, platform: Platform) -> Option<&str> {
        self.application_arn_map.get(platform)
    }
}

/// Builder for SNS configuration.
#[derive(Default)]
pub struct SnsConfigBuilder {
    config: SnsConfig,
}

impl SnsConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both platform application arns.
    pub fn application_arn_map(mut self, map: ApplicationArnMap) -> Self {
        self.config.application_arn_map = map;
        self
    }

    /// Set the iOS platform application arn.
    pub fn ios_application_arn(mut self, arn: impl Into<String>) -> Self {
        self.config.application_arn_map.ios = arn.into();
        self
    }

    /// Set the Android platform application arn.
    pub fn android_application_arn(mut self, arn: impl Into<String>) -> Self {
        self.config.application_arn_map.android = arn.into();
        self
    }

    /// Set the AWS region.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.config.region = region.into();
        self
    }

    /// Set the credentials source.
    pub fn credentials(mut self, credentials: CredentialsSource) -> Self {
        self.config.credentials = credentials;
        self
    }

    /// Use explicit credentials.
    pub fn explicit_credentials(
        mut self,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        self.config.credentials = CredentialsSource::Explicit {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: None,
        };
        self
    }

    /// Use a named profile.
    pub fn profile(mut self, profile: impl Into<String>) -> Self {
        self.config.credentials = CredentialsSource::Profile(profile.into());
        self
    }

    /// Set a custom endpoint URL.
    pub fn endpoint_url(mut self, url: impl Into<String>) -> Self {
        self.config.endpoint_url = Some(url.into());
        self
    }

    /// Configure for LocalStack.
    pub fn localstack(self) -> Self {
        self.endpoint_url("http://localhost:4566")
    }

    /// Bound the number of concurrent publishes in a batch. Zero is treated as one.
    pub fn max_concurrent_publishes(mut self, limit: usize) -> Self {
        self.config.max_concurrent_publishes = limit.max(1);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> SnsConfig {
        self.config
    }
}
