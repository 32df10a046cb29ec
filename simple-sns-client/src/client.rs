//! Notification client.

use futures::stream::{self, StreamExt};
use simple_sns_aws::{
    AwsError, AwsSnsGateway, CreateEndpointRequest, EndpointAttributes, PublishReceipt,
    PublishRequest, SnsConfig, SnsGateway,
};
use simple_sns_payload::{Notification, Payload, build_payload};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::{
    DeliveryOutcome, DeliveryReport, Device, DeviceArn, DeviceArns, DeviceRegistration,
    DeviceUpdate, PushError, Result,
};

/// Registers devices with SNS and publishes notifications to them.
///
/// The client only holds configuration and a shared gateway, so it can be
/// cloned and used from many tasks at once.
#[derive(Clone)]
pub struct NotificationClient {
    config: SnsConfig,
    gateway: Arc<dyn SnsGateway>,
}

impl NotificationClient {
    /// Create a client over any gateway.
    pub fn new(config: SnsConfig, gateway: impl SnsGateway + 'static) -> Self {
        Self::with_gateway(config, Arc::new(gateway))
    }

    /// Create a client over a shared gateway.
    pub fn with_gateway(config: SnsConfig, gateway: Arc<dyn SnsGateway>) -> Self {
        Self { config, gateway }
    }

    /// Create a client talking to Amazon SNS.
    pub async fn connect(config: SnsConfig) -> simple_sns_aws::Result<Self> {
        let gateway = AwsSnsGateway::new(&config).await?;
        Ok(Self::new(config, gateway))
    }

    /// The client configuration.
    pub fn config(&self) -> &SnsConfig {
        &self.config
    }

    /// Register a device token and return its endpoint arn.
    pub async fn register_device(&self, registration: DeviceRegistration) -> Result<DeviceArn> {
        let platform = registration.platform;
        let application_arn = self
            .config
            .application_arn(platform)
            .ok_or_else(|| {
                PushError::Registration(AwsError::Config(format!(
                    "No platform application arn configured for {platform}"
                )))
            })?
            .to_string();

        let start = Instant::now();
        let result = self
            .gateway
            .create_platform_endpoint(CreateEndpointRequest {
                platform_application_arn: application_arn,
                token: registration.token,
                custom_user_data: registration.user_data,
            })
            .await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(device_arn) => {
                debug!(%platform, device_arn = %device_arn, elapsed_ms, "Device registered");
                Ok(device_arn)
            }
            Err(e) => {
                warn!(%platform, error = %e, elapsed_ms, "Device registration failed");
                Err(PushError::Registration(e))
            }
        }
    }

    /// Update the attributes of a registered device.
    ///
    /// An update that sets nothing returns without calling SNS.
    pub async fn update_device(&self, update: DeviceUpdate) -> Result<()> {
        let attributes = EndpointAttributes {
            token: update.token,
            custom_user_data: update.user_data,
            enabled: update.enabled,
        };

        if attributes.is_empty() {
            debug!(device_arn = %update.device_arn, "Nothing to update");
            return Ok(());
        }

        let start = Instant::now();
        let result = self
            .gateway
            .set_endpoint_attributes(&update.device_arn, attributes)
            .await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(()) => {
                debug!(device_arn = %update.device_arn, elapsed_ms, "Device updated");
                Ok(())
            }
            Err(source) => Err(PushError::Update {
                device_arn: update.device_arn,
                source,
            }),
        }
    }

    /// Look up a registered device.
    pub async fn get_device(&self, device_arn: &str) -> Result<Device> {
        let start = Instant::now();
        let result = self.gateway.get_endpoint_attributes(device_arn).await;
        debug!(
            device_arn,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Device lookup finished"
        );

        match result {
            Ok(attributes) => Ok(Device {
                device_arn: device_arn.to_string(),
                token: attributes.token,
                user_data: attributes.custom_user_data,
                enabled: attributes.enabled.unwrap_or(false),
            }),
            Err(source) if source.is_not_found() => Err(PushError::NotFound {
                device_arn: device_arn.to_string(),
                source,
            }),
            Err(source) => Err(PushError::Lookup {
                device_arn: device_arn.to_string(),
                source,
            }),
        }
    }

    /// Delete a registered device.
    pub async fn remove_device(&self, device_arn: &str) -> Result<()> {
        let start = Instant::now();
        let result = self.gateway.delete_endpoint(device_arn).await;
        debug!(
            device_arn,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Device removal finished"
        );

        result.map_err(|source| PushError::Removal {
            device_arn: device_arn.to_string(),
            source,
        })
    }

    /// Publish a pre-built payload to one device.
    pub async fn publish(&self, payload: &Payload, device_arn: &str) -> Result<PublishReceipt> {
        let start = Instant::now();
        let result = self
            .gateway
            .publish(PublishRequest::json(device_arn, payload.as_str()))
            .await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(receipt) => {
                debug!(
                    device_arn,
                    message_id = ?receipt.message_id,
                    payload_len = payload.len(),
                    elapsed_ms,
                    "Notification published"
                );
                Ok(receipt)
            }
            Err(source) => {
                warn!(device_arn, error = %source, elapsed_ms, "Notification publish failed");
                Err(PushError::Delivery {
                    device_arn: device_arn.to_string(),
                    source,
                })
            }
        }
    }

    /// Build the payload for a notification and publish it to one device.
    pub async fn send(
        &self,
        notification: &Notification,
        device_arn: &str,
    ) -> Result<PublishReceipt> {
        self.publish(&build_payload(notification), device_arn).await
    }

    /// Send one notification to many devices.
    ///
    /// The payload is built once. Each device gets its own publish, run
    /// concurrently up to `max_concurrent_publishes`, and a failure is only
    /// recorded against that device.
    pub async fn send_to_many(
        &self,
        notification: &Notification,
        device_arns: impl Into<DeviceArns>,
    ) -> DeliveryReport {
        let targets = device_arns.into();
        let target_count = targets.len();
        let payload = build_payload(notification);
        let limit = self.config.max_concurrent_publishes.max(1);
        let start = Instant::now();

        let outcomes: Vec<(DeviceArn, DeliveryOutcome)> = stream::iter(targets)
            .map(|device_arn| {
                let payload = &payload;
                async move {
                    let outcome = DeliveryOutcome::from(self.publish(payload, &device_arn).await);
                    (device_arn, outcome)
                }
            })
            .buffer_unordered(limit)
            .collect()
            .await;

        let report: DeliveryReport = outcomes.into_iter().collect();
        let failed = report.failed().count();

        info!(
            targets = target_count,
            delivered = target_count - failed,
            failed,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Batch send finished"
        );

        report
    }
}

impl std::fmt::Debug for NotificationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simple_sns_aws::mock::{GatewayCall, MockGateway, MockOperation};
    use simple_sns_aws::{ApplicationArnMap, CODE_NOT_FOUND, Platform};
    use tokio_test::{assert_err, assert_ok};

    const IOS_APP: &str = "arn:aws:sns:ap-northeast-1:000000000000:app/APNS_SANDBOX/test-ios";
    const ANDROID_APP: &str = "arn:aws:sns:ap-northeast-1:000000000000:app/GCM/test-android";

    fn config() -> SnsConfig {
        SnsConfig::new(ApplicationArnMap::new(IOS_APP, ANDROID_APP))
    }

    fn client(gateway: &MockGateway) -> NotificationClient {
        NotificationClient::new(config(), gateway.clone())
    }

    #[tokio::test]
    async fn test_register_device_uses_platform_application() {
        let gateway = MockGateway::new();
        let client = client(&gateway);

        let arn = client
            .register_device(DeviceRegistration::android("tok").user_data("user-1"))
            .await
            .unwrap();

        assert!(arn.contains(":endpoint/GCM/test-android/"));
        match &gateway.calls()[0] {
            GatewayCall::CreatePlatformEndpoint(req) => {
                assert_eq!(req.platform_application_arn, ANDROID_APP);
                assert_eq!(req.token, "tok");
                assert_eq!(req.custom_user_data.as_deref(), Some("user-1"));
            }
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_register_device_failure_is_not_retried() {
        let gateway = MockGateway::new();
        gateway.fail_operation(
            MockOperation::CreatePlatformEndpoint,
            "InvalidParameter",
            "Invalid parameter: Token",
        );
        let client = client(&gateway);

        let err = client
            .register_device(DeviceRegistration::ios("tok"))
            .await
            .unwrap_err();

        assert!(matches!(err, PushError::Registration(_)));
        assert_eq!(gateway.call_count(MockOperation::CreatePlatformEndpoint), 1);
    }

    #[tokio::test]
    async fn test_register_device_without_application_arn() {
        let gateway = MockGateway::new();
        let config = SnsConfig::builder().ios_application_arn(IOS_APP).build();
        let client = NotificationClient::new(config, gateway.clone());

        let err = client
            .register_device(DeviceRegistration::new(Platform::Android, "tok"))
            .await
            .unwrap_err();

        assert!(matches!(err, PushError::Registration(AwsError::Config(_))));
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_update_device_sets_only_given_attributes() {
        let gateway = MockGateway::new().with_endpoint("arn:dev", "old");
        let client = client(&gateway);

        assert_ok!(
            client
                .update_device(DeviceUpdate::new("arn:dev").user_data("user-2"))
                .await
        );

        let attrs = gateway.endpoint("arn:dev").unwrap();
        assert_eq!(attrs.token.as_deref(), Some("old"));
        assert_eq!(attrs.custom_user_data.as_deref(), Some("user-2"));
    }

    #[tokio::test]
    async fn test_empty_update_skips_gateway() {
        let gateway = MockGateway::new();
        let client = client(&gateway);

        assert_ok!(client.update_device(DeviceUpdate::new("arn:dev")).await);
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_device() {
        let gateway = MockGateway::new();
        let client = client(&gateway);

        let err = client
            .update_device(DeviceUpdate::new("arn:gone").token("t"))
            .await
            .unwrap_err();
        assert!(matches!(err, PushError::Update { .. }));
        assert_eq!(err.device_arn(), Some("arn:gone"));
    }

    #[tokio::test]
    async fn test_get_device() {
        let gateway = MockGateway::new().with_endpoint("arn:dev", "tok");
        let client = client(&gateway);

        let device = client.get_device("arn:dev").await.unwrap();
        assert_eq!(
            device,
            Device {
                device_arn: "arn:dev".into(),
                token: Some("tok".into()),
                user_data: None,
                enabled: true,
            }
        );
    }

    #[tokio::test]
    async fn test_get_device_not_found_vs_other_errors() {
        let gateway = MockGateway::new();
        let client = client(&gateway);

        let err = client.get_device("arn:missing").await.unwrap_err();
        assert!(matches!(err, PushError::NotFound { .. }));
        assert_eq!(err.remote().code(), Some(CODE_NOT_FOUND));

        gateway.fail_operation(MockOperation::GetEndpointAttributes, "AuthorizationError", "denied");
        let err = client.get_device("arn:missing").await.unwrap_err();
        assert!(matches!(err, PushError::Lookup { .. }));
    }

    #[tokio::test]
    async fn test_remove_device() {
        let gateway = MockGateway::new().with_endpoint("arn:dev", "tok");
        let client = client(&gateway);

        assert_ok!(client.remove_device("arn:dev").await);
        assert_eq!(gateway.endpoint_count(), 0);

        gateway.fail_operation(MockOperation::DeleteEndpoint, "AuthorizationError", "denied");
        let err = assert_err!(client.remove_device("arn:dev").await);
        assert!(matches!(err, PushError::Removal { .. }));
    }

    #[tokio::test]
    async fn test_publish_forwards_payload_as_json_structure() {
        let gateway = MockGateway::new().with_endpoint("arn:dev", "tok");
        let client = client(&gateway);
        let payload = build_payload(&Notification::new("m", "a"));

        let receipt = client.publish(&payload, "arn:dev").await.unwrap();
        assert!(receipt.message_id.is_some());

        let sent = gateway.published_to("arn:dev");
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].message, payload.as_str());
        assert_eq!(sent[0].message_structure.as_deref(), Some("json"));
    }

    #[tokio::test]
    async fn test_send_to_many_isolates_failures() {
        let gateway = MockGateway::new().with_endpoint("arn:valid", "tok");
        let client = client(&gateway);

        let report = client
            .send_to_many(&Notification::new("m", "a"), ["arn:valid", "arn:invalid"])
            .await;

        assert_eq!(report.len(), 2);
        assert!(report.get("arn:valid").unwrap().is_delivered());
        let err = report.get("arn:invalid").unwrap().error().unwrap();
        assert!(matches!(err, PushError::Delivery { .. }));
        assert_eq!(gateway.published_to("arn:valid").len(), 1);
    }

    #[tokio::test]
    async fn test_send_to_many_publishes_once_per_distinct_device() {
        let gateway = MockGateway::new()
            .with_endpoint("arn:a", "ta")
            .with_endpoint("arn:b", "tb");
        let client = client(&gateway);

        let report = client
            .send_to_many(&Notification::new("m", "a"), "arn:a arn:b arn:a")
            .await;

        assert!(report.all_delivered());
        assert_eq!(gateway.call_count(MockOperation::Publish), 2);
    }

    #[tokio::test]
    async fn test_send_to_many_with_no_targets() {
        let gateway = MockGateway::new();
        let client = client(&gateway);

        let report = client.send_to_many(&Notification::new("m", "a"), "").await;
        assert!(report.is_empty());
        assert!(gateway.calls().is_empty());
    }
}
