//! In-memory SNS gateway for tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    AwsError, CODE_ENDPOINT_DISABLED, CODE_INVALID_PARAMETER, CODE_NOT_FOUND,
    CreateEndpointRequest, EndpointAttributes, PublishReceipt, PublishRequest, Result, SnsGateway,
};

/// Gateway operation, used to target injected failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOperation {
    /// `Publish`
    Publish,
    /// `CreatePlatformEndpoint`
    CreatePlatformEndpoint,
    /// `GetEndpointAttributes`
    GetEndpointAttributes,
    /// `SetEndpointAttributes`
    SetEndpointAttributes,
    /// `DeleteEndpoint`
    DeleteEndpoint,
}

impl MockOperation {
    fn name(self) -> &'static str {
        match self {
            Self::Publish => "Publish",
            Self::CreatePlatformEndpoint => "CreatePlatformEndpoint",
            Self::GetEndpointAttributes => "GetEndpointAttributes",
            Self::SetEndpointAttributes => "SetEndpointAttributes",
            Self::DeleteEndpoint => "DeleteEndpoint",
        }
    }
}

/// A recorded gateway call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    /// Publish with its request
    Publish(PublishRequest),
    /// Endpoint creation with its request
    CreatePlatformEndpoint(CreateEndpointRequest),
    /// Attribute lookup of an endpoint arn
    GetEndpointAttributes(String),
    /// Attribute update of an endpoint arn
    SetEndpointAttributes(String, EndpointAttributes),
    /// Deletion of an endpoint arn
    DeleteEndpoint(String),
}

impl GatewayCall {
    /// Operation of this call.
    pub fn operation(&self) -> MockOperation {
        match self {
            Self::Publish(_) => MockOperation::Publish,
            Self::CreatePlatformEndpoint(_) => MockOperation::CreatePlatformEndpoint,
            Self::GetEndpointAttributes(_) => MockOperation::GetEndpointAttributes,
            Self::SetEndpointAttributes(..) => MockOperation::SetEndpointAttributes,
            Self::DeleteEndpoint(_) => MockOperation::DeleteEndpoint,
        }
    }
}

#[derive(Default)]
struct State {
    endpoints: HashMap<String, Endpoint>,
    calls: Vec<GatewayCall>,
    operation_failures: HashMap<MockOperation, AwsError>,
    target_failures: HashMap<String, AwsError>,
    next_message_id: u64,
}

struct Endpoint {
    application_arn: String,
    attributes: EndpointAttributes,
}

/// In-memory [`SnsGateway`].
///
/// Endpoints live in a map keyed by arn. Publishing to an unknown arn fails
/// with `InvalidParameter` and to a disabled one with `EndpointDisabled`,
/// mirroring SNS.
#[derive(Clone, Default)]
pub struct MockGateway {
    state: Arc<Mutex<State>>,
}

impl MockGateway {
    /// Create an empty gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an enabled endpoint.
    pub fn with_endpoint(self, endpoint_arn: impl Into<String>, token: impl Into<String>) -> Self {
        self.insert_endpoint(
            endpoint_arn.into(),
            EndpointAttributes {
                token: Some(token.into()),
                custom_user_data: None,
                enabled: Some(true),
            },
        );
        self
    }

    /// Seed an endpoint with explicit attributes.
    pub fn insert_endpoint(&self, endpoint_arn: impl Into<String>, attributes: EndpointAttributes) {
        self.state.lock().endpoints.insert(
            endpoint_arn.into(),
            Endpoint {
                application_arn: String::new(),
                attributes,
            },
        );
    }

    /// Make every call of an operation fail with the given SNS error code.
    pub fn fail_operation(&self, operation: MockOperation, code: &str, message: &str) {
        self.state.lock().operation_failures.insert(
            operation,
            AwsError::service(operation.name(), Some(code), message),
        );
    }

    /// Make publishes to one target fail with the given SNS error code.
    pub fn fail_target(&self, target_arn: impl Into<String>, code: &str, message: &str) {
        self.state.lock().target_failures.insert(
            target_arn.into(),
            AwsError::service(MockOperation::Publish.name(), Some(code), message),
        );
    }

    /// Remove all injected failures.
    pub fn clear_failures(&self) {
        let mut state = self.state.lock();
        state.operation_failures.clear();
        state.target_failures.clear();
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.state.lock().calls.clone()
    }

    /// Number of recorded calls of an operation.
    pub fn call_count(&self, operation: MockOperation) -> usize {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|c| c.operation() == operation)
            .count()
    }

    /// Publish requests sent to one target.
    pub fn published_to(&self, target_arn: &str) -> Vec<PublishRequest> {
        self.state
            .lock()
            .calls
            .iter()
            .filter_map(|c| match c {
                GatewayCall::Publish(req) if req.target_arn == target_arn => Some(req.clone()),
                _ => None,
            })
            .collect()
    }

    /// Current attributes of an endpoint.
    pub fn endpoint(&self, endpoint_arn: &str) -> Option<EndpointAttributes> {
        self.state
            .lock()
            .endpoints
            .get(endpoint_arn)
            .map(|e| e.attributes.clone())
    }

    /// Number of stored endpoints.
    pub fn endpoint_count(&self) -> usize {
        self.state.lock().endpoints.len()
    }

    fn record(&self, call: GatewayCall) -> Result<()> {
        let mut state = self.state.lock();
        let operation = call.operation();
        state.calls.push(call);
        match state.operation_failures.get(&operation) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

fn not_found(operation: MockOperation) -> AwsError {
    AwsError::service(operation.name(), Some(CODE_NOT_FOUND), "Endpoint does not exist")
}

fn endpoint_arn_for(application_arn: &str) -> String {
    let base = application_arn.replacen(":app/", ":endpoint/", 1);
    format!("{}/{}", base, uuid::Uuid::new_v4())
}

#[async_trait]
impl SnsGateway for MockGateway {
    async fn publish(&self, request: PublishRequest) -> Result<PublishReceipt> {
        self.record(GatewayCall::Publish(request.clone()))?;

        let mut state = self.state.lock();
        if let Some(err) = state.target_failures.get(&request.target_arn) {
            return Err(err.clone());
        }

        let enabled = state
            .endpoints
            .get(&request.target_arn)
            .map(|e| e.attributes.enabled != Some(false));

        match enabled {
            None => Err(AwsError::service(
                MockOperation::Publish.name(),
                Some(CODE_INVALID_PARAMETER),
                "Invalid parameter: TargetArn",
            )),
            Some(false) => Err(AwsError::service(
                MockOperation::Publish.name(),
                Some(CODE_ENDPOINT_DISABLED),
                "Endpoint is disabled",
            )),
            Some(true) => {
                state.next_message_id += 1;
                Ok(PublishReceipt {
                    message_id: Some(format!("msg-{}", state.next_message_id)),
                })
            }
        }
    }

    async fn create_platform_endpoint(&self, request: CreateEndpointRequest) -> Result<String> {
        self.record(GatewayCall::CreatePlatformEndpoint(request.clone()))?;

        let mut state = self.state.lock();
        let existing = state.endpoints.iter().find_map(|(arn, e)| {
            (e.application_arn == request.platform_application_arn
                && e.attributes.token.as_deref() == Some(request.token.as_str()))
            .then(|| arn.clone())
        });
        if let Some(arn) = existing {
            return Ok(arn);
        }

        let arn = endpoint_arn_for(&request.platform_application_arn);
        state.endpoints.insert(
            arn.clone(),
            Endpoint {
                application_arn: request.platform_application_arn,
                attributes: EndpointAttributes {
                    token: Some(request.token),
                    custom_user_data: request.custom_user_data,
                    enabled: Some(true),
                },
            },
        );
        Ok(arn)
    }

    async fn get_endpoint_attributes(&self, endpoint_arn: &str) -> Result<EndpointAttributes> {
        self.record(GatewayCall::GetEndpointAttributes(endpoint_arn.to_string()))?;

        self.state
            .lock()
            .endpoints
            .get(endpoint_arn)
            .map(|e| e.attributes.clone())
            .ok_or_else(|| not_found(MockOperation::GetEndpointAttributes))
    }

    async fn set_endpoint_attributes(
        &self,
        endpoint_arn: &str,
        attributes: EndpointAttributes,
    ) -> Result<()> {
        self.record(GatewayCall::SetEndpointAttributes(
            endpoint_arn.to_string(),
            attributes.clone(),
        ))?;

        let mut state = self.state.lock();
        let endpoint = state
            .endpoints
            .get_mut(endpoint_arn)
            .ok_or_else(|| not_found(MockOperation::SetEndpointAttributes))?;

        let current = &mut endpoint.attributes;
        if attributes.token.is_some() {
            current.token = attributes.token;
        }
        if attributes.custom_user_data.is_some() {
            current.custom_user_data = attributes.custom_user_data;
        }
        if attributes.enabled.is_some() {
            current.enabled = attributes.enabled;
        }
        Ok(())
    }

    async fn delete_endpoint(&self, endpoint_arn: &str) -> Result<()> {
        self.record(GatewayCall::DeleteEndpoint(endpoint_arn.to_string()))?;

        // SNS treats deleting a missing endpoint as success.
        self.state.lock().endpoints.remove(endpoint_arn);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const APP_ARN: &str = "arn:aws:sns:ap-northeast-1:000000000000:app/GCM/test-android";

    fn create_request(token: &str) -> CreateEndpointRequest {
        CreateEndpointRequest {
            platform_application_arn: APP_ARN.to_string(),
            token: token.to_string(),
            custom_user_data: None,
        }
    }

    #[tokio::test]
    async fn test_create_is_idempotent_per_token() {
        let gateway = MockGateway::new();

        let first = gateway.create_platform_endpoint(create_request("tok")).await.unwrap();
        let again = gateway.create_platform_endpoint(create_request("tok")).await.unwrap();
        let other = gateway.create_platform_endpoint(create_request("tok-2")).await.unwrap();

        assert_eq!(first, again);
        assert_ne!(first, other);
        assert!(first.starts_with("arn:aws:sns:ap-northeast-1:000000000000:endpoint/GCM/test-android/"));
        assert_eq!(gateway.endpoint_count(), 2);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let gateway = MockGateway::new();
        let handle = gateway.clone();

        let arn = handle.create_platform_endpoint(create_request("tok")).await.unwrap();
        handle.publish(PublishRequest::json(arn.as_str(), "{}")).await.unwrap();

        assert_eq!(gateway.endpoint_count(), 1);
        assert_eq!(gateway.published_to(&arn).len(), 1);
        assert_eq!(gateway.call_count(MockOperation::Publish), 1);
    }

    #[tokio::test]
    async fn test_publish_outcomes() {
        let gateway = MockGateway::new().with_endpoint("arn:ok", "tok");
        gateway.insert_endpoint(
            "arn:disabled",
            EndpointAttributes {
                enabled: Some(false),
                ..Default::default()
            },
        );

        let receipt = gateway.publish(PublishRequest::json("arn:ok", "{}")).await.unwrap();
        assert_eq!(receipt.message_id.as_deref(), Some("msg-1"));

        let err = gateway
            .publish(PublishRequest::json("arn:disabled", "{}"))
            .await
            .unwrap_err();
        assert!(err.is_endpoint_disabled());

        let err = gateway
            .publish(PublishRequest::json("arn:missing", "{}"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), Some(CODE_INVALID_PARAMETER));

        assert_eq!(gateway.call_count(MockOperation::Publish), 3);
        assert_eq!(gateway.published_to("arn:ok").len(), 1);
    }

    #[tokio::test]
    async fn test_injected_failures() {
        let gateway = MockGateway::new().with_endpoint("arn:ok", "tok");
        gateway.fail_operation(MockOperation::DeleteEndpoint, "AuthorizationError", "denied");
        gateway.fail_target("arn:ok", "Throttling", "slow down");

        assert!(gateway.delete_endpoint("arn:ok").await.is_err());
        let err = gateway.publish(PublishRequest::json("arn:ok", "{}")).await.unwrap_err();
        assert!(err.is_throttled());

        gateway.clear_failures();
        assert!(gateway.publish(PublishRequest::json("arn:ok", "{}")).await.is_ok());
        assert!(gateway.delete_endpoint("arn:ok").await.is_ok());
        assert!(gateway.endpoint("arn:ok").is_none());
    }

    #[tokio::test]
    async fn test_set_attributes_merges() {
        let gateway = MockGateway::new().with_endpoint("arn:ok", "tok");

        gateway
            .set_endpoint_attributes(
                "arn:ok",
                EndpointAttributes {
                    custom_user_data: Some("user-9".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let attrs = gateway.endpoint("arn:ok").unwrap();
        assert_eq!(attrs.token.as_deref(), Some("tok"));
        assert_eq!(attrs.custom_user_data.as_deref(), Some("user-9"));

        let err = gateway
            .get_endpoint_attributes("arn:missing")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
