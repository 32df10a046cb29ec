//! Amazon SNS gateway backed by the AWS SDK.

use async_trait::async_trait;
use aws_sdk_sns::Client;
use aws_sdk_sns::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use tracing::{debug, info};

use crate::{
    AwsError, CreateEndpointRequest, CredentialsSource, EndpointAttributes, PublishReceipt,
    PublishRequest, Result, SnsConfig, SnsGateway,
};

/// SNS gateway using `aws_sdk_sns`.
#[derive(Debug, Clone)]
pub struct AwsSnsGateway {
    client: Client,
}

impl AwsSnsGateway {
    /// Load AWS configuration and create the SNS client.
    pub async fn new(config: &SnsConfig) -> Result<Self> {
        let sdk_config = build_sdk_config(config).await?;

        info!(
            region = ?sdk_config.region(),
            endpoint_url = ?config.endpoint_url,
            "SNS client initialized"
        );

        Ok(Self::from_sdk_config(&sdk_config))
    }

    /// Create from an already loaded SDK configuration.
    pub fn from_sdk_config(sdk_config: &aws_types::SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }

    /// Create from an existing AWS SDK client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// The underlying SDK client.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

/// Build AWS SDK configuration.
async fn build_sdk_config(config: &SnsConfig) -> Result<aws_types::SdkConfig> {
    if config.region.trim().is_empty() {
        return Err(AwsError::Config("AWS region must not be empty".to_string()));
    }

    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()));

    match &config.credentials {
        CredentialsSource::Environment => {
            loader = loader.credentials_provider(
                aws_config::environment::EnvironmentVariableCredentialsProvider::new(),
            );
        }
        CredentialsSource::Profile(profile) => {
            loader = loader.profile_name(profile);
        }
        CredentialsSource::Explicit {
            access_key_id,
            secret_access_key,
            session_token,
        } => {
            let creds = aws_credential_types::Credentials::new(
                access_key_id,
                secret_access_key,
                session_token.clone(),
                None,
                "simple-sns",
            );
            loader = loader.credentials_provider(creds);
        }
        CredentialsSource::Auto => {}
    }

    if let Some(endpoint) = &config.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }

    Ok(loader.load().await)
}

fn service_error<E, R>(operation: &'static str, err: SdkError<E, R>) -> AwsError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug + 'static,
{
    let code = err.code().map(str::to_string);
    let message = err
        .message()
        .map(str::to_string)
        .unwrap_or_else(|| DisplayErrorContext(&err).to_string());
    AwsError::Service {
        operation,
        code,
        message,
    }
}

#[async_trait]
impl SnsGateway for AwsSnsGateway {
    async fn publish(&self, request: PublishRequest) -> Result<PublishReceipt> {
        debug!(target_arn = %request.target_arn, "SNS Publish");

        let output = self
            .client
            .publish()
            .target_arn(request.target_arn)
            .message(request.message)
            .set_message_structure(request.message_structure)
            .send()
            .await
            .map_err(|e| service_error("Publish", e))?;

        Ok(PublishReceipt {
            message_id: output.message_id().map(str::to_string),
        })
    }

    async fn create_platform_endpoint(&self, request: CreateEndpointRequest) -> Result<String> {
        debug!(
            platform_application_arn = %request.platform_application_arn,
            "SNS CreatePlatformEndpoint"
        );

        let output = self
            .client
            .create_platform_endpoint()
            .platform_application_arn(request.platform_application_arn)
            .token(request.token)
            .set_custom_user_data(request.custom_user_data)
            .send()
            .await
            .map_err(|e| service_error("CreatePlatformEndpoint", e))?;

        output
            .endpoint_arn()
            .map(str::to_string)
            .ok_or(AwsError::MissingField {
                operation: "CreatePlatformEndpoint",
                field: "EndpointArn",
            })
    }

    async fn get_endpoint_attributes(&self, endpoint_arn: &str) -> Result<EndpointAttributes> {
        debug!(endpoint_arn, "SNS GetEndpointAttributes");

        let output = self
            .client
            .get_endpoint_attributes()
            .endpoint_arn(endpoint_arn)
            .send()
            .await
            .map_err(|e| service_error("GetEndpointAttributes", e))?;

        Ok(output
            .attributes()
            .map(EndpointAttributes::from_map)
            .unwrap_or_default())
    }

    async fn set_endpoint_attributes(
        &self,
        endpoint_arn: &str,
        attributes: EndpointAttributes,
    ) -> Result<()> {
        debug!(endpoint_arn, "SNS SetEndpointAttributes");

        self.client
            .set_endpoint_attributes()
            .endpoint_arn(endpoint_arn)
            .set_attributes(Some(attributes.to_map()))
            .send()
            .await
            .map_err(|e| service_error("SetEndpointAttributes", e))?;

        Ok(())
    }

    async fn delete_endpoint(&self, endpoint_arn: &str) -> Result<()> {
        debug!(endpoint_arn, "SNS DeleteEndpoint");

        self.client
            .delete_endpoint()
            .endpoint_arn(endpoint_arn)
            .send()
            .await
            .map_err(|e| service_error("DeleteEndpoint", e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_region_is_rejected() {
        let config = SnsConfig::builder().region(" ").build();
        let err = build_sdk_config(&config).await.unwrap_err();
        assert!(matches!(err, AwsError::Config(_)));
    }

    #[tokio::test]
    async fn test_gateway_uses_configured_region() {
        let config = SnsConfig::builder()
            .region("eu-central-1")
            .explicit_credentials("AKIDEXAMPLE", "secret")
            .localstack()
            .build();

        let gateway = AwsSnsGateway::new(&config).await.unwrap();
        assert_eq!(
            gateway.client().config().region().map(|r| r.as_ref()),
            Some("eu-central-1")
        );
    }
}
