//! Shared AWS SDK configuration for the object-store and kv-table sinks

use aws_config::{retry::RetryConfig, BehaviorVersion, Region, SdkConfig};
use aws_credential_types::Credentials;
use tracing::debug;

use crate::config::AwsConfig;

/// Build an `SdkConfig` from [`AwsConfig`]
///
/// Static keys win over the default credential chain. SDK retries are
/// disabled so a failed write surfaces on the first attempt.
pub async fn load_sdk_config(aws: &AwsConfig) -> SdkConfig {
    debug!(?aws, "Loading AWS SDK configuration");

    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(aws.region.clone()))
        .retry_config(RetryConfig::disabled());

    if let Some(endpoint) = &aws.endpoint {
        loader = loader.endpoint_url(endpoint);
    }

    if let (Some(access_key), Some(secret_key)) = (&aws.access_key, &aws.secret_key) {
        loader = loader.credentials_provider(Credentials::new(
            access_key,
            secret_key,
            None,
            None,
            "medpipe-static",
        ));
    }

    loader.load().await
}
