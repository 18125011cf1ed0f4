//! Service clients shared by every gateway.
//!
//! Lambda handlers build one [`Clients`] per execution environment and hand out
//! gateways from it; the SDK clients are cheap to clone.

use crate::{
    blob::BlobGateway,
    messaging::{queue::QueueGateway, topic::TopicGateway},
    storage::StorageGateway,
};

use aws_config::{BehaviorVersion, SdkConfig};

/// The four SDK clients, configured from one [`SdkConfig`].
///
/// ```rust,no_run
/// use aws_lambda_kit::clients::Clients;
///
/// # async fn example() {
/// let clients = Clients::from_env().await;
/// let storage = clients.storage();
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Clients {
    /// DynamoDB client.
    pub dynamodb: aws_sdk_dynamodb::Client,
    /// S3 client.
    pub s3: aws_sdk_s3::Client,
    /// SQS client.
    pub sqs: aws_sdk_sqs::Client,
    /// SNS client.
    pub sns: aws_sdk_sns::Client,
}

impl Clients {
    /// Builds every client from `config`.
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            dynamodb: aws_sdk_dynamodb::Client::new(config),
            s3: aws_sdk_s3::Client::new(config),
            sqs: aws_sdk_sqs::Client::new(config),
            sns: aws_sdk_sns::Client::new(config),
        }
    }

    /// Loads the standard AWS environment (region, credentials, endpoint
    /// overrides) and builds every client from it.
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        #[cfg(feature = "tracing")]
        tracing::debug!(region = ?config.region(), "loaded aws configuration");
        Self::new(&config)
    }

    /// DynamoDB gateway.
    pub fn storage(&self) -> StorageGateway {
        StorageGateway::new(self.dynamodb.clone())
    }

    /// S3 gateway.
    pub fn blobs(&self) -> BlobGateway {
        BlobGateway::new(self.s3.clone())
    }

    /// SQS gateway.
    pub fn queue(&self) -> QueueGateway {
        QueueGateway::new(self.sqs.clone())
    }

    /// SNS gateway.
    pub fn topic(&self) -> TopicGateway {
        TopicGateway::new(self.sns.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use aws_config::Region;

    #[test]
    fn test_clients_share_region() {
        let config = SdkConfig::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("eu-west-1"))
            .build();
        let clients = Clients::new(&config);
        let expected = Some(&Region::new("eu-west-1"));
        assert_eq!(clients.dynamodb.config().region(), expected);
        assert_eq!(clients.s3.config().region(), expected);
        assert_eq!(clients.sqs.config().region(), expected);
        assert_eq!(clients.sns.config().region(), expected);
        assert_eq!(clients.storage().store().config().region(), expected);
    }
}
