use crate::error::{Error, Result};

use async_trait::async_trait;
use aws_sdk_sns::Client;
use serde::Serialize;

/// Resolved publish request, as handed to a [`TopicPublisher`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PublishInput {
    /// The JSON-encoded item.
    pub message: String,
    /// Target topic.
    pub topic_arn: String,
}

/// Publish operation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Publish<T> {
    /// The item, JSON-encoded as the message.
    pub item: T,
    /// Target topic.
    pub topic_arn: String,
}

impl<T: Serialize> TryFrom<Publish<T>> for PublishInput {
    type Error = Error;

    fn try_from(publish: Publish<T>) -> Result<Self> {
        let operation = Self {
            message: serde_json::to_string(&publish.item)?,
            topic_arn: publish.topic_arn,
        };
        Ok(operation)
    }
}

/// Sends resolved publish requests.
#[async_trait]
pub trait TopicPublisher: Send + Sync {
    /// Publishes one message and returns its identifier, when the topic reports one.
    async fn publish_message(&self, input: PublishInput) -> Result<Option<String>>;
}

#[async_trait]
impl TopicPublisher for Client {
    async fn publish_message(&self, input: PublishInput) -> Result<Option<String>> {
        let output = self
            .publish()
            .topic_arn(input.topic_arn)
            .message(input.message)
            .send()
            .await
            .map_err(|error| Error::topic(error.into_service_error()))?;
        Ok(output.message_id)
    }
}

/// Topic gateway.
#[derive(Clone, Debug)]
pub struct TopicGateway<P = Client> {
    publisher: P,
}

impl<P: TopicPublisher> TopicGateway<P> {
    /// Wraps a configured topic client.
    pub fn new(publisher: P) -> Self {
        Self { publisher }
    }

    /// Publishes `item` as a JSON message.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "aws_lambda_kit.publish", skip(self, item), err)
    )]
    pub async fn publish<T: Serialize + ?Sized>(
        &self,
        topic_arn: &str,
        item: &T,
    ) -> Result<Option<String>> {
        let input: PublishInput = Publish {
            item,
            topic_arn: topic_arn.to_string(),
        }
        .try_into()?;
        self.publisher.publish_message(input).await
    }
}
