use crate::error::{Error, Result};

use async_trait::async_trait;
use aws_sdk_sqs::{Client, primitives::Blob, types};
use serde::Serialize;
use std::collections;

/// Typed SQS message attribute.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MessageAttribute {
    /// `String` data type.
    String(String),
    /// `Number` data type, kept in its textual form.
    Number(String),
    /// `Binary` data type.
    Binary(Vec<u8>),
}

impl MessageAttribute {
    /// The SQS data type name.
    pub fn data_type(&self) -> &'static str {
        match self {
            Self::String(_) => "String",
            Self::Number(_) => "Number",
            Self::Binary(_) => "Binary",
        }
    }
}

impl TryFrom<MessageAttribute> for types::MessageAttributeValue {
    type Error = Error;

    fn try_from(attribute: MessageAttribute) -> Result<Self> {
        let builder = Self::builder().data_type(attribute.data_type());
        let builder = match attribute {
            MessageAttribute::String(value) | MessageAttribute::Number(value) => {
                builder.string_value(value)
            }
            MessageAttribute::Binary(value) => builder.binary_value(Blob::new(value)),
        };
        builder.build().map_err(Error::queue)
    }
}

/// Message attributes keyed by name.
pub type MessageAttributes = collections::HashMap<String, MessageAttribute>;

/// Resolved send request, as handed to a [`MessageQueue`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SendMessageInput {
    /// Seconds before the message becomes visible.
    pub delay_seconds: i32,
    /// Attributes sent alongside the body.
    pub message_attributes: MessageAttributes,
    /// The JSON-encoded event.
    pub message_body: String,
    /// Target queue.
    pub queue_url: String,
}

/// Send message operation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SendMessage<E> {
    /// Attributes sent alongside the body.
    pub attributes: MessageAttributes,
    /// The event, JSON-encoded as the message body.
    pub event: E,
    /// Target queue.
    pub queue_url: String,
}

impl<E: Serialize> TryFrom<SendMessage<E>> for SendMessageInput {
    type Error = Error;

    fn try_from(send_message: SendMessage<E>) -> Result<Self> {
        let message_body = serde_json::to_string(&send_message.event)?;
        let operation = Self {
            delay_seconds: 0,
            message_attributes: send_message.attributes,
            message_body,
            queue_url: send_message.queue_url,
        };
        Ok(operation)
    }
}

/// Sends resolved queue messages.
#[async_trait]
pub trait MessageQueue: Send + Sync {
    /// Enqueues one message and returns its identifier.
    async fn enqueue(&self, input: SendMessageInput) -> Result<String>;
}

#[async_trait]
impl MessageQueue for Client {
    async fn enqueue(&self, input: SendMessageInput) -> Result<String> {
        let mut message_attributes: collections::HashMap<_, types::MessageAttributeValue> =
            collections::HashMap::new();
        for (name, attribute) in input.message_attributes {
            message_attributes.insert(name, attribute.try_into()?);
        }
        let output = self
            .send_message()
            .queue_url(input.queue_url)
            .message_body(input.message_body)
            .delay_seconds(input.delay_seconds)
            .set_message_attributes((!message_attributes.is_empty()).then_some(message_attributes))
            .send()
            .await
            .map_err(|error| Error::queue(error.into_service_error()))?;
        Ok(output.message_id.unwrap_or_default())
    }
}

/// Queue gateway.
#[derive(Clone, Debug)]
pub struct QueueGateway<Q = Client> {
    queue: Q,
}

impl<Q: MessageQueue> QueueGateway<Q> {
    /// Wraps a configured queue client.
    pub fn new(queue: Q) -> Self {
        Self { queue }
    }

    /// The wrapped queue client.
    pub fn queue(&self) -> &Q {
        &self.queue
    }

    /// Sends `event` as one JSON message with no delay.
    ///
    /// The returned message identifier is also logged, so callers that only
    /// fire the message may drop the result.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "aws_lambda_kit.send", skip(self, event, attributes), err)
    )]
    pub async fn send<E: Serialize + ?Sized>(
        &self,
        event: &E,
        attributes: MessageAttributes,
        queue_url: &str,
    ) -> Result<String> {
        let input: SendMessageInput = SendMessage {
            attributes,
            event,
            queue_url: queue_url.to_string(),
        }
        .try_into()?;
        let message_id = self.queue.enqueue(input).await?;
        #[cfg(feature = "tracing")]
        tracing::info!(%message_id, "message sent");
        Ok(message_id)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::testing::{CannedHttpClient, canned_client};

    use serde_json::json;
    use std::sync;

    /// Records every message; bodies containing `"fail"` are rejected.
    #[derive(Debug, Default)]
    pub(crate) struct FakeQueue {
        pub(crate) sent: sync::Mutex<Vec<SendMessageInput>>,
    }

    #[async_trait]
    impl MessageQueue for FakeQueue {
        async fn enqueue(&self, input: SendMessageInput) -> Result<String> {
            if input.message_body.contains("fail") {
                return Err(Error::queue("AWS.SimpleQueueService.NonExistentQueue"));
            }
            let mut sent = self.sent.lock().unwrap();
            sent.push(input);
            Ok(format!("message-{}", sent.len()))
        }
    }

    #[test]
    fn test_send_message() {
        let send_message = SendMessage {
            attributes: MessageAttributes::from([(
                "source".to_string(),
                MessageAttribute::String("a".to_string()),
            )]),
            event: json!({"b": [1, 2]}),
            queue_url: "c".to_string(),
        };
        let expected = SendMessageInput {
            delay_seconds: 0,
            message_attributes: MessageAttributes::from([(
                "source".to_string(),
                MessageAttribute::String("a".to_string()),
            )]),
            message_body: r#"{"b":[1,2]}"#.to_string(),
            queue_url: "c".to_string(),
        };
        let actual: SendMessageInput = send_message.try_into().unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_message_attribute_value() {
        let actual: types::MessageAttributeValue =
            MessageAttribute::Number("42".to_string()).try_into().unwrap();
        assert_eq!(actual.data_type(), "Number");
        assert_eq!(actual.string_value(), Some("42"));
        let actual: types::MessageAttributeValue =
            MessageAttribute::Binary(vec![1, 2]).try_into().unwrap();
        assert_eq!(actual.data_type(), "Binary");
        assert_eq!(actual.binary_value().cloned().map(Blob::into_inner), Some(vec![1, 2]));
    }

    #[tokio::test]
    async fn test_send_returns_message_id() {
        let gateway = QueueGateway::new(FakeQueue::default());
        let actual = gateway
            .send(&json!({"a": 1}), MessageAttributes::new(), "queue")
            .await
            .unwrap();
        assert_eq!(actual, "message-1");
        let sent = gateway.queue().sent.lock().unwrap();
        assert_eq!(sent[0].queue_url, "queue");
        assert_eq!(sent[0].delay_seconds, 0);
    }

    #[tokio::test]
    async fn test_send_failure_is_returned() {
        let gateway = QueueGateway::new(FakeQueue::default());
        let actual = gateway
            .send("fail", MessageAttributes::new(), "queue")
            .await;
        assert!(matches!(actual, Err(Error::Queue(_))));
    }

    #[tokio::test]
    async fn test_client_send_without_attributes() {
        let http = CannedHttpClient::json(
            200,
            json!({"MD5OfMessageBody": "0", "MessageId": "abc-123"}),
        );
        let gateway = QueueGateway::new(canned_client!(aws_sdk_sqs, http));
        let actual = gateway
            .send(&json!({"a": 1}), MessageAttributes::new(), "https://sqs.eu-west-1.amazonaws.com/1/jobs")
            .await
            .unwrap();
        assert_eq!(actual, "abc-123");
        let requests = http.requests();
        assert_eq!(requests[0].header("x-amz-target"), Some("AmazonSQS.SendMessage"));
        assert_eq!(
            requests[0].json(),
            json!({
                "DelaySeconds": 0,
                "MessageBody": r#"{"a":1}"#,
                "QueueUrl": "https://sqs.eu-west-1.amazonaws.com/1/jobs"
            })
        );
    }

    #[tokio::test]
    async fn test_client_send_with_attributes() {
        let http = CannedHttpClient::json(200, json!({"MessageId": "abc-123"}));
        let gateway = QueueGateway::new(canned_client!(aws_sdk_sqs, http));
        let attributes = MessageAttributes::from([(
            "kind".to_string(),
            MessageAttribute::String("job".to_string()),
        )]);
        gateway
            .send("x", attributes, "https://sqs.eu-west-1.amazonaws.com/1/jobs")
            .await
            .unwrap();
        assert_eq!(
            http.requests()[0].json()["MessageAttributes"],
            json!({"kind": {"DataType": "String", "StringValue": "job"}})
        );
    }

    #[tokio::test]
    async fn test_client_send_failure() {
        let http = CannedHttpClient::json(
            400,
            json!({
                "__type": "com.amazonaws.sqs#QueueDoesNotExist",
                "message": "The specified queue does not exist."
            }),
        );
        let gateway = QueueGateway::new(canned_client!(aws_sdk_sqs, http));
        let actual = gateway
            .send("x", MessageAttributes::new(), "https://sqs.eu-west-1.amazonaws.com/1/jobs")
            .await;
        assert!(matches!(actual, Err(Error::Queue(_))));
    }
}
