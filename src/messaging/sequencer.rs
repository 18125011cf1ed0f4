use crate::{
    error::Error,
    messaging::queue::{MessageAttributes, MessageQueue, QueueGateway},
};

use serde::Serialize;
use std::time;

/// Outcome of [`Sequencer::send_all`].
#[derive(Debug, Default)]
pub struct SequenceReport {
    /// Identifiers of the delivered messages, in send order.
    pub sent: Vec<String>,
    /// Position in the input and error of every failed send.
    pub failed: Vec<(usize, Error)>,
}

impl SequenceReport {
    /// Whether every message was delivered.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Sends a burst of events to one queue, pausing a fixed delay between sends.
///
/// ```rust,no_run
/// use aws_lambda_kit::messaging::{queue::QueueGateway, sequencer::Sequencer};
/// use serde_json::json;
/// use std::time::Duration;
///
/// # async fn example(client: aws_sdk_sqs::Client) {
/// let sequencer = Sequencer::new(QueueGateway::new(client), "https://sqs.eu-west-1.amazonaws.com/1/jobs");
/// let events = vec![json!({"job": 1}), json!({"job": 2})];
/// let report = sequencer.send_all(events, Duration::from_millis(200)).await;
/// assert!(report.is_complete());
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Sequencer<Q = aws_sdk_sqs::Client> {
    attributes: MessageAttributes,
    gateway: QueueGateway<Q>,
    queue_url: String,
}

impl<Q: MessageQueue> Sequencer<Q> {
    /// Sequencer sending to `queue_url` without message attributes.
    pub fn new(gateway: QueueGateway<Q>, queue_url: impl Into<String>) -> Self {
        Self {
            attributes: MessageAttributes::new(),
            gateway,
            queue_url: queue_url.into(),
        }
    }

    /// Attributes attached to every message.
    pub fn with_attributes(mut self, attributes: MessageAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Sends every event in order, sleeping `delay` between consecutive sends.
    ///
    /// A failed send is logged and recorded in the report; the remaining
    /// events are still sent.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "aws_lambda_kit.send_all",
            skip_all,
            fields(queue_url = %self.queue_url, count = events.len())
        )
    )]
    pub async fn send_all<E: Serialize>(&self, events: Vec<E>, delay: time::Duration) -> SequenceReport {
        let mut report = SequenceReport::default();
        let count = events.len();
        for (index, event) in events.into_iter().enumerate() {
            match self
                .gateway
                .send(&event, self.attributes.clone(), &self.queue_url)
                .await
            {
                Ok(message_id) => report.sent.push(message_id),
                Err(error) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(index, %error, "sequenced message not sent");
                    report.failed.push((index, error));
                }
            }
            if index + 1 < count {
                tokio::time::sleep(delay).await;
            }
        }
        #[cfg(feature = "tracing")]
        tracing::info!(
            sent = report.sent.len(),
            failed = report.failed.len(),
            "finished pushing to the queue"
        );
        report
    }
}
