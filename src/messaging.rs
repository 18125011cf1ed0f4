//! Queue and topic gateways over SQS and SNS, plus a paced sender.

/// Single-message sends to an SQS queue.
pub mod queue;

/// Paced sends of a burst of queue messages.
pub mod sequencer;

/// Publishing to an SNS topic.
pub mod topic;
