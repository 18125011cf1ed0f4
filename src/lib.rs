#![deny(missing_docs)]

//! # AWS Lambda Kit
//!
//! Typed helpers over DynamoDB, S3, SQS and SNS for AWS Lambda handlers.
//!
//! ## Overview
//!
//! Each service sits behind a small gateway that:
//! - Builds placeholder-based DynamoDB expressions from structured conditions and attribute maps
//! - Serializes payloads with `serde` so handlers never touch raw attribute values on the way in
//! - Maps every service failure onto one [`Error`] carrying its cause
//! - Takes its client by injection, so tests run against in-memory fakes
//!
//! ## Quick Example
//!
//! ```no_run
//! use aws_lambda_kit::{
//!     clients::Clients,
//!     common::condition::{AttributeCondition, ConditionOperator},
//!     envelope::Envelope,
//! };
//! use serde_json::Value;
//!
//! # async fn handler() -> Envelope {
//! let clients = Clients::from_env().await;
//! let conditions = vec![
//!     AttributeCondition {
//!         name: "pk".to_string(),
//!         operator: ConditionOperator::Equals,
//!         value: Value::String("user#1".to_string()),
//!     },
//!     AttributeCondition {
//!         name: "sk".to_string(),
//!         operator: ConditionOperator::BeginsWith,
//!         value: Value::String("order#".to_string()),
//!     },
//! ];
//! // Sent as "#pk = :pk AND begins_with(#sk, :sk)"
//! let result = clients.storage().query("orders", conditions).await;
//! Envelope::respond("Unable to list orders", result.map(|items| items.len()))
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`mod@storage`] - DynamoDB get, put, query and update
//! - [`mod@blob`] - S3 reads, JSON writes and ETag checks
//! - [`mod@messaging`] - SQS sends, SNS publishes and paced sequences
//! - [`mod@envelope`] - Lambda proxy responses
//! - [`mod@utils`] - Identifiers, grouping and size estimates

/// S3 object access.
pub mod blob;

/// SDK client construction from the AWS environment.
pub mod clients;

/// Expression building shared by storage operations.
pub mod common;

/// Lambda proxy response envelopes.
pub mod envelope;

/// The crate error type.
pub mod error;

/// SQS and SNS messaging.
pub mod messaging;

/// DynamoDB item operations.
pub mod storage;

/// Miscellaneous helpers.
pub mod utils;

#[cfg(test)]
mod testing;

pub use error::{Error, Result};
