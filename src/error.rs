use std::error;

/// Boxed cause carried by the service error variants.
pub type BoxError = Box<dyn error::Error + Send + Sync>;

/// Error returned by every gateway operation.
///
/// Each variant names the kind of failure and carries its underlying cause, so a
/// caller can match on the service that failed without parsing messages.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A DynamoDB request failed.
    #[error("key-value store request failed: {0}")]
    Storage(#[source] BoxError),
    /// An S3 request failed, or its body could not be collected.
    #[error("blob store request failed: {0}")]
    Blob(#[source] BoxError),
    /// An SQS request failed.
    #[error("queue request failed: {0}")]
    Queue(#[source] BoxError),
    /// An SNS request failed.
    #[error("topic request failed: {0}")]
    Topic(#[source] BoxError),
    /// The object's ETag is missing or differs from the expected one.
    #[error("ETag not equal: expected {expected}, found {}", .actual.as_deref().unwrap_or("none"))]
    TagMismatch {
        /// The tag the caller expected.
        expected: String,
        /// The tag the blob store returned, if any.
        actual: Option<String>,
    },
    /// A condition operator name is not one of the supported ones.
    #[error("unsupported condition operator `{0}`")]
    UnsupportedOperator(String),
    /// A value could not be converted to or from a DynamoDB attribute value.
    #[error(transparent)]
    Serialization(#[from] serde_dynamo::Error),
    /// A value could not be encoded or decoded as JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn storage(error: impl Into<BoxError>) -> Self {
        Self::Storage(error.into())
    }

    pub(crate) fn blob(error: impl Into<BoxError>) -> Self {
        Self::Blob(error.into())
    }

    pub(crate) fn queue(error: impl Into<BoxError>) -> Self {
        Self::Queue(error.into())
    }

    pub(crate) fn topic(error: impl Into<BoxError>) -> Self {
        Self::Topic(error.into())
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
