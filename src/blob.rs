//! Blob gateway over S3.

use crate::error::{Error, Result};

use async_trait::async_trait;
use aws_sdk_s3::{
    Client,
    primitives::{ByteStream, DateTime},
};
use serde::{Serialize, de::DeserializeOwned};
use std::collections;

/// Content type stored with JSON objects.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// copy the object metadata fields shared by head and get responses
macro_rules! object_metadata {
    ($output:expr) => {
        ObjectMetadata {
            cache_control: $output.cache_control,
            content_encoding: $output.content_encoding,
            content_length: $output.content_length,
            content_type: $output.content_type,
            e_tag: $output.e_tag,
            last_modified: $output.last_modified,
            metadata: $output.metadata.unwrap_or_default(),
            version_id: $output.version_id,
        }
    };
}

/// Object metadata, as returned by head and get requests.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectMetadata {
    /// Caching directive stored with the object.
    pub cache_control: Option<String>,
    /// Encoding applied to the body, such as `gzip`.
    pub content_encoding: Option<String>,
    /// Size of the body in bytes.
    pub content_length: Option<i64>,
    /// MIME type of the body.
    pub content_type: Option<String>,
    /// Integrity tag of the stored object, quotes included.
    pub e_tag: Option<String>,
    /// When the object was last written.
    pub last_modified: Option<DateTime>,
    /// User-defined metadata (`x-amz-meta-*`), keys without the prefix.
    pub metadata: collections::HashMap<String, String>,
    /// Version of the object, on versioned buckets.
    pub version_id: Option<String>,
}

/// A fetched object, body untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StoredObject {
    /// The full body.
    pub body: Vec<u8>,
    /// Metadata returned with the body.
    pub metadata: ObjectMetadata,
}

/// Resolved put request, as handed to a [`BlobStore`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PutObjectInput {
    /// The body to store.
    pub body: Vec<u8>,
    /// Target bucket.
    pub bucket: String,
    /// MIME type recorded with the object.
    pub content_type: Option<String>,
    /// Target key.
    pub key: String,
}

/// Acknowledgement of a stored object.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PutAcknowledgement {
    /// Integrity tag of the new object.
    pub e_tag: Option<String>,
    /// Version of the new object, on versioned buckets.
    pub version_id: Option<String>,
}

/// How [`BlobGateway::read`] hands back the object.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum ReadMode {
    /// The untouched object.
    Raw,
    /// The body parsed as JSON.
    #[default]
    Json,
}

/// Result of [`BlobGateway::read`].
#[derive(Clone, Debug, PartialEq)]
pub enum ObjectContent {
    /// The untouched object, for [`ReadMode::Raw`].
    Raw(StoredObject),
    /// The parsed body, for [`ReadMode::Json`].
    Json(serde_json::Value),
}

/// Sends blob requests.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Fetches metadata only.
    async fn fetch_metadata(&self, bucket: &str, key: &str) -> Result<ObjectMetadata>;
    /// Fetches the full object.
    async fn fetch_object(&self, bucket: &str, key: &str) -> Result<StoredObject>;
    /// Stores an object.
    async fn store_object(&self, input: PutObjectInput) -> Result<PutAcknowledgement>;
}

#[async_trait]
impl BlobStore for Client {
    async fn fetch_metadata(&self, bucket: &str, key: &str) -> Result<ObjectMetadata> {
        let output = self
            .head_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|error| Error::blob(error.into_service_error()))?;
        Ok(object_metadata!(output))
    }

    async fn fetch_object(&self, bucket: &str, key: &str) -> Result<StoredObject> {
        let output = self
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|error| Error::blob(error.into_service_error()))?;
        let body = output.body.collect().await.map_err(Error::blob)?;
        let metadata = object_metadata!(output);
        let object = StoredObject {
            body: body.into_bytes().to_vec(),
            metadata,
        };
        Ok(object)
    }

    async fn store_object(&self, input: PutObjectInput) -> Result<PutAcknowledgement> {
        let output = self
            .put_object()
            .bucket(input.bucket)
            .key(input.key)
            .body(ByteStream::from(input.body))
            .set_content_type(input.content_type)
            .send()
            .await
            .map_err(|error| Error::blob(error.into_service_error()))?;
        let acknowledgement = PutAcknowledgement {
            e_tag: output.e_tag,
            version_id: output.version_id,
        };
        Ok(acknowledgement)
    }
}

/// Blob gateway.
///
/// ```rust,no_run
/// use aws_lambda_kit::blob::{BlobGateway, ObjectContent, ReadMode};
/// use serde_json::json;
///
/// # async fn example(client: aws_sdk_s3::Client) -> aws_lambda_kit::Result<()> {
/// let blobs = BlobGateway::new(client);
/// blobs.write_json(&json!({"a": 1}), "config.json", "my-bucket").await?;
/// let content = blobs.read("config.json", "my-bucket", ReadMode::Json).await?;
/// assert_eq!(content, ObjectContent::Json(json!({"a": 1})));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct BlobGateway<B = Client> {
    store: B,
}

impl<B: BlobStore> BlobGateway<B> {
    /// Wraps a configured store.
    pub fn new(store: B) -> Self {
        Self { store }
    }

    /// The wrapped store.
    pub fn store(&self) -> &B {
        &self.store
    }

    /// Fetches the object's metadata and checks its integrity tag.
    ///
    /// Succeeds only when the store returns a tag equal to `expected_tag`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "aws_lambda_kit.head_check", skip(self), err)
    )]
    pub async fn head_check(
        &self,
        key: &str,
        bucket: &str,
        expected_tag: &str,
    ) -> Result<ObjectMetadata> {
        let metadata = self.store.fetch_metadata(bucket, key).await?;
        match metadata.e_tag.as_deref() {
            Some(tag) if tag == expected_tag => Ok(metadata),
            actual => Err(Error::TagMismatch {
                expected: expected_tag.to_string(),
                actual: actual.map(str::to_string),
            }),
        }
    }

    /// Fetches the object, parsed as JSON unless `mode` is [`ReadMode::Raw`].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "aws_lambda_kit.read", skip(self), err)
    )]
    pub async fn read(&self, key: &str, bucket: &str, mode: ReadMode) -> Result<ObjectContent> {
        let object = self.store.fetch_object(bucket, key).await?;
        let content = match mode {
            ReadMode::Raw => ObjectContent::Raw(object),
            ReadMode::Json => ObjectContent::Json(serde_json::from_slice(&object.body)?),
        };
        Ok(content)
    }

    /// Fetches the object and decodes its JSON body into `T`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "aws_lambda_kit.read_json", skip(self), err)
    )]
    pub async fn read_json<T: DeserializeOwned>(&self, key: &str, bucket: &str) -> Result<T> {
        let object = self.store.fetch_object(bucket, key).await?;
        Ok(serde_json::from_slice(&object.body)?)
    }

    /// Stores `value` as pretty-printed JSON.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "aws_lambda_kit.write_json", skip(self, value), err)
    )]
    pub async fn write_json<T: Serialize + ?Sized>(
        &self,
        value: &T,
        key: &str,
        bucket: &str,
    ) -> Result<PutAcknowledgement> {
        let input = PutObjectInput {
            body: serde_json::to_vec_pretty(value)?,
            bucket: bucket.to_string(),
            content_type: Some(JSON_CONTENT_TYPE.to_string()),
            key: key.to_string(),
        };
        self.store.store_object(input).await
    }
}
