//! Response envelopes for API Gateway Lambda proxy integrations.
//!
//! A proxy integration must answer with `statusCode`, `headers` and a `body`
//! holding a JSON string. Every handler ends in exactly one of two envelopes:
//! a 200 carrying the payload or a 400 carrying a caption and the error.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;

/// Status code of a successful envelope.
pub const OK: u16 = 200;

/// Status code of a failed envelope.
pub const BAD_REQUEST: u16 = 400;

/// Content type of every envelope body.
pub const CONTENT_TYPE: &str = "application/json";

/// Caption used when a success payload cannot be serialized.
const UNSERIALIZABLE_RESPONSE: &str = "Unable to serialize response";

fn default_headers() -> IndexMap<String, String> {
    IndexMap::from([
        ("Content-Type".to_string(), CONTENT_TYPE.to_string()),
        ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
    ])
}

/// Lambda proxy response.
///
/// ```rust
/// use aws_lambda_kit::envelope::Envelope;
/// use serde_json::json;
///
/// let envelope = Envelope::success(json!({"x": 1}));
/// assert_eq!(envelope.status_code, 200);
/// assert_eq!(envelope.body, r#"{"x":1}"#);
///
/// let envelope = Envelope::success("done");
/// assert_eq!(envelope.body, r#"{"message":"done"}"#);
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    /// HTTP status code.
    pub status_code: u16,
    /// JSON-encoded body.
    pub body: String,
    /// Response headers, always JSON content type and an open CORS origin.
    pub headers: IndexMap<String, String>,
}

impl Envelope {
    fn new(status_code: u16, body: &Value) -> Self {
        Self {
            status_code,
            body: body.to_string(),
            headers: default_headers(),
        }
    }

    /// 200 envelope.
    ///
    /// Objects, arrays and null become the body as they are; any other value
    /// is wrapped as `{"message": data}`.
    pub fn success<T: Serialize>(data: T) -> Self {
        let data = match serde_json::to_value(data) {
            Ok(data) => data,
            Err(error) => return Self::failure(UNSERIALIZABLE_RESPONSE, error.to_string()),
        };
        #[cfg(feature = "tracing")]
        tracing::info!(%data, "request succeeded");
        match data {
            Value::Object(_) | Value::Array(_) | Value::Null => Self::new(OK, &data),
            message => Self::new(OK, &json!({ "message": message })),
        }
    }

    /// 400 envelope with body `{"message": caption, "error": error}`.
    ///
    /// Never fails: an `error` that cannot be serialized is replaced by the
    /// serialization error's text.
    pub fn failure<E: Serialize>(caption: &str, error: E) -> Self {
        #[cfg(feature = "tracing")]
        tracing::error!("{caption}");
        let error = serde_json::to_value(error)
            .unwrap_or_else(|error| Value::String(error.to_string()));
        Self::new(BAD_REQUEST, &json!({ "message": caption, "error": error }))
    }

    /// Maps a handler's result to its envelope, rendering errors with `Display`.
    ///
    /// ```rust
    /// use aws_lambda_kit::envelope::Envelope;
    ///
    /// let result: Result<&str, std::num::ParseIntError> = "x".parse::<i32>().map(|_| "ok");
    /// let envelope = Envelope::respond("Invalid number", result);
    /// assert_eq!(envelope.status_code, 400);
    /// ```
    pub fn respond<T, E>(caption: &str, result: Result<T, E>) -> Self
    where
        T: Serialize,
        E: fmt::Display,
    {
        match result {
            Ok(data) => Self::success(data),
            Err(error) => Self::failure(caption, error.to_string()),
        }
    }

    /// Whether this is a 200 envelope.
    pub fn is_success(&self) -> bool {
        self.status_code == OK
    }
}
