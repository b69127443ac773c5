//! Error types and non-2xx response translation.
//!
//! Every failure is a value of [`Error`]. Responses outside `200..=299` go
//! through [`check_response`], which turns them into an [`ApiError`] carrying
//! the request method and URL, the raw response, and whatever message and
//! field errors the body could provide.

use std::fmt;

use bytes::Bytes;
use derive_more::{Display, Error, From};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use url::Url;

use crate::{Method, Response};

// ============================================================================
// Field Error
// ============================================================================

/// One field-level validation failure inside an [`ApiError`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Display, Error)]
#[display("{code} error caused by {field} field on {resource} resource")]
pub struct FieldError {
    /// Resource kind the error occurred on, e.g. `action`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub resource: String,
    /// Field of that resource, e.g. `name`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub field: String,
    /// Machine-readable validation code, e.g. `missing`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub code: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// ============================================================================
// API Error
// ============================================================================

fn string_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

impl FieldError {
    // Non-object elements are skipped; non-string fields read as empty.
    fn from_value(value: &Value) -> Option<Self> {
        value.is_object().then(|| Self {
            resource: string_field(value, "resource"),
            field: string_field(value, "field"),
            code: string_field(value, "code"),
        })
    }
}

/// A response whose status was outside `200..=299`.
///
/// `message` and `errors` are best-effort: an empty, absent or malformed body
/// leaves them empty, while method, URL and status are always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    method: Method,
    url: Url,
    response: Response<Bytes>,
    message: String,
    errors: Vec<FieldError>,
}

impl ApiError {
    /// Build an error from a failed response, decoding its body if possible.
    #[must_use]
    pub fn from_response(method: Method, url: Url, response: Response<Bytes>) -> Self {
        // `{"message": ..., "errors": [...]}`, decoded field by field so one
        // ill-typed field does not lose the others.
        let body: Value = serde_json::from_slice(response.body()).unwrap_or_default();
        let message = string_field(&body, "message");
        let errors = body
            .get("errors")
            .and_then(Value::as_array)
            .map(|errors| errors.iter().filter_map(FieldError::from_value).collect())
            .unwrap_or_default();

        Self {
            method,
            url,
            response,
            message,
            errors,
        }
    }

    /// Method of the request that failed.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// URL of the request that failed.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.response.status()
    }

    /// Decoded `message`, empty if the body had none.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Decoded field errors, in body order.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// The originating response, including headers and the raw body.
    #[must_use]
    pub fn response(&self) -> &Response<Bytes> {
        &self.response
    }

    /// Status is 404.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        self.status() == 404
    }

    /// Status is 4xx.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status() >= 400 && self.status() < 500
    }

    /// Status is 5xx.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status() >= 500 && self.status() < 600
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} {} [",
            self.method,
            self.url,
            self.status(),
            self.message
        )?;
        for (index, error) in self.errors.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{error}")?;
        }
        f.write_str("]")
    }
}

impl std::error::Error for ApiError {}

/// Pass a successful response through, or translate it into an [`ApiError`].
///
/// Any status in `200..=299` succeeds regardless of the body. Anything else
/// fails with [`Error::Api`]; the body is parsed tolerantly and never causes a
/// decode error of its own.
///
/// # Errors
///
/// Returns [`Error::Api`] when the status is outside `200..=299`.
pub fn check_response(method: Method, url: &Url, response: Response<Bytes>) -> Result<Response<Bytes>> {
    if response.is_success() {
        return Ok(response);
    }
    Err(ApiError::from_response(method, url.clone(), response).into())
}

// ============================================================================
// Error Type
// ============================================================================

/// Main error type for whisk operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// Base URL or request path could not be parsed or resolved.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),

    /// Request body could not be encoded as JSON.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// The request cannot be represented or was rejected before sending.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// Network/connection errors reported by the execution mechanism.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// The execution mechanism gave up waiting.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// The server answered with a status outside `200..=299`.
    #[display("{_0}")]
    #[from(skip)]
    Api(#[error(not(source))] Box<ApiError>),

    /// A JSON body did not match the target shape.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    JsonDeserialization {
        /// JSON path to the failing field (e.g. `exec.kind`).
        path: String,
        /// Error message.
        message: String,
    },

    /// The raw byte sink rejected a write.
    #[display("sink error: {_0}")]
    #[from]
    Io(std::io::Error),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl From<ApiError> for Error {
    fn from(error: ApiError) -> Self {
        Self::Api(Box::new(error))
    }
}

impl Error {
    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// The structured API error, if this is one.
    #[must_use]
    pub fn api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(error) => Some(error),
            _ => None,
        }
    }

    /// HTTP status code if this is an API error.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.api().map(ApiError::status)
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns `true` for a 404 API error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.api().is_some_and(ApiError::is_not_found)
    }

    /// Returns `true` for a 4xx API error.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.api().is_some_and(ApiError::is_client_error)
    }

    /// Returns `true` for a 5xx API error.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.api().is_some_and(ApiError::is_server_error)
    }
}
