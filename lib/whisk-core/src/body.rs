//! JSON body encoding and decoding.

use bytes::Bytes;

use crate::Result;

/// Content type of a request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// `application/json`, used for every structured payload.
    Json,
    /// `application/octet-stream`, used for opaque downloads.
    OctetStream,
}

impl ContentType {
    /// MIME type string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::OctetStream => "application/octet-stream",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serialize a value to JSON bytes.
///
/// # Errors
///
/// Returns an error if JSON serialization fails (for example a map with
/// non-string keys).
///
/// ```
/// use whisk_core::to_json;
///
/// let bytes = to_json(&serde_json::json!({"name": "hello"})).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"name":"hello"}"#);
/// ```
pub fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Deserialize JSON bytes, reporting the path of the field that failed.
///
/// # Errors
///
/// Returns [`crate::Error::JsonDeserialization`] whose `path` points at the
/// offending field (e.g. `exec.kind`), or is `.` for syntax errors at the root.
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn content_type_strings() {
        assert_eq!(ContentType::Json.as_str(), "application/json");
        assert_eq!(ContentType::OctetStream.to_string(), "application/octet-stream");
    }

    #[test]
    fn to_json_rejects_non_string_keys() {
        let mut map = HashMap::new();
        map.insert(vec![1_u8], "value");

        let err = to_json(&map).expect_err("non-string keys cannot be JSON");
        assert!(matches!(err, crate::Error::JsonSerialization(_)));
    }

    #[test]
    fn from_json_reports_nested_path() {
        #[derive(Debug, serde::Deserialize)]
        struct Exec {
            #[allow(dead_code)]
            kind: String,
        }

        #[derive(Debug, serde::Deserialize)]
        struct Action {
            #[allow(dead_code)]
            exec: Exec,
        }

        let err = from_json::<Action>(br#"{"exec":{"kind":42}}"#).expect_err("kind is a string");
        let crate::Error::JsonDeserialization { path, .. } = &err else {
            panic!("unexpected error: {err}");
        };
        assert_eq!(path, "exec.kind");
    }

    #[test]
    fn from_json_syntax_error() {
        let err = from_json::<Vec<String>>(b"not json").expect_err("syntax error");
        assert!(err.to_string().contains("JSON deserialization error"));
    }
}
