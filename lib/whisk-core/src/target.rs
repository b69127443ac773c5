//! Where a successful response body goes.

use std::fmt;
use std::io::Write;

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::{Response, Result};

/// Destination for the body of a successful response.
///
/// The variant is chosen by the caller up front: the body is either dropped,
/// copied verbatim into a writer, or decoded as JSON into a value.
///
/// ```
/// use whisk_core::Target;
///
/// let mut names: Vec<String> = Vec::new();
/// let _decode = Target::decode(&mut names);
///
/// let mut raw = Vec::new();
/// let _sink = Target::sink(&mut raw);
///
/// let _discard = Target::discard();
/// ```
pub enum Target<'a, T = ()> {
    /// Drop the body.
    Discard,
    /// Copy the raw bytes into the writer, without interpreting them.
    Sink(&'a mut (dyn Write + Send)),
    /// Decode the JSON body into the value. An empty body leaves it untouched.
    Decode(&'a mut T),
}

impl<'a> Target<'a, ()> {
    /// Drop the body.
    #[must_use]
    pub const fn discard() -> Self {
        Self::Discard
    }

    /// Copy the body into `writer`.
    #[must_use]
    pub fn sink(writer: &'a mut (dyn Write + Send)) -> Self {
        Self::Sink(writer)
    }
}

impl<'a, T> Target<'a, T> {
    /// Decode the body into `value`.
    #[must_use]
    pub fn decode(value: &'a mut T) -> Self {
        Self::Decode(value)
    }
}

impl<T: DeserializeOwned> Target<'_, T> {
    /// Consume the body of `response` into this target.
    ///
    /// Returns the envelope without its body; the body is gone on every path.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::Io`] if the sink rejects a write.
    /// - [`crate::Error::JsonDeserialization`] if a non-empty body does not
    ///   match `T`.
    pub fn deliver(self, response: Response<Bytes>) -> Result<Response<()>> {
        let (envelope, body) = response.take_body();
        match self {
            Self::Discard => {}
            Self::Sink(writer) => {
                writer.write_all(&body)?;
                writer.flush()?;
            }
            Self::Decode(value) => {
                if !body.iter().all(u8::is_ascii_whitespace) {
                    *value = crate::from_json(&body)?;
                }
            }
        }
        Ok(envelope)
    }
}

impl<T> fmt::Debug for Target<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Discard => f.write_str("Target::Discard"),
            Self::Sink(_) => f.write_str("Target::Sink(..)"),
            Self::Decode(_) => write!(f, "Target::Decode<{}>", std::any::type_name::<T>()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert2::{check, let_assert};

    use super::*;

    fn ok(body: &'static [u8]) -> Response<Bytes> {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        Response::new(200, headers, Bytes::from_static(body))
    }

    #[derive(Debug, Default, PartialEq, serde::Deserialize)]
    struct Named {
        name: String,
    }

    #[test]
    fn decode_fills_value() {
        let mut list: Vec<Named> = Vec::new();
        let envelope = Target::decode(&mut list)
            .deliver(ok(br#"[{"name":"foo"}]"#))
            .expect("decoded");

        check!(envelope.status() == 200);
        check!(
            list == [Named {
                name: "foo".to_string()
            }]
        );
    }

    #[test]
    fn decode_empty_body_is_not_an_error() {
        let mut named = Named {
            name: "untouched".to_string(),
        };
        Target::decode(&mut named).deliver(ok(b"")).expect("empty body");
        Target::decode(&mut named).deliver(ok(b"\r\n")).expect("blank body");

        check!(named.name == "untouched");
    }

    #[test]
    fn decode_mismatch_is_an_error() {
        let mut named = Named::default();
        let result = Target::decode(&mut named).deliver(ok(br#"{"name":7}"#));

        let_assert!(Err(crate::Error::JsonDeserialization { path, .. }) = result);
        check!(path == "name");
    }

    #[test]
    fn sink_copies_bytes_verbatim() {
        let mut raw = Vec::new();
        let envelope = Target::sink(&mut raw)
            .deliver(ok(b"\x1f\x8b not json"))
            .expect("copied");

        check!(raw == b"\x1f\x8b not json");
        check!(envelope.header("Content-Type") == Some("application/json"));
    }

    #[test]
    fn sink_write_failure_surfaces() {
        struct Broken;

        impl Write for Broken {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk full"))
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut broken = Broken;
        let result = Target::sink(&mut broken).deliver(ok(b"data"));
        let_assert!(Err(crate::Error::Io(_)) = result);
    }

    #[test]
    fn discard_drops_body() {
        let envelope = Target::discard().deliver(ok(b"ignored")).expect("discarded");
        check!(envelope.status() == 200);
    }
}
