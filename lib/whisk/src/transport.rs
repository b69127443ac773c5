//! Shared request building, execution and decoding.
//!
//! Every resource service goes through one [`Transport`]: it resolves a
//! relative path against the base URL, attaches the JSON body and the stored
//! credential, runs the request on the execution mechanism, turns non-2xx
//! responses into [`crate::ApiError`], and routes successful bodies to a
//! [`Target`].

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::trace;
use url::Url;

use whisk_core::{ContentType, check_response};

use crate::{Error, HttpClient, Method, Request, Response, Result, Target};

// ============================================================================
// Credential
// ============================================================================

/// A credential attached to every request as the `Authorization` header.
///
/// Keys of the form `<uuid>:<secret>` use HTTP Basic auth; anything else is
/// sent as a Bearer token.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// `Authorization: Basic <base64(key)>`.
    Basic(String),
    /// `Authorization: Bearer <token>`.
    Bearer(String),
}

impl Credential {
    /// Classify an auth key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] for an empty or blank key.
    pub fn from_key(key: &str) -> Result<Self> {
        let key = key.trim();
        if key.is_empty() {
            return Err(Error::invalid_request("auth key must not be empty"));
        }
        match key.split_once(':') {
            Some((user, secret)) if !user.is_empty() && !secret.is_empty() => {
                Ok(Self::Basic(key.to_string()))
            }
            _ => Ok(Self::Bearer(key.to_string())),
        }
    }

    /// Value of the `Authorization` header.
    #[must_use]
    pub fn header_value(&self) -> String {
        match self {
            Self::Basic(key) => format!("Basic {}", STANDARD.encode(key)),
            Self::Bearer(token) => format!("Bearer {token}"),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic(_) => f.write_str("Credential::Basic(..)"),
            Self::Bearer(_) => f.write_str("Credential::Bearer(..)"),
        }
    }
}

// ============================================================================
// Transport
// ============================================================================

/// Request builder and executor shared by all resource services.
#[derive(Debug, Clone)]
pub struct Transport<C> {
    http: C,
    base_url: Url,
    user_agent: String,
    credential: Option<Credential>,
}

impl<C> Transport<C> {
    pub(crate) fn new(http: C, base_url: Url, user_agent: String) -> Self {
        Self {
            http,
            base_url,
            user_agent,
            credential: None,
        }
    }

    /// Base URL relative paths are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn set_base_url(&mut self, base_url: Url) {
        self.base_url = base_url;
    }

    /// The execution mechanism.
    #[must_use]
    pub fn http(&self) -> &C {
        &self.http
    }

    /// The stored credential, if any.
    #[must_use]
    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub(crate) fn set_credential(&mut self, credential: Option<Credential>) {
        self.credential = credential;
    }

    /// Build a request for `path`, resolved against the base URL.
    ///
    /// Relative paths extend the base (`actions` under
    /// `https://host/api/v1/namespaces/_/` gives
    /// `https://host/api/v1/namespaces/_/actions`); absolute paths and absolute
    /// URLs replace it. A `body`, if given, is serialized as JSON.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidUrl`] if `path` cannot be resolved.
    /// - [`Error::JsonSerialization`] if `body` cannot be encoded.
    ///
    /// Nothing is sent and no request is returned on error.
    pub fn build_request<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Request>
    where
        B: Serialize + ?Sized,
    {
        let url = self.base_url.join(path)?;

        let mut builder = Request::builder(method, url)
            .header("Accept", ContentType::Json.as_str())
            .header("User-Agent", self.user_agent.as_str());
        if let Some(credential) = &self.credential {
            builder = builder.header("Authorization", credential.header_value());
        }
        if let Some(body) = body {
            builder = builder.json(body)?;
        }

        let request = builder.build();
        trace!(%method, url = %request.url(), has_body = request.body().is_some(), "built request");
        Ok(request)
    }
}

impl<C: HttpClient> Transport<C> {
    /// Perform `request` once and route the body of a successful response to
    /// `target`.
    ///
    /// On success the envelope (status and headers) is returned without its
    /// body.
    ///
    /// # Errors
    ///
    /// - Whatever the execution mechanism reports (connection, TLS, timeout),
    ///   unchanged.
    /// - [`Error::Api`] for a status outside `200..=299`; the error keeps the
    ///   full response.
    /// - [`Error::JsonDeserialization`] if a non-empty body does not match the
    ///   decode target.
    /// - [`Error::Io`] if a sink target rejects the bytes.
    pub async fn execute<T>(&self, request: Request, target: Target<'_, T>) -> Result<Response<()>>
    where
        T: DeserializeOwned,
    {
        let method = request.method();
        let url = request.url().clone();

        let response = self.http.execute(request).await?;
        let response: Response<Bytes> = check_response(method, &url, response)?;

        trace!(
            %method,
            %url,
            status = response.status(),
            destination = ?target,
            empty_body = response.is_body_empty(),
            "delivering response body"
        );
        target.deliver(response)
    }

    /// `GET path`, decoded into a fresh `T`; an empty body yields `T::default()`.
    pub async fn get_json<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        self.fetch(Method::Get, path).await
    }

    /// Body-less request decoded into a fresh `T`.
    pub async fn fetch<T>(&self, method: Method, path: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let request = self.build_request::<()>(method, path, None)?;
        let mut value = T::default();
        self.execute(request, Target::decode(&mut value)).await?;
        Ok(value)
    }

    /// Request with a JSON body, decoded into a fresh `T`.
    pub async fn send<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Default,
    {
        let request = self.build_request(method, path, Some(body))?;
        let mut value = T::default();
        self.execute(request, Target::decode(&mut value)).await?;
        Ok(value)
    }

    /// Body-less request whose response body is dropped.
    pub async fn call(&self, method: Method, path: &str) -> Result<Response<()>> {
        let request = self.build_request::<()>(method, path, None)?;
        self.execute(request, Target::discard()).await
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;

    fn transport(base: &str) -> Transport<()> {
        Transport::new(
            (),
            Url::parse(base).expect("valid base"),
            "whisk-rs/test".to_string(),
        )
    }

    #[test]
    fn relative_paths_extend_the_base() {
        let transport = transport("https://whisk.example.com/api/v1/namespaces/_/");
        let request = transport
            .build_request::<()>(Method::Get, "actions", None)
            .expect("request");

        check!(request.url().as_str() == "https://whisk.example.com/api/v1/namespaces/_/actions");
        check!(request.header("Accept") == Some("application/json"));
        check!(request.header("User-Agent") == Some("whisk-rs/test"));
        check!(request.header("Authorization").is_none());
        check!(request.body().is_none());
    }

    #[test]
    fn absolute_paths_override_the_base() {
        let transport = transport("https://whisk.example.com/api/v1/namespaces/_/");

        let request = transport
            .build_request::<()>(Method::Get, "/actions", None)
            .expect("request");
        check!(request.url().as_str() == "https://whisk.example.com/actions");

        let request = transport
            .build_request::<()>(Method::Get, "https://other.example.com/x", None)
            .expect("request");
        check!(request.url().as_str() == "https://other.example.com/x");
    }

    #[test]
    fn malformed_path_is_rejected() {
        let transport = transport("https://whisk.example.com/");
        let result = transport.build_request::<()>(Method::Get, "http://[::1", None);

        let_assert!(Err(Error::InvalidUrl(_)) = result);
    }

    #[test]
    fn body_is_serialized_as_json() {
        let transport = transport("https://whisk.example.com/");
        let body = serde_json::json!({"name": "hello", "publish": false});
        let request = transport
            .build_request(Method::Put, "actions/hello", Some(&body))
            .expect("request");

        check!(request.header("Content-Type") == Some("application/json"));
        let_assert!(Some(bytes) = request.body());
        let sent: serde_json::Value = serde_json::from_slice(bytes).expect("json");
        check!(sent == body);
    }

    #[test]
    fn serialization_failure_yields_no_request() {
        let mut map = std::collections::BTreeMap::new();
        map.insert((1, 2), "tuple keys are not JSON");

        let transport = transport("https://whisk.example.com/");
        let result = transport.build_request(Method::Post, "actions/x", Some(&map));

        let_assert!(Err(Error::JsonSerialization(_)) = result);
    }

    #[test]
    fn building_twice_gives_equal_independent_requests() {
        let transport = transport("https://whisk.example.com/");
        let body = serde_json::json!({"status": "active"});

        let mut first = transport
            .build_request(Method::Post, "rules/r1", Some(&body))
            .expect("first");
        let second = transport
            .build_request(Method::Post, "rules/r1", Some(&body))
            .expect("second");
        check!(first == second);

        first
            .headers_mut()
            .insert("X-Changed".to_string(), "yes".to_string());
        check!(first != second);
        check!(second.header("X-Changed").is_none());
    }

    #[test]
    fn credential_is_attached() {
        let mut transport = transport("https://whisk.example.com/");
        transport.set_credential(Some(Credential::from_key("user:secret").expect("key")));

        let request = transport
            .build_request::<()>(Method::Get, "actions", None)
            .expect("request");
        check!(request.header("Authorization") == Some("Basic dXNlcjpzZWNyZXQ="));
    }

    #[test]
    fn credential_kinds() {
        check!(Credential::from_key("uuid:key").expect("basic") == Credential::Basic("uuid:key".to_string()));
        check!(Credential::from_key("token").expect("bearer") == Credential::Bearer("token".to_string()));
        check!(Credential::from_key(":missing-user").expect("bearer") == Credential::Bearer(":missing-user".to_string()));
        check!(Credential::from_key("abc").expect("bearer").header_value() == "Bearer abc");
        let_assert!(Err(Error::InvalidRequest(_)) = Credential::from_key("  "));
    }

    #[test]
    fn credential_debug_hides_secret() {
        let credential = Credential::from_key("user:secret").expect("key");
        check!(!format!("{credential:?}").contains("secret"));
    }
}
