//! Default execution mechanism, built on hyper-util and rustls.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::{
    client::legacy::{Client, connect::HttpConnector},
    rt::TokioExecutor,
};
use tower::Layer;
use tower::util::BoxCloneService;
use tower_service::Service;

use crate::config::HttpConfig;
use crate::middleware::LoggingLayer;
use crate::{Error, HttpClient, Request, Response, Result};

/// Type-erased service the middleware stack is composed over.
pub type BoxedService = BoxCloneService<Request, Response<Bytes>, Error>;

/// Future returned by [`HyperClient`] as a tower service.
pub type ServiceFuture = Pin<Box<dyn Future<Output = Result<Response<Bytes>>> + Send + 'static>>;

/// Makes a [`BoxedService`] shareable across threads; each call works on its
/// own clone so the lock is never held across an await.
#[derive(Clone)]
struct SharedService {
    inner: Arc<Mutex<BoxedService>>,
}

impl SharedService {
    fn new(service: BoxedService) -> Self {
        Self {
            inner: Arc::new(Mutex::new(service)),
        }
    }

    fn call(&self, request: Request) -> ServiceFuture {
        let mut service = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone();

        Box::pin(async move { service.call(request).await })
    }
}

// ============================================================================
// Connection
// ============================================================================

fn https_connector(config: &HttpConfig) -> HttpsConnector<HttpConnector> {
    let mut http = HttpConnector::new();
    http.enforce_http(false);
    http.set_connect_timeout(Some(config.connect_timeout));

    let root_store: rustls::RootCertStore =
        webpki_roots::TLS_SERVER_ROOTS.iter().cloned().collect();
    let tls_config = rustls::ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    HttpsConnectorBuilder::new()
        .with_tls_config(tls_config)
        .https_or_http()
        .enable_http1()
        .enable_http2()
        .wrap_connector(http)
}

/// One request, one response, no middleware.
#[derive(Clone)]
struct Connection {
    inner: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
    config: HttpConfig,
}

impl Connection {
    fn new(config: HttpConfig) -> Self {
        let inner = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_idle_per_host)
            .build(https_connector(&config));

        Self { inner, config }
    }

    fn to_hyper_request(request: Request) -> Result<http::Request<Full<Bytes>>> {
        let (method, url, headers, body) = request.into_parts();

        let mut builder = http::Request::builder()
            .method(http::Method::from(method))
            .uri(url.as_str());
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder
            .body(body.map_or_else(Full::default, Full::new))
            .map_err(|e| Error::invalid_request(e.to_string()))
    }

    fn headers(headers: &http::HeaderMap) -> HashMap<String, String> {
        headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect()
    }

    #[allow(clippy::needless_pass_by_value)]
    fn classify(err: hyper_util::client::legacy::Error) -> Error {
        let mut detail = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            detail = format!("{detail}: {cause}");
            source = cause.source();
        }

        let lower = detail.to_ascii_lowercase();
        if lower.contains("tls") || lower.contains("certificate") || lower.contains("handshake") {
            return Error::tls(detail);
        }
        Error::connection(detail)
    }

    async fn send(&self, request: Request) -> Result<Response<Bytes>> {
        let hyper_request = Self::to_hyper_request(request)?;
        // One deadline covers both the response head and the body.
        let deadline = tokio::time::Instant::now() + self.config.timeout;

        let response = tokio::time::timeout_at(deadline, self.inner.request(hyper_request))
            .await
            .map_err(|_| Error::Timeout)?
            .map_err(Self::classify)?;

        let status = response.status().as_u16();
        let headers = Self::headers(response.headers());

        // Read to the end so the connection goes back to the pool.
        let body = tokio::time::timeout_at(deadline, response.into_body().collect())
            .await
            .map_err(|_| Error::Timeout)?
            .map_err(|e| Error::connection(e.to_string()))?
            .to_bytes();

        Ok(Response::new(status, headers, body))
    }
}

impl Service<Request> for Connection {
    type Response = Response<Bytes>;
    type Error = Error;
    type Future = ServiceFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let connection = self.clone();
        Box::pin(async move { connection.send(request).await })
    }
}

// ============================================================================
// Public Client
// ============================================================================

/// HTTP execution mechanism with connection pooling, TLS and tower middleware.
///
/// Cloning is cheap and clones share the connection pool, so one instance can
/// back several [`crate::Client`]s.
///
/// ```ignore
/// use std::time::Duration;
/// use whisk::HyperClient;
///
/// let http = HyperClient::builder()
///     .timeout(Duration::from_secs(10))
///     .with_logging()
///     .build();
/// ```
#[derive(Clone)]
pub struct HyperClient {
    service: SharedService,
    config: HttpConfig,
}

impl std::fmt::Debug for HyperClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HyperClient {
    /// Create a client with default settings and no middleware.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(HttpConfig::default())
    }

    /// Create a client with the given settings and no middleware.
    #[must_use]
    pub fn with_config(config: HttpConfig) -> Self {
        let connection = Connection::new(config.clone());
        Self {
            service: SharedService::new(BoxCloneService::new(connection)),
            config,
        }
    }

    /// Create a new client builder.
    #[must_use]
    pub fn builder() -> HyperClientBuilder {
        HyperClientBuilder::default()
    }

    /// Settings this client was built with.
    #[must_use]
    pub const fn config(&self) -> &HttpConfig {
        &self.config
    }
}

impl Default for HyperClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for HyperClient {
    async fn execute(&self, request: Request) -> Result<Response<Bytes>> {
        self.service.call(request).await
    }
}

impl Service<Request> for HyperClient {
    type Response = Response<Bytes>;
    type Error = Error;
    type Future = ServiceFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request) -> Self::Future {
        self.service.call(request)
    }
}

type LayerFn = Arc<dyn Fn(BoxedService) -> BoxedService + Send + Sync>;

/// Builder for [`HyperClient`].
#[derive(Default)]
pub struct HyperClientBuilder {
    config: HttpConfig,
    layers: Vec<LayerFn>,
}

impl std::fmt::Debug for HyperClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperClientBuilder")
            .field("config", &self.config)
            .field("layers_count", &self.layers.len())
            .finish()
    }
}

impl HyperClientBuilder {
    /// Replace all settings at once.
    #[must_use]
    pub fn config(mut self, config: HttpConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the whole-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the TCP connect timeout.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set the maximum idle connections per host.
    #[must_use]
    pub const fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.config.pool_idle_per_host = count;
        self
    }

    /// Set how long an idle connection is kept.
    #[must_use]
    pub const fn pool_idle_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config.pool_idle_timeout = timeout;
        self
    }

    /// Add a tower layer. The first layer added is the outermost.
    #[must_use]
    pub fn layer<L>(mut self, layer: L) -> Self
    where
        L: Layer<BoxedService> + Send + Sync + 'static,
        L::Service: Service<Request, Response = Response<Bytes>, Error = Error>
            + Clone
            + Send
            + 'static,
        <L::Service as Service<Request>>::Future: Send,
    {
        self.layers.push(Arc::new(move |service| {
            BoxCloneService::new(layer.layer(service))
        }));
        self
    }

    /// Log every request at `info` level.
    #[must_use]
    pub fn with_logging(self) -> Self {
        self.layer(LoggingLayer::new())
    }

    /// Log every request at `debug` level, headers included.
    #[must_use]
    pub fn with_debug_logging(self) -> Self {
        self.layer(LoggingLayer::debug())
    }

    /// Build the client.
    #[must_use]
    pub fn build(self) -> HyperClient {
        let mut service: BoxedService = BoxCloneService::new(Connection::new(self.config.clone()));

        // Wrap innermost first so the first layer added ends up outermost.
        for layer_fn in self.layers.into_iter().rev() {
            service = layer_fn(service);
        }

        HyperClient {
            service: SharedService::new(service),
            config: self.config,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::Method;

    #[test]
    fn client_default() {
        let client = HyperClient::new();
        assert_eq!(client.config().timeout, Duration::from_secs(30));
    }

    #[test]
    fn builder_settings() {
        let client = HyperClient::builder()
            .timeout(Duration::from_secs(3))
            .connect_timeout(Duration::from_secs(1))
            .pool_idle_per_host(2)
            .with_logging()
            .build();

        assert_eq!(client.config().timeout, Duration::from_secs(3));
        assert_eq!(client.config().connect_timeout, Duration::from_secs(1));
        assert_eq!(client.config().pool_idle_per_host, 2);
        assert!(format!("{client:?}").contains("HyperClient"));
    }

    #[test]
    fn hyper_request_carries_everything() {
        let url = url::Url::parse("https://whisk.example.com/actions/hello").expect("url");
        let request = Request::builder(Method::Put, url)
            .header("Content-Type", "application/json")
            .body(Bytes::from_static(b"{}"))
            .build();

        let hyper_request = Connection::to_hyper_request(request).expect("convertible");
        assert_eq!(hyper_request.method(), &http::Method::PUT);
        assert_eq!(
            hyper_request.uri().to_string(),
            "https://whisk.example.com/actions/hello"
        );
        assert_eq!(
            hyper_request
                .headers()
                .get("content-type")
                .and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
    }

    #[test]
    fn invalid_header_is_rejected_before_sending() {
        let url = url::Url::parse("https://whisk.example.com/").expect("url");
        let request = Request::builder(Method::Get, url)
            .header("X-Bad", "line\nbreak")
            .build();

        let err = Connection::to_hyper_request(request).expect_err("invalid header value");
        assert!(matches!(err, Error::InvalidRequest(_)));
    }
}
