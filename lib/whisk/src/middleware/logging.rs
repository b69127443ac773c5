//! Request/response logging with `tracing`.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use bytes::Bytes;
use tower::{Layer, Service};
use tracing::{Instrument, debug, info, info_span, warn};

use crate::{Error, Request, Response, Result};

const REDACTED: &str = "<redacted>";

/// Layer that logs every request and its outcome.
///
/// Each call runs inside an `http_request` span carrying the method and URL.
/// Responses outside `200..=299` and transport failures are logged at `warn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLayer {
    level: LogLevel,
}

/// Verbosity of [`LoggingLayer`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// `debug` events, request headers included (credentials redacted).
    Debug,
    /// `info` events, method/URL/status/elapsed only.
    #[default]
    Info,
}

impl LoggingLayer {
    /// Log at `info` level.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Log at `debug` level, with headers.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            level: LogLevel::Debug,
        }
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = Logging<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Logging {
            inner,
            level: self.level,
        }
    }
}

/// Service produced by [`LoggingLayer`].
#[derive(Debug, Clone)]
pub struct Logging<S> {
    inner: S,
    level: LogLevel,
}

fn loggable_headers(headers: &HashMap<String, String>) -> Vec<(&str, &str)> {
    let mut loggable: Vec<_> = headers
        .iter()
        .map(|(name, value)| {
            if name.eq_ignore_ascii_case("authorization") {
                (name.as_str(), REDACTED)
            } else {
                (name.as_str(), value.as_str())
            }
        })
        .collect();
    loggable.sort_unstable();
    loggable
}

impl<S> Service<Request> for Logging<S>
where
    S: Service<Request, Response = Response<Bytes>, Error = Error> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response<Bytes>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<()>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let method = request.method();
        let url = request.url().to_string();
        let level = self.level;
        let span = info_span!("http_request", %method, %url);

        match level {
            LogLevel::Debug => {
                let headers = loggable_headers(request.headers());
                let body_len = request.body().map_or(0, Bytes::len);
                span.in_scope(|| debug!(?headers, body_len, "sending request"));
            }
            LogLevel::Info => span.in_scope(|| info!("sending request")),
        }

        let mut inner = self.inner.clone();
        Box::pin(
            async move {
                let start = Instant::now();
                let result = inner.call(request).await;
                let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

                match &result {
                    Ok(response) if response.is_success() => {
                        let status = response.status();
                        let body_len = response.body().len();
                        match level {
                            LogLevel::Debug => debug!(status, body_len, elapsed_ms, "request completed"),
                            LogLevel::Info => info!(status, elapsed_ms, "request completed"),
                        }
                    }
                    Ok(response) => {
                        warn!(status = response.status(), elapsed_ms, "server returned an error status");
                    }
                    Err(err) => warn!(error = %err, elapsed_ms, "request failed"),
                }

                result
            }
            .instrument(span),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_levels() {
        assert_eq!(LoggingLayer::new().level, LogLevel::Info);
        assert_eq!(LoggingLayer::debug().level, LogLevel::Debug);
    }

    #[test]
    fn authorization_is_redacted() {
        let mut headers = HashMap::new();
        headers.insert("Authorization".to_string(), "Basic c2VjcmV0".to_string());
        headers.insert("Accept".to_string(), "application/json".to_string());

        assert_eq!(
            loggable_headers(&headers),
            vec![("Accept", "application/json"), ("Authorization", REDACTED)]
        );
    }
}
