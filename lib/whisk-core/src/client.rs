//! The execution mechanism seam.
//!
//! [`HttpClient`] performs exactly one HTTP exchange. The default
//! implementation lives in the `whisk` crate (`HyperClient`); tests and
//! callers with special needs can plug in their own.

use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;

use crate::{Request, Response, Result};

/// Performs HTTP requests.
///
/// Implementations must return the response with its body fully read, for any
/// status code. They report network-level failures as
/// [`crate::Error::Connection`], [`crate::Error::Tls`] or
/// [`crate::Error::Timeout`]; status codes are not interpreted here.
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request and return the response.
    ///
    /// # Errors
    ///
    /// Returns an error if no response could be obtained.
    fn execute(&self, request: Request) -> impl Future<Output = Result<Response<Bytes>>> + Send;
}

impl<C: HttpClient> HttpClient for Arc<C> {
    fn execute(&self, request: Request) -> impl Future<Output = Result<Response<Bytes>>> + Send {
        C::execute(self, request)
    }
}

impl<C: HttpClient> HttpClient for &C {
    fn execute(&self, request: Request) -> impl Future<Output = Result<Response<Bytes>>> + Send {
        C::execute(self, request)
    }
}
