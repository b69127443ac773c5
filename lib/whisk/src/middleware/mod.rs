//! Tower middleware for [`crate::HyperClient`].
//!
//! Layers are added with [`crate::HyperClientBuilder::layer`]; the first one
//! added sees the request first.
//!
//! - [`LoggingLayer`] - logs requests and outcomes with `tracing`
//!
//! Any other tower layer whose service speaks `Request`/`Response<Bytes>`/
//! [`crate::Error`] can be plugged in the same way, e.g.
//! `tower::limit::ConcurrencyLimitLayer`.

mod logging;

pub use logging::{LogLevel, Logging, LoggingLayer};

pub use tower::{Layer, ServiceBuilder};
