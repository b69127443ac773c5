//! Async client for OpenWhisk-style serverless APIs.
//!
//! A [`Client`] owns one [`Transport`] that builds requests from relative
//! paths, sends them through an [`HttpClient`] (by default [`HyperClient`]),
//! turns non-2xx responses into [`ApiError`] and decodes the rest. Resource
//! services (actions, triggers, rules, activations, packages, SDK downloads)
//! are thin facades on that transport.
//!
//! # Example
//!
//! ```no_run
//! use whisk::prelude::*;
//!
//! # async fn run() -> whisk::Result<()> {
//! let config = ClientConfig::builder()
//!     .base_url("https://openwhisk.example.com/api/v1/namespaces/_/")
//!     .build();
//! let mut client = Client::from_config(config)?;
//! client.auth("uuid:secret")?;
//!
//! let hello = client.actions().get("hello").await?;
//! let result = client
//!     .actions()
//!     .invoke(&hello.name, &serde_json::json!({"name": "world"}), true)
//!     .await?;
//! # let _ = result;
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod hyper_client;
pub mod middleware;
pub mod prelude;
mod services;
mod transport;
pub mod types;

pub use client::{Client, Listing};
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_BASE_URL, HttpConfig, VERSION};
pub use hyper_client::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};
pub use services::{
    ActionService, ActivationService, ListService, PackageService, RuleService, SdkService,
    TriggerService,
};
pub use transport::{Credential, Transport};

// Re-export tower for middleware composition
pub use tower;

pub use whisk_core::{
    ApiError, ContentType, Error, FieldError, HttpClient, Method, Request, RequestBuilder,
    Response, Result, Target, check_response, from_json, to_json,
};
