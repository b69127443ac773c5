//! Core types for the whisk API client.
//!
//! This crate holds everything that does not perform I/O:
//! - [`Method`] - HTTP methods the API routes on
//! - [`Request`] and [`RequestBuilder`] - request descriptors
//! - [`Response`] - response envelope
//! - [`Error`], [`ApiError`], [`FieldError`] and [`Result`] - error handling
//! - [`check_response`] - non-2xx translation into [`ApiError`]
//! - [`Target`] - where a successful response body goes
//! - [`HttpClient`] - the execution mechanism trait

mod body;
mod client;
mod error;
mod method;
mod request;
mod response;
mod target;

pub use body::{ContentType, from_json, to_json};
pub use client::HttpClient;
pub use error::{ApiError, Error, FieldError, Result, check_response};
pub use method::Method;
pub use request::{Request, RequestBuilder};
pub use response::Response;
pub use target::Target;
