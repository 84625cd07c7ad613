//! Core types for trip, a composable request-interception layer for outbound HTTP.
//!
//! This crate provides the foundational types used by `trip`:
//! - [`Method`] - HTTP method enum
//! - [`Request`] and [`RequestBuilder`] - HTTP request types
//! - [`Response`] and [`Body`] - HTTP response with a single-consumption body
//! - [`Error`] and [`Result`] - Error handling
//! - [`Transport`] - The "send a request, get a response or a failure" capability
//! - [`StatusCode`] - HTTP status codes (re-exported from `http` crate)
//! - [`header`] - HTTP header names (re-exported from `http` crate)

mod body;
mod error;
mod method;
pub mod prelude;
mod request;
mod response;
mod transport;

pub use body::{Body, BodyStream, ContentType, from_json, to_json};
pub use error::{BoxError, Error, Result};
pub use method::Method;
pub use request::{Request, RequestBuilder};
pub use response::Response;
pub use transport::{Transport, TransportExt};

// Re-export http crate types for status codes and headers
pub use http::{StatusCode, header};
