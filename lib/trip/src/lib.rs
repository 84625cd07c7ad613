//! Composable request interception for outbound HTTP.
//!
//! Attach cross-cutting behavior (static headers, bearer/basic auth,
//! idempotency keys, logging, retries) to every outgoing call without
//! touching call sites. Each behavior is a Tower layer wrapping a transport;
//! [`compose`] and [`ClientBuilder`] stack them, first one outermost.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use trip::prelude::*;
//! use trip::middleware::RETRYABLE_STATUS_CODES;
//!
//! let client = Client::builder()
//!     .with_bearer_token(std::env::var("API_TOKEN")?)
//!     .with_retry(3, Duration::from_millis(50), RETRYABLE_STATUS_CODES)?
//!     .build();
//!
//! let response = client.get("https://api.example.com/endpoint").await?;
//! ```

mod chain;
mod client;
mod config;
mod connector;
pub mod middleware;
pub mod prelude;
mod transport;

pub use chain::{BoxedTransport, Decorator, boxed, compose, compose_default};
pub use client::{Client, ClientBuilder};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use transport::{HyperTransport, ResponseFuture};

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use trip_core::{
    Body, BodyStream, BoxError, ContentType, Error, Method, Request, RequestBuilder, Response,
    Result, Transport, TransportExt, from_json, to_json,
};

// Re-export http types for status codes and headers
pub use trip_core::{StatusCode, header};

// Re-export url for building requests
pub use url;
