//! Tower middleware layers for the trip transport chain.
//!
//! Every layer here wraps a transport (`Service<Request<Bytes>, Response =
//! Response, Error = Error>`) and produces another one with the same
//! signature, so layers compose freely with each other and with any
//! compatible Tower layer.
//!
//! # Available Layers
//!
//! - [`SetHeaderLayer`] - Sets a fixed header (also `User-Agent`)
//! - [`BearerAuthLayer`] - Adds `Authorization: Bearer <token>` header
//! - [`BasicAuthLayer`] - Adds `Authorization: Basic <base64>` header
//! - [`IdempotencyKeyLayer`] - Adds a random `Idempotency-Key` to POST and PATCH
//! - [`LoggerLayer`] - Logs one line per request through a callback
//! - [`RetryLayer`] - Retries transport failures and selected status codes
//!
//! # Ordering
//!
//! With [`compose`](crate::compose) and [`ClientBuilder`](crate::ClientBuilder)
//! the first layer listed is the outermost: it sees the request first and the
//! response last. Ordering matters for two pairs:
//!
//! - `IdempotencyKeyLayer` before `RetryLayer`: all attempts share one key.
//!   After it: every attempt gets its own key.
//! - `LoggerLayer` before `RetryLayer`: one line per call. After it: one line
//!   per attempt.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use trip::Client;
//! use trip::middleware::RETRYABLE_STATUS_CODES;
//!
//! let client = Client::builder()
//!     .with_bearer_token("my-token")
//!     .with_idempotency_key()
//!     .with_retry(3, Duration::from_millis(50), RETRYABLE_STATUS_CODES)?
//!     .build();
//! ```

mod basic_auth;
mod bearer_auth;
mod header;
mod idempotency_key;
mod logger;
mod retry;

pub use basic_auth::BasicAuthLayer;
pub use bearer_auth::BearerAuthLayer;
pub use header::{SetHeader, SetHeaderLayer};
pub use idempotency_key::{
    IDEMPOTENCY_KEY_HEADER, IdempotencyKey, IdempotencyKeyLayer, generate_idempotency_key,
};
pub use logger::{LogFn, Logger, LoggerLayer};
pub use retry::{RETRYABLE_STATUS_CODES, Retry, RetryLayer};

// Re-export tower types for convenience
pub use tower::{Layer, ServiceBuilder};

/// Take the service that was just polled ready, leaving a fresh clone behind.
///
/// `poll_ready` may reserve capacity on `inner` (a permit, a buffer slot),
/// and only that instance is allowed to `call`.
pub(crate) fn take_ready<S: Clone>(inner: &mut S) -> S {
    let clone = inner.clone();
    std::mem::replace(inner, clone)
}
