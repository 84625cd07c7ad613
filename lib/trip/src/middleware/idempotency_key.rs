//! Idempotency key middleware.
//!
//! Generates a random `Idempotency-Key` for every POST and PATCH request that
//! passes through the layer. Where the layer sits relative to
//! [`RetryLayer`](super::RetryLayer) decides what a retry sends:
//!
//! - outside retry (added before it): one key per logical call, shared by all attempts
//! - inside retry (added after it): a fresh key on every attempt

use std::task::{Context, Poll};

use bytes::Bytes;
use rand::RngCore;
use rand::rngs::OsRng;
use tower::{Layer, Service};

use super::take_ready;
use crate::{Error, Request, Response, Result, ResponseFuture};

/// Header carrying the generated key.
pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// Generate a key from 128 bits of OS randomness, hex-encoded.
#[must_use]
pub fn generate_idempotency_key() -> String {
    let mut buf = [0u8; 16];
    OsRng.fill_bytes(&mut buf);
    hex::encode(buf)
}

/// Layer that attaches an idempotency key to mutating requests.
///
/// # Example
///
/// ```ignore
/// use trip::middleware::IdempotencyKeyLayer;
/// use tower::ServiceBuilder;
///
/// let service = ServiceBuilder::new()
///     .layer(IdempotencyKeyLayer::new())
///     .service(transport);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct IdempotencyKeyLayer;

impl IdempotencyKeyLayer {
    /// Create a new idempotency key layer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for IdempotencyKeyLayer {
    type Service = IdempotencyKey<S>;

    fn layer(&self, inner: S) -> Self::Service {
        IdempotencyKey { inner }
    }
}

/// Service that attaches an idempotency key to POST and PATCH requests.
#[derive(Debug, Clone)]
pub struct IdempotencyKey<S> {
    inner: S,
}

impl<S> Service<Request<Bytes>> for IdempotencyKey<S>
where
    S: Service<Request<Bytes>, Response = Response, Error = Error> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = Error;
    type Future = ResponseFuture;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<()>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<Bytes>) -> Self::Future {
        if request.method().wants_idempotency_key() {
            request.set_header(IDEMPOTENCY_KEY_HEADER, generate_idempotency_key());
        }

        let mut inner = take_ready(&mut self.inner);
        Box::pin(async move { inner.call(request).await })
    }
}
