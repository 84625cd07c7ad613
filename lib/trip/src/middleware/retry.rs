//! Retry middleware for HTTP requests.
//!
//! Sends a request up to a fixed number of times with a fixed delay in
//! between. Transport failures are always retried; responses only when their
//! status is in the caller's set. Whatever the last attempt produced is
//! returned as-is: an exhausted retryable response stays a response.
//!
//! Cancellation ([`Error::Cancelled`]) is never retried.

use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

use bytes::Bytes;
use tower::{Layer, Service, ServiceExt};
use tracing::debug;

use super::take_ready;
use crate::{Error, Request, Response, Result, ResponseFuture};

/// Status codes that usually signal a temporary condition.
///
/// Request Timeout, Too Early, Too Many Requests, Internal Server Error,
/// Bad Gateway, Service Unavailable, Gateway Timeout.
pub const RETRYABLE_STATUS_CODES: [u16; 7] = [408, 425, 429, 500, 502, 503, 504];

/// Layer that retries requests.
///
/// # Example
///
/// ```ignore
/// use std::time::Duration;
/// use trip::middleware::{RETRYABLE_STATUS_CODES, RetryLayer};
/// use tower::ServiceBuilder;
///
/// let service = ServiceBuilder::new()
///     .layer(RetryLayer::new(3, Duration::from_millis(50), RETRYABLE_STATUS_CODES)?)
///     .service(transport);
/// ```
#[derive(Debug, Clone)]
pub struct RetryLayer {
    attempts: u32,
    delay: Duration,
    status_codes: Arc<[u16]>,
}

impl RetryLayer {
    /// Create a retry layer making at most `attempts` sends, waiting `delay`
    /// between consecutive ones, and treating `status_codes` as retryable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] when `attempts` is zero.
    pub fn new(
        attempts: u32,
        delay: Duration,
        status_codes: impl IntoIterator<Item = u16>,
    ) -> Result<Self> {
        if attempts == 0 {
            return Err(Error::invalid_config("retry attempts must be at least 1"));
        }

        let mut status_codes: Vec<u16> = status_codes.into_iter().collect();
        status_codes.sort_unstable();
        status_codes.dedup();

        Ok(Self {
            attempts,
            delay,
            status_codes: status_codes.into(),
        })
    }

    /// Maximum number of sends per logical call.
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Wait between consecutive attempts.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Returns `true` if a response with this status should be retried.
    #[must_use]
    pub fn is_retryable_status(&self, status: u16) -> bool {
        self.status_codes.binary_search(&status).is_ok()
    }
}

impl<S> Layer<S> for RetryLayer {
    type Service = Retry<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Retry {
            inner,
            policy: self.clone(),
        }
    }
}

/// Service that retries failed requests.
#[derive(Debug, Clone)]
pub struct Retry<S> {
    inner: S,
    policy: RetryLayer,
}

/// What one attempt produced, as far as the loop is concerned.
enum Outcome {
    Done(Result<Response>),
    RetryResponse(Response),
    RetryError(Error),
}

impl RetryLayer {
    fn classify(&self, result: Result<Response>) -> Outcome {
        match result {
            Ok(response) if self.is_retryable_status(response.status()) => {
                Outcome::RetryResponse(response)
            }
            Err(err) if !err.is_cancelled() => Outcome::RetryError(err),
            result => Outcome::Done(result),
        }
    }
}

impl<S> Service<Request<Bytes>> for Retry<S>
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

    fn call(&mut self, request: Request<Bytes>) -> Self::Future {
        let policy = self.policy.clone();
        let mut inner = take_ready(&mut self.inner);

        Box::pin(async move {
            let max_attempts = policy.attempts;
            let mut attempt = 1;

            loop {
                let started = Instant::now();
                // The first attempt runs on the service `poll_ready` prepared
                let result = if attempt == 1 {
                    inner.call(request.clone()).await
                } else {
                    match inner.ready().await {
                        Ok(service) => service.call(request.clone()).await,
                        Err(err) => Err(err),
                    }
                };

                let outcome = policy.classify(result);
                let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

                match outcome {
                    Outcome::Done(result) => return result,
                    Outcome::RetryResponse(response) if attempt >= max_attempts => {
                        return Ok(response);
                    }
                    Outcome::RetryError(err) if attempt >= max_attempts => return Err(err),
                    Outcome::RetryResponse(response) => {
                        let status = response.status();
                        let discarded = response.drain().await;
                        debug!(
                            attempt,
                            max_attempts,
                            status,
                            discarded,
                            elapsed_ms,
                            "retryable status, retrying"
                        );
                    }
                    Outcome::RetryError(err) => {
                        debug!(
                            attempt,
                            max_attempts,
                            error = %err,
                            elapsed_ms,
                            "transport failure, retrying"
                        );
                    }
                }

                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_attempts_is_a_configuration_error() {
        let err = RetryLayer::new(0, Duration::ZERO, []).expect_err("invalid");
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn retryable_set_membership() {
        let layer = RetryLayer::new(3, Duration::ZERO, RETRYABLE_STATUS_CODES).expect("layer");

        for status in [408, 425, 429, 500, 502, 503, 504] {
            assert!(layer.is_retryable_status(status), "{status}");
        }
        for status in [200, 201, 301, 400, 401, 404, 501] {
            assert!(!layer.is_retryable_status(status), "{status}");
        }
    }

    #[test]
    fn empty_set_retries_no_status() {
        let layer = RetryLayer::new(3, Duration::ZERO, []).expect("layer");
        assert!(!layer.is_retryable_status(503));
    }

    #[test]
    fn status_codes_can_be_combined() {
        let layer = RetryLayer::new(
            2,
            Duration::from_millis(5),
            RETRYABLE_STATUS_CODES.into_iter().chain([409, 503]),
        )
        .expect("layer");

        assert!(layer.is_retryable_status(409));
        assert!(layer.is_retryable_status(503));
        assert_eq!(layer.status_codes.len(), 8);
        assert_eq!(layer.attempts(), 2);
        assert_eq!(layer.delay(), Duration::from_millis(5));
    }

    #[test]
    fn cancellation_is_terminal() {
        let layer = RetryLayer::new(3, Duration::ZERO, []).expect("layer");
        assert!(matches!(
            layer.classify(Err(Error::Cancelled)),
            Outcome::Done(Err(Error::Cancelled))
        ));
        assert!(matches!(
            layer.classify(Err(Error::Timeout)),
            Outcome::RetryError(Error::Timeout)
        ));
    }
}
