//! Request logging middleware.
//!
//! Hands one line per request to a caller-supplied callback, so any logger
//! with a printf-like entry point can be plugged in:
//!
//! ```text
//! POST https://example.com/endpoint?key=value - 200 OK - 12.34ms
//! POST https://example.com/endpoint?key=value - error:"network error" - 12.34ms
//! ```
//!
//! Place the logger before [`RetryLayer`](super::RetryLayer) to get one line
//! per logical call, after it to get one line per attempt.

use std::fmt;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;

use bytes::Bytes;
use tower::{Layer, Service};
use tracing::{Instrument, Level, span};

use super::take_ready;
use crate::{Error, Request, Response, Result, ResponseFuture};

/// Log callback receiving a preformatted line.
pub type LogFn = Arc<dyn Fn(fmt::Arguments<'_>) + Send + Sync>;

/// Layer that logs every request through a callback.
///
/// # Example
///
/// ```ignore
/// use trip::middleware::LoggerLayer;
/// use tower::ServiceBuilder;
///
/// let service = ServiceBuilder::new()
///     .layer(LoggerLayer::new(|line| eprintln!("{line}")))
///     .service(transport);
/// ```
#[derive(Clone)]
pub struct LoggerLayer {
    log: LogFn,
}

impl fmt::Debug for LoggerLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerLayer").finish_non_exhaustive()
    }
}

impl LoggerLayer {
    /// Create a logger layer calling `log` once per request.
    pub fn new<F>(log: F) -> Self
    where
        F: Fn(fmt::Arguments<'_>) + Send + Sync + 'static,
    {
        Self { log: Arc::new(log) }
    }

    /// Create a logger layer from a callback that may be missing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] when `log` is `None`.
    pub fn from_optional<F>(log: Option<F>) -> Result<Self>
    where
        F: Fn(fmt::Arguments<'_>) + Send + Sync + 'static,
    {
        log.map(Self::new)
            .ok_or_else(|| Error::invalid_config("logger requires a log function"))
    }

    /// Create a logger layer emitting each line as a `tracing` info event.
    #[must_use]
    pub fn tracing() -> Self {
        Self::new(|line| tracing::info!("{line}"))
    }
}

impl<S> Layer<S> for LoggerLayer {
    type Service = Logger<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Logger {
            inner,
            log: Arc::clone(&self.log),
        }
    }
}

/// Service that logs requests and their outcome.
#[derive(Clone)]
pub struct Logger<S> {
    inner: S,
    log: LogFn,
}

impl<S: fmt::Debug> fmt::Debug for Logger<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

impl<S> Service<Request<Bytes>> for Logger<S>
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
        let method = request.method();
        let url = request.url().to_string();
        let log = Arc::clone(&self.log);

        let span = span!(Level::INFO, "http_request", %method, %url);

        let mut inner = take_ready(&mut self.inner);
        Box::pin(
            async move {
                let start = Instant::now();

                let result = inner.call(request).await;
                let elapsed = start.elapsed();

                match &result {
                    Ok(response) => {
                        log(format_args!(
                            "{method} {url} - {} - {elapsed:?}",
                            response.status_text()
                        ));
                    }
                    Err(err) => {
                        log(format_args!(
                            "{method} {url} - error:{:?} - {elapsed:?}",
                            err.to_string()
                        ));
                    }
                }

                result
            }
            .instrument(span),
        )
    }
}
