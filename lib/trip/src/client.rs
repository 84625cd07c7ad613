//! Composed client: a decorated transport behind a shareable handle.

use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;

use bytes::Bytes;
use tower::Layer;
use tower_service::Service;

use crate::chain::{BoxedTransport, Decorator, boxed, compose};
use crate::middleware::{
    BasicAuthLayer, BearerAuthLayer, IdempotencyKeyLayer, LoggerLayer, RetryLayer, SetHeaderLayer,
};
use crate::{
    Error, HyperTransport, Request, Response, ResponseFuture, Result,
    config::{ClientConfig, ClientConfigBuilder},
};

/// Thread-safe wrapper for [`BoxedTransport`].
///
/// `BoxCloneService` is `Send` but not `Sync`; the mutex is only held long
/// enough to clone the service for one call.
#[derive(Clone)]
struct SyncTransport {
    inner: Arc<Mutex<BoxedTransport>>,
}

impl SyncTransport {
    fn new(transport: BoxedTransport) -> Self {
        Self {
            inner: Arc::new(Mutex::new(transport)),
        }
    }

    fn call(&self, request: Request<Bytes>) -> ResponseFuture {
        let mut transport = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone();

        Box::pin(async move {
            std::future::poll_fn(|cx| transport.poll_ready(cx)).await?;
            transport.call(request).await
        })
    }
}

/// HTTP client made of a base transport wrapped in decorators.
///
/// Cheap to clone and safe to share between tasks.
///
/// # Example
///
/// ```ignore
/// use std::time::Duration;
/// use trip::{Client, TransportExt};
/// use trip::middleware::RETRYABLE_STATUS_CODES;
///
/// let client = Client::builder()
///     .with_bearer_token(std::env::var("API_TOKEN")?)
///     .with_retry(3, Duration::from_millis(50), RETRYABLE_STATUS_CODES)?
///     .build();
///
/// let response = client.get("https://api.example.com/endpoint").await?;
/// ```
#[derive(Clone)]
pub struct Client {
    transport: SyncTransport,
    config: ClientConfig,
    decorators: usize,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .field("decorators", &self.decorators)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a client over the default transport, without decorators.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new client builder.
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Configuration of the default transport.
    ///
    /// Meaningless when the builder was given a custom base transport.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl trip_core::Transport for Client {
    async fn send(&self, request: Request<Bytes>) -> Result<Response> {
        self.transport.call(request).await
    }
}

impl Service<Request<Bytes>> for Client {
    type Response = Response;
    type Error = Error;
    type Future = ResponseFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<()>> {
        // Readiness of the inner chain is awaited per call
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<Bytes>) -> Self::Future {
        self.transport.call(request)
    }
}

/// Builder for [`Client`].
///
/// Decorators are applied in the order they are added: the first one added
/// is the outermost and sees every request first.
///
/// # Example
///
/// ```ignore
/// use trip::Client;
/// use trip::middleware::LoggerLayer;
///
/// let client = Client::builder()
///     .layer(LoggerLayer::tracing())
///     .with_basic_auth("username", "password")
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct ClientBuilder {
    config: ClientConfigBuilder,
    base: Option<BoxedTransport>,
    decorators: Vec<Decorator>,
}

impl ClientBuilder {
    // ========================================================================
    // Default Transport Configuration
    // ========================================================================

    /// Set the request timeout of the default transport.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.timeout(timeout);
        self
    }

    /// Set the connection timeout of the default transport.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.connect_timeout(timeout);
        self
    }

    /// Set the maximum idle connections per host.
    #[must_use]
    pub fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.config = self.config.pool_idle_per_host(count);
        self
    }

    /// Set the idle connection timeout.
    #[must_use]
    pub fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.pool_idle_timeout(timeout);
        self
    }

    /// Replace the default transport with `base`.
    #[must_use]
    pub fn transport<S>(mut self, base: S) -> Self
    where
        S: Service<Request<Bytes>, Response = Response, Error = Error> + Clone + Send + 'static,
        S::Future: Send + 'static,
    {
        self.base = Some(boxed(base));
        self
    }

    // ========================================================================
    // Generic Decorator API
    // ========================================================================

    /// Add a Tower layer.
    #[must_use]
    pub fn layer<L>(self, layer: L) -> Self
    where
        L: Layer<BoxedTransport> + Send + Sync + 'static,
        L::Service: Service<Request<Bytes>, Response = Response, Error = Error>
            + Clone
            + Send
            + 'static,
        <L::Service as Service<Request<Bytes>>>::Future: Send + 'static,
    {
        self.decorator(Decorator::from_layer(layer))
    }

    /// Alias for [`ClientBuilder::layer`].
    #[must_use]
    pub fn with<L>(self, layer: L) -> Self
    where
        L: Layer<BoxedTransport> + Send + Sync + 'static,
        L::Service: Service<Request<Bytes>, Response = Response, Error = Error>
            + Clone
            + Send
            + 'static,
        <L::Service as Service<Request<Bytes>>>::Future: Send + 'static,
    {
        self.layer(layer)
    }

    /// Add a decorator.
    #[must_use]
    pub fn decorator(mut self, decorator: Decorator) -> Self {
        self.decorators.push(decorator);
        self
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// Set a header on every request.
    #[must_use]
    pub fn with_header(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.layer(SetHeaderLayer::new(name, value))
    }

    /// Set `User-Agent` on every request.
    #[must_use]
    pub fn with_user_agent(self, agent: impl Into<String>) -> Self {
        self.layer(SetHeaderLayer::user_agent(agent))
    }

    /// Add bearer token authentication.
    #[must_use]
    pub fn with_bearer_token(self, token: impl AsRef<str>) -> Self {
        self.layer(BearerAuthLayer::new(token))
    }

    /// Add basic authentication.
    #[must_use]
    pub fn with_basic_auth(self, username: impl AsRef<str>, password: impl AsRef<str>) -> Self {
        self.layer(BasicAuthLayer::new(username, password))
    }

    /// Add an `Idempotency-Key` to POST and PATCH requests.
    #[must_use]
    pub fn with_idempotency_key(self) -> Self {
        self.layer(IdempotencyKeyLayer::new())
    }

    /// Log every request through `log`.
    #[must_use]
    pub fn with_logger<F>(self, log: F) -> Self
    where
        F: Fn(std::fmt::Arguments<'_>) + Send + Sync + 'static,
    {
        self.layer(LoggerLayer::new(log))
    }

    /// Log every request as a `tracing` event.
    #[must_use]
    pub fn with_tracing_logger(self) -> Self {
        self.layer(LoggerLayer::tracing())
    }

    /// Retry transport failures and the given status codes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] when `attempts` is zero.
    pub fn with_retry(
        self,
        attempts: u32,
        delay: Duration,
        status_codes: impl IntoIterator<Item = u16>,
    ) -> Result<Self> {
        Ok(self.layer(RetryLayer::new(attempts, delay, status_codes)?))
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Build the client.
    #[must_use]
    pub fn build(self) -> Client {
        let config = self.config.build();
        let base = self
            .base
            .unwrap_or_else(|| boxed(HyperTransport::new(config.clone())));
        let decorators = self.decorators.len();

        Client {
            transport: SyncTransport::new(compose(Some(base), self.decorators)),
            config,
            decorators,
        }
    }
}
