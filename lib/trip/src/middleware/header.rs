//! Static header middleware.
//!
//! Sets one header to a value fixed at construction time on every request.
//! The authentication layers are thin constructors over this one.

use std::sync::Arc;
use std::task::{Context, Poll};

use bytes::Bytes;
use tower::{Layer, Service};

use super::take_ready;
use crate::{Error, Request, Response, Result, ResponseFuture};

/// Layer that sets a header on every request.
///
/// # Example
///
/// ```ignore
/// use trip::middleware::SetHeaderLayer;
/// use tower::ServiceBuilder;
///
/// let service = ServiceBuilder::new()
///     .layer(SetHeaderLayer::new("X-Api-Version", "2024-06-01"))
///     .service(transport);
/// ```
#[derive(Debug, Clone)]
pub struct SetHeaderLayer {
    name: Arc<str>,
    value: Arc<str>,
}

impl SetHeaderLayer {
    /// Set `name` to `value` on every request, replacing any existing value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: Arc::from(name.into()),
            value: Arc::from(value.into()),
        }
    }

    /// Set the `User-Agent` header.
    pub fn user_agent(agent: impl Into<String>) -> Self {
        Self::new("User-Agent", agent)
    }

    /// Header name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Header value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl<S> Layer<S> for SetHeaderLayer {
    type Service = SetHeader<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SetHeader {
            inner,
            name: Arc::clone(&self.name),
            value: Arc::clone(&self.value),
        }
    }
}

/// Service that sets a header before delegating.
#[derive(Debug, Clone)]
pub struct SetHeader<S> {
    inner: S,
    name: Arc<str>,
    value: Arc<str>,
}

impl<S> Service<Request<Bytes>> for SetHeader<S>
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
        request.set_header(self.name.as_ref(), self.value.as_ref());

        let mut inner = take_ready(&mut self.inner);
        Box::pin(async move { inner.call(request).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_agent_targets_user_agent_header() {
        let layer = SetHeaderLayer::user_agent("Mozilla/5.0 (compatible; trip/0.1)");
        assert_eq!(layer.name(), "User-Agent");
        assert_eq!(layer.value(), "Mozilla/5.0 (compatible; trip/0.1)");
    }

    #[test]
    fn layer_clone_shares_values() {
        let layer = SetHeaderLayer::new("X-Foo", "bar");
        let cloned = layer.clone();
        assert!(Arc::ptr_eq(&layer.value, &cloned.value));
    }
}
