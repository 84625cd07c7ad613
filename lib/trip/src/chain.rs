//! Chaining decorators around a base transport.
//!
//! A [`Decorator`] turns one transport into another. [`compose`] applies a
//! list of them so that the first decorator ends up outermost:
//!
//! ```text
//! compose(base, [A, B])  =>  A(B(base))
//! request:  caller -> A -> B -> base
//! response: base -> B -> A -> caller
//! ```

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use tower::Layer;
use tower::util::BoxCloneService;
use tower_service::Service;

use crate::{Error, HyperTransport, Request, Response};

/// Type-erased transport, the unit decorators consume and produce.
pub type BoxedTransport = BoxCloneService<Request<Bytes>, Response, Error>;

/// A function from "next transport" to "new transport".
#[derive(Clone)]
pub struct Decorator {
    wrap: Arc<dyn Fn(BoxedTransport) -> BoxedTransport + Send + Sync>,
}

impl fmt::Debug for Decorator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decorator").finish_non_exhaustive()
    }
}

impl Decorator {
    /// Adapt a Tower layer producing a transport.
    pub fn from_layer<L>(layer: L) -> Self
    where
        L: Layer<BoxedTransport> + Send + Sync + 'static,
        L::Service: Service<Request<Bytes>, Response = Response, Error = Error>
            + Clone
            + Send
            + 'static,
        <L::Service as Service<Request<Bytes>>>::Future: Send + 'static,
    {
        Self::from_fn(move |inner| BoxCloneService::new(layer.layer(inner)))
    }

    /// Adapt a plain wrapping function.
    pub fn from_fn<F>(wrap: F) -> Self
    where
        F: Fn(BoxedTransport) -> BoxedTransport + Send + Sync + 'static,
    {
        Self {
            wrap: Arc::new(wrap),
        }
    }

    /// Wrap `inner`, returning the decorated transport.
    #[must_use]
    pub fn wrap(&self, inner: BoxedTransport) -> BoxedTransport {
        (self.wrap)(inner)
    }
}

/// Box any compatible service as a [`BoxedTransport`].
pub fn boxed<S>(service: S) -> BoxedTransport
where
    S: Service<Request<Bytes>, Response = Response, Error = Error> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    BoxCloneService::new(service)
}

/// Wrap `base` with `decorators`, the first one outermost.
///
/// When `base` is `None` a fresh [`HyperTransport`] with the default
/// configuration is used. An empty decorator list returns the base unchanged.
pub fn compose<I>(base: Option<BoxedTransport>, decorators: I) -> BoxedTransport
where
    I: IntoIterator<Item = Decorator>,
    I::IntoIter: DoubleEndedIterator,
{
    let base = base.unwrap_or_else(|| boxed(HyperTransport::default()));
    decorators
        .into_iter()
        .rev()
        .fold(base, |inner, decorator| decorator.wrap(inner))
}

/// [`compose`] over the default transport.
pub fn compose_default<I>(decorators: I) -> BoxedTransport
where
    I: IntoIterator<Item = Decorator>,
    I::IntoIter: DoubleEndedIterator,
{
    compose(None, decorators)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use tower::ServiceExt;

    use super::*;
    use crate::{Body, Method};

    fn tagging(trace: &Arc<Mutex<Vec<String>>>, name: &'static str) -> Decorator {
        let trace = Arc::clone(trace);
        Decorator::from_fn(move |inner| {
            let trace = Arc::clone(&trace);
            boxed(tower::service_fn(move |request: Request<Bytes>| {
                let trace = Arc::clone(&trace);
                let inner = inner.clone();
                async move {
                    trace.lock().expect("lock").push(format!("{name} request"));
                    let response = inner.oneshot(request).await;
                    trace.lock().expect("lock").push(format!("{name} response"));
                    response
                }
            }))
        })
    }

    fn base(trace: &Arc<Mutex<Vec<String>>>) -> BoxedTransport {
        let trace = Arc::clone(trace);
        boxed(tower::service_fn(move |_request: Request<Bytes>| {
            let trace = Arc::clone(&trace);
            async move {
                trace.lock().expect("lock").push("base".to_string());
                Ok::<_, Error>(Response::new(200, HashMap::new(), Body::empty()))
            }
        }))
    }

    fn request() -> Request<Bytes> {
        let url = url::Url::parse("http://example.com/foo?bar=yes").expect("url");
        Request::builder(Method::Get, url).build()
    }

    #[tokio::test]
    async fn first_decorator_is_outermost() {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let transport = compose(
            Some(base(&trace)),
            [tagging(&trace, "A"), tagging(&trace, "B")],
        );

        transport.oneshot(request()).await.expect("response");

        assert_eq!(
            *trace.lock().expect("lock"),
            ["A request", "B request", "base", "B response", "A response"]
        );
    }

    #[tokio::test]
    async fn empty_list_returns_base() {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let transport = compose(Some(base(&trace)), Vec::new());

        let response = transport.oneshot(request()).await.expect("response");

        assert_eq!(response.status(), 200);
        assert_eq!(*trace.lock().expect("lock"), ["base"]);
    }
}
