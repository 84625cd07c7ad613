//! Default transport backed by hyper-util.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_util::TryStreamExt;
use http_body_util::{BodyStream, Full};
use hyper_rustls::HttpsConnector;
use hyper_util::{
    client::legacy::{Client, connect::HttpConnector},
    rt::TokioExecutor,
};
use tower_service::Service;

use crate::{Body, ClientConfig, Error, Request, Response, Result, connector::https_connector};

/// Future returned by every transport in the chain.
pub type ResponseFuture = Pin<Box<dyn Future<Output = Result<Response>> + Send + 'static>>;

/// The base transport used when no other is supplied: hyper with a pooled,
/// rustls-enabled connector.
///
/// Response bodies are streamed; callers that discard a response should drain
/// it so the connection returns to the pool.
#[derive(Clone)]
pub struct HyperTransport {
    inner: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
    config: ClientConfig,
}

impl std::fmt::Debug for HyperTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperTransport")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for HyperTransport {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl HyperTransport {
    /// Create a transport with the given configuration.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        let connector = https_connector(&config);

        let inner = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_idle_per_host)
            .build(connector);

        Self { inner, config }
    }

    /// Get the transport configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn build_hyper_request(&self, request: Request<Bytes>) -> Result<http::Request<Full<Bytes>>> {
        let (method, url, headers, body) = request.into_parts();

        let mut builder = http::Request::builder()
            .method(http::Method::from(method))
            .uri(url.as_str());

        let has_user_agent = headers
            .keys()
            .any(|name| name.eq_ignore_ascii_case("user-agent"));
        if let (false, Some(agent)) = (has_user_agent, &self.config.user_agent) {
            builder = builder.header(http::header::USER_AGENT, agent.as_str());
        }

        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let body = body.map_or_else(Full::default, Full::new);
        builder
            .body(body)
            .map_err(|e| Error::invalid_request(e.to_string()))
    }

    fn extract_headers(headers: &http::HeaderMap) -> HashMap<String, String> {
        headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect()
    }

    async fn execute(&self, request: Request<Bytes>) -> Result<Response> {
        let hyper_request = self.build_hyper_request(request)?;

        let response = tokio::time::timeout(self.config.timeout, self.inner.request(hyper_request))
            .await
            .map_err(|_| Error::Timeout)?
            .map_err(Self::map_hyper_error)?;

        let status = response.status().as_u16();
        let headers = Self::extract_headers(response.headers());

        let chunks = BodyStream::new(response.into_body())
            .map_ok(|frame| frame.into_data().unwrap_or_default())
            .map_err(|e| Error::body(e.to_string()));

        Ok(Response::new(status, headers, Body::from_stream(chunks)))
    }

    #[allow(clippy::needless_pass_by_value)]
    fn map_hyper_error(err: hyper_util::client::legacy::Error) -> Error {
        let msg = err.to_string();

        if err.is_connect() {
            return Error::connection(msg);
        }

        if msg.contains("ssl") || msg.contains("tls") || msg.contains("certificate") {
            return Error::tls(msg);
        }

        Error::connection(msg)
    }
}

impl Service<Request<Bytes>> for HyperTransport {
    type Response = Response;
    type Error = Error;
    type Future = ResponseFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<Bytes>) -> Self::Future {
        let transport = self.clone();
        Box::pin(async move { transport.execute(request).await })
    }
}

impl trip_core::Transport for HyperTransport {
    async fn send(&self, request: Request<Bytes>) -> Result<Response> {
        self.execute(request).await
    }
}
