//! The transport capability.
//!
//! A transport sends one [`Request`] and yields either a [`Response`] or an
//! [`Error`](crate::Error), never both. Middleware in the `trip` crate wraps
//! one transport to produce another with the same contract.

use std::future::Future;

use bytes::Bytes;

use crate::{Method, Request, Response, Result};

/// Core transport trait.
///
/// Implementations must be safe to share between tasks: each call owns its
/// own request and any per-call state.
pub trait Transport: Send + Sync {
    /// Send a request and return the response.
    ///
    /// # Errors
    ///
    /// Returns an error if no usable response was obtained:
    /// - Network errors
    /// - TLS errors
    /// - Timeouts
    /// - Cancellation
    fn send(&self, request: Request<Bytes>) -> impl Future<Output = Result<Response>> + Send;
}

/// Extension trait for [`Transport`] with convenience methods.
pub trait TransportExt: Transport {
    /// Send a GET request.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the request fails.
    fn get(&self, url: &str) -> impl Future<Output = Result<Response>> + Send {
        async move {
            let url = url::Url::parse(url)?;
            self.send(Request::builder(Method::Get, url).build()).await
        }
    }

    /// Send a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the request fails.
    fn post_json<T: serde::Serialize + Send + Sync>(
        &self,
        url: &str,
        body: &T,
    ) -> impl Future<Output = Result<Response>> + Send {
        async move {
            let url = url::Url::parse(url)?;
            let request = Request::builder(Method::Post, url).json(body)?.build();
            self.send(request).await
        }
    }

    /// Send a PATCH request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the request fails.
    fn patch_json<T: serde::Serialize + Send + Sync>(
        &self,
        url: &str,
        body: &T,
    ) -> impl Future<Output = Result<Response>> + Send {
        async move {
            let url = url::Url::parse(url)?;
            let request = Request::builder(Method::Patch, url).json(body)?.build();
            self.send(request).await
        }
    }

    /// Send a DELETE request.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the request fails.
    fn delete(&self, url: &str) -> impl Future<Output = Result<Response>> + Send {
        async move {
            let url = url::Url::parse(url)?;
            self.send(Request::builder(Method::Delete, url).build()).await
        }
    }
}

// Blanket implementation for all Transport implementors
impl<T: Transport> TransportExt for T {}
