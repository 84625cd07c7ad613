//! HTTP request building.
//!
//! Use [`Request::builder`] to construct requests with headers, query parameters, and bodies.
//!
//! # Example
//!
//! ```
//! use trip_core::{Request, Method};
//! use bytes::Bytes;
//!
//! let request = Request::<Bytes>::builder(Method::Get, "https://api.example.com".parse().unwrap())
//!     .header("Accept", "application/json")
//!     .query("page", "1")
//!     .build();
//! ```
//!
//! Header names are matched case-insensitively: setting `authorization`
//! replaces an existing `Authorization` entry instead of adding a second one.

use std::collections::HashMap;

use bytes::Bytes;

use crate::{ContentType, Method};

/// An HTTP request with method, URL, headers, and optional body.
///
/// The body is buffered so that the same request can be sent more than once.
#[derive(Debug, Clone)]
pub struct Request<B = Bytes> {
    method: Method,
    url: url::Url,
    headers: HashMap<String, String>,
    body: Option<B>,
}

impl<B> Request<B> {
    /// Creates a new [`RequestBuilder`].
    #[must_use]
    pub fn builder(method: Method, url: url::Url) -> RequestBuilder<B> {
        RequestBuilder::new(method, url)
    }

    /// Assemble a request from its parts.
    #[must_use]
    pub fn from_parts(
        method: Method,
        url: url::Url,
        headers: HashMap<String, String>,
        body: Option<B>,
    ) -> Self {
        Self {
            method,
            url,
            headers,
            body,
        }
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Request URL.
    #[must_use]
    pub fn url(&self) -> &url::Url {
        &self.url
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Mutable access to headers.
    ///
    /// Prefer [`Request::set_header`] which keeps names unique regardless of case.
    #[must_use]
    pub fn headers_mut(&mut self) -> &mut HashMap<String, String> {
        &mut self.headers
    }

    /// Single header value by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .or_else(|| {
                self.headers
                    .iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(name))
                    .map(|(_, value)| value)
            })
            .map(String::as_str)
    }

    /// Set a header, replacing any value already present under the same name
    /// in any letter case.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.headers.retain(|key, _| !key.eq_ignore_ascii_case(&name));
        self.headers.insert(name, value.into());
    }

    /// Remove a header (case-insensitive), returning its value.
    pub fn remove_header(&mut self, name: &str) -> Option<String> {
        let key = self
            .headers
            .keys()
            .find(|key| key.eq_ignore_ascii_case(name))
            .cloned()?;
        self.headers.remove(&key)
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&B> {
        self.body.as_ref()
    }

    /// Consume into (method, url, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (Method, url::Url, HashMap<String, String>, Option<B>) {
        (self.method, self.url, self.headers, self.body)
    }
}

/// Builder for constructing [`Request`] instances.
#[derive(Debug, Clone)]
pub struct RequestBuilder<B = Bytes> {
    request: Request<B>,
}

impl<B> RequestBuilder<B> {
    /// Creates a new builder.
    #[must_use]
    pub fn new(method: Method, url: url::Url) -> Self {
        Self {
            request: Request::from_parts(method, url, HashMap::new(), None),
        }
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.set_header(name, value);
        self
    }

    /// Sets multiple headers.
    #[must_use]
    pub fn headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        for (name, value) in headers {
            self.request.set_header(name, value);
        }
        self
    }

    /// Appends a query parameter to the URL.
    #[must_use]
    pub fn query(mut self, name: &str, value: &str) -> Self {
        self.request.url.query_pairs_mut().append_pair(name, value);
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: B) -> Self {
        self.request.body = Some(body);
        self
    }

    /// Builds the [`Request`].
    #[must_use]
    pub fn build(self) -> Request<B> {
        self.request
    }
}

impl RequestBuilder<Bytes> {
    /// Set a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn json<T: serde::Serialize>(self, value: &T) -> crate::Result<Self> {
        let body = crate::to_json(value)?;
        Ok(self
            .header("Content-Type", ContentType::Json.as_str())
            .body(body))
    }

    /// Set a plain text body.
    #[must_use]
    pub fn text(self, text: impl Into<String>) -> Self {
        self.header("Content-Type", ContentType::PlainText.as_str())
            .body(Bytes::from(text.into()))
    }
}
