//! HTTP response handling.
//!
//! [`Response`] provides access to status, headers, and a single-consumption
//! [`Body`]. A response that is thrown away should be
//! [`drain`](Response::drain)ed so its connection can be reused.
//!
//! # Example
//!
//! ```ignore
//! let charge: Charge = response.json().await?;
//! ```

use std::collections::HashMap;

use bytes::Bytes;

use crate::Body;

/// HTTP response with status, headers, and body.
#[derive(Debug)]
pub struct Response<B = Body> {
    status: u16,
    headers: HashMap<String, String>,
    body: B,
}

impl<B> Response<B> {
    /// Creates a new response.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, String>, body: B) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Status line text, such as `200 OK` or `503 Service Unavailable`.
    ///
    /// Codes without a canonical reason phrase render as the bare number.
    #[must_use]
    pub fn status_text(&self) -> String {
        match http::StatusCode::from_u16(self.status)
            .ok()
            .and_then(|status| status.canonical_reason())
        {
            Some(reason) => format!("{} {reason}", self.status),
            None => self.status.to_string(),
        }
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Response body.
    #[must_use]
    pub const fn body(&self) -> &B {
        &self.body
    }

    /// Consume into body.
    #[must_use]
    pub fn into_body(self) -> B {
        self.body
    }

    /// Consume into (status, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (u16, HashMap<String, String>, B) {
        (self.status, self.headers, self.body)
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Status is 3xx.
    #[must_use]
    pub const fn is_redirection(&self) -> bool {
        self.status >= 300 && self.status < 400
    }

    /// Status is 4xx.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status >= 400 && self.status < 500
    }

    /// Status is 5xx.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status >= 500 && self.status < 600
    }

    /// Transform the body with a function.
    pub fn map_body<F, B2>(self, f: F) -> Response<B2>
    where
        F: FnOnce(B) -> B2,
    {
        Response {
            status: self.status,
            headers: self.headers,
            body: f(self.body),
        }
    }
}

impl Response<Body> {
    /// Read and discard the remaining body, releasing the connection.
    ///
    /// Returns the number of bytes discarded.
    pub async fn drain(self) -> u64 {
        self.body.drain().await
    }

    /// Buffer the body, keeping status and headers.
    ///
    /// # Errors
    ///
    /// Returns an error if reading any chunk fails.
    pub async fn buffered(self) -> crate::Result<Response<Bytes>> {
        let body = self.body.collect().await?;
        Ok(Response::new(self.status, self.headers, body))
    }

    /// Buffer the body and return it as bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails.
    pub async fn bytes(self) -> crate::Result<Bytes> {
        self.body.collect().await
    }

    /// Buffer the body and decode it as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or the body is not valid UTF-8.
    pub async fn text(self) -> crate::Result<String> {
        self.body.text().await
    }

    /// Buffer the body and deserialize it as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or deserialization fails.
    pub async fn json<T: serde::de::DeserializeOwned>(self) -> crate::Result<T> {
        self.body.json().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_basic() {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());

        let response = Response::new(200, headers, Body::from(r#"{"id":1}"#));

        assert_eq!(response.status(), 200);
        assert_eq!(response.header("Content-Type"), Some("application/json"));
        assert!(response.is_success());
        assert!(!response.is_client_error());
        assert!(!response.is_server_error());
    }

    #[test]
    fn response_status_checks() {
        let response = Response::new(301, HashMap::new(), Body::empty());
        assert!(response.is_redirection());

        let response = Response::new(404, HashMap::new(), Body::empty());
        assert!(response.is_client_error());

        let response = Response::new(500, HashMap::new(), Body::empty());
        assert!(response.is_server_error());
    }

    #[test]
    fn status_text_uses_canonical_reason() {
        let text = |status| Response::new(status, HashMap::new(), Body::empty()).status_text();

        assert_eq!(text(200), "200 OK");
        assert_eq!(text(425), "425 Too Early");
        assert_eq!(text(503), "503 Service Unavailable");
        assert_eq!(text(599), "599");
    }

    #[tokio::test]
    async fn response_json() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct Charge {
            id: u64,
            status: String,
        }

        let body = Body::from(r#"{"id":1,"status":"paid"}"#);
        let response = Response::new(200, HashMap::new(), body);

        let charge: Charge = response.json().await.expect("deserialize");
        assert_eq!(
            charge,
            Charge {
                id: 1,
                status: "paid".to_string()
            }
        );
    }

    #[tokio::test]
    async fn response_buffered_keeps_metadata() {
        let mut headers = HashMap::new();
        headers.insert("x-trace".to_string(), "abc".to_string());
        let response = Response::new(201, headers, Body::from("created"));

        let buffered = response.buffered().await.expect("buffer");

        assert_eq!(buffered.status(), 201);
        assert_eq!(buffered.header("X-Trace"), Some("abc"));
        assert_eq!(buffered.body().as_ref(), b"created");
    }

    #[tokio::test]
    async fn response_drain_reports_discarded_bytes() {
        let response = Response::new(503, HashMap::new(), Body::from("try later"));
        assert_eq!(response.drain().await, 9);
    }

    #[test]
    fn response_map_body() {
        let response = Response::new(200, HashMap::new(), Bytes::from("test"));
        let mapped = response.map_body(|b| b.len());

        assert_eq!(mapped.status(), 200);
        assert_eq!(*mapped.body(), 4);
    }
}
