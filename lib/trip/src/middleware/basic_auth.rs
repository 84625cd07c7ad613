//! Basic authentication middleware.
//!
//! Adds an `Authorization: Basic <base64(user:pass)>` header to all outgoing
//! requests. The credentials are encoded once, when the layer is built.

use base64::Engine;
use tower::Layer;

use super::{SetHeader, SetHeaderLayer};

/// Layer that adds basic authentication to requests.
///
/// # Example
///
/// ```ignore
/// use trip::middleware::BasicAuthLayer;
/// use tower::ServiceBuilder;
///
/// let service = ServiceBuilder::new()
///     .layer(BasicAuthLayer::new("username", "password"))
///     .service(transport);
/// ```
#[derive(Debug, Clone)]
pub struct BasicAuthLayer {
    header: SetHeaderLayer,
}

impl BasicAuthLayer {
    /// Create a new basic auth layer with the given username and password.
    pub fn new(username: impl AsRef<str>, password: impl AsRef<str>) -> Self {
        let credentials = format!("{}:{}", username.as_ref(), password.as_ref());
        let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
        Self {
            header: SetHeaderLayer::new("Authorization", format!("Basic {encoded}")),
        }
    }
}

impl<S> Layer<S> for BasicAuthLayer {
    type Service = SetHeader<S>;

    fn layer(&self, inner: S) -> Self::Service {
        self.header.layer(inner)
    }
}
