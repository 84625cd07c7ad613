//! Bearer token authentication middleware.
//!
//! Adds an `Authorization: Bearer <token>` header to all outgoing requests.

use tower::Layer;

use super::{SetHeader, SetHeaderLayer};

/// Layer that adds bearer token authentication to requests.
///
/// # Example
///
/// ```ignore
/// use trip::middleware::BearerAuthLayer;
/// use tower::ServiceBuilder;
///
/// let service = ServiceBuilder::new()
///     .layer(BearerAuthLayer::new("my-secret-token"))
///     .service(transport);
/// ```
#[derive(Debug, Clone)]
pub struct BearerAuthLayer {
    header: SetHeaderLayer,
}

impl BearerAuthLayer {
    /// Create a new bearer auth layer with the given token.
    pub fn new(token: impl AsRef<str>) -> Self {
        Self {
            header: SetHeaderLayer::new("Authorization", format!("Bearer {}", token.as_ref())),
        }
    }
}

impl<S> Layer<S> for BearerAuthLayer {
    type Service = SetHeader<S>;

    fn layer(&self, inner: S) -> Self::Service {
        self.header.layer(inner)
    }
}
