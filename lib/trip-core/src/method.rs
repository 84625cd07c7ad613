//! HTTP method types.

use std::str::FromStr;

use derive_more::Display;

/// Request methods a transport can send.
///
/// Displays as the upper-case wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(rename_all = "UPPERCASE")]
pub enum Method {
    /// Read a resource.
    Get,
    /// Submit data; needs an idempotency key to be retried safely.
    Post,
    /// Replace a resource.
    Put,
    /// Remove a resource.
    Delete,
    /// Modify part of a resource; needs an idempotency key like POST.
    Patch,
    /// Read headers only.
    Head,
    /// Ask which methods a resource allows.
    Options,
}

impl Method {
    /// Returns `true` when repeating the request has the same effect as
    /// sending it once.
    #[must_use]
    pub const fn is_idempotent(&self) -> bool {
        !matches!(self, Self::Post | Self::Patch)
    }

    /// Returns `true` for the methods a server can only deduplicate through an
    /// `Idempotency-Key` header: POST and PATCH.
    #[must_use]
    pub const fn wants_idempotency_key(&self) -> bool {
        !self.is_idempotent()
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Delete => Self::DELETE,
            Method::Patch => Self::PATCH,
            Method::Head => Self::HEAD,
            Method::Options => Self::OPTIONS,
        }
    }
}

impl TryFrom<http::Method> for Method {
    type Error = crate::Error;

    fn try_from(method: http::Method) -> Result<Self, Self::Error> {
        match method {
            http::Method::GET => Ok(Self::Get),
            http::Method::POST => Ok(Self::Post),
            http::Method::PUT => Ok(Self::Put),
            http::Method::DELETE => Ok(Self::Delete),
            http::Method::PATCH => Ok(Self::Patch),
            http::Method::HEAD => Ok(Self::Head),
            http::Method::OPTIONS => Ok(Self::Options),
            other => Err(crate::Error::invalid_request(format!(
                "unsupported HTTP method: {other}"
            ))),
        }
    }
}

impl FromStr for Method {
    type Err = crate::Error;

    /// Parse a method name, case-insensitively.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let method = http::Method::from_str(&name.to_ascii_uppercase())
            .map_err(|_| crate::Error::invalid_request(format!("invalid HTTP method: {name}")))?;
        Self::try_from(method)
    }
}
