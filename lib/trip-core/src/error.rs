//! Error types for trip.

use derive_more::{Display, Error, From};

/// Boxed error produced by a foreign transport implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for trip operations.
///
/// A transport reports exactly one of a response or an `Error`. Every variant
/// except [`Error::Cancelled`] is a transport failure the retry middleware may
/// attempt again.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// Failure reported by a custom transport, displayed as-is.
    #[display("{_0}")]
    #[from(skip)]
    Transport(#[error(not(source))] BoxError),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// The caller abandoned the request.
    #[display("request cancelled")]
    #[from(skip)]
    Cancelled,

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// Middleware or client misconfiguration, detected at construction time.
    #[display("invalid configuration: {_0}")]
    #[from(skip)]
    InvalidConfig(#[error(not(source))] String),

    /// Reading a response body failed.
    #[display("body error: {_0}")]
    #[from(skip)]
    Body(#[error(not(source))] String),

    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    JsonDeserialization {
        /// JSON path to the error (e.g., "user.address.city").
        path: String,
        /// Error message.
        message: String,
    },

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Wrap an arbitrary transport failure.
    ///
    /// ```
    /// use trip_core::Error;
    ///
    /// let err = Error::transport("network error");
    /// assert_eq!(err.to_string(), "network error");
    /// ```
    #[must_use]
    pub fn transport(error: impl Into<BoxError>) -> Self {
        Self::Transport(error.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Create a body read error.
    #[must_use]
    pub fn body(message: impl Into<String>) -> Self {
        Self::Body(message.into())
    }

    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns `true` if the caller cancelled the request.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
