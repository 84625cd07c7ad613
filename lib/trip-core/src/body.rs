//! Response bodies and serialization helpers.
//!
//! A [`Body`] is read at most once. Whoever holds it when the response is
//! discarded must [`drain`](Body::drain) it, otherwise the underlying
//! connection cannot go back to the pool.

use std::fmt;
use std::pin::Pin;

use bytes::Bytes;
use futures_core::Stream;
use futures_util::StreamExt;

use crate::Result;

/// A streaming body: chunks of bytes arriving over time.
pub type BodyStream = Pin<Box<dyn Stream<Item = Result<Bytes>> + Send>>;

/// Single-consumption response body.
#[derive(Default)]
pub struct Body {
    kind: Kind,
}

#[derive(Default)]
enum Kind {
    #[default]
    Empty,
    Full(Bytes),
    Stream(BodyStream),
}

impl Body {
    /// An empty body.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A body backed by a stream of chunks.
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<Bytes>> + Send + 'static,
    {
        Self {
            kind: Kind::Stream(Box::pin(stream)),
        }
    }

    /// Returns `true` if the body is known to hold no bytes.
    ///
    /// A streaming body is never considered empty until it has been read.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match &self.kind {
            Kind::Empty => true,
            Kind::Full(bytes) => bytes.is_empty(),
            Kind::Stream(_) => false,
        }
    }

    /// Buffer the whole body.
    ///
    /// # Errors
    ///
    /// Returns an error if reading any chunk fails.
    pub async fn collect(self) -> Result<Bytes> {
        match self.kind {
            Kind::Empty => Ok(Bytes::new()),
            Kind::Full(bytes) => Ok(bytes),
            Kind::Stream(mut stream) => {
                let mut collected = Vec::new();
                while let Some(chunk) = stream.next().await {
                    collected.extend_from_slice(&chunk?);
                }
                Ok(Bytes::from(collected))
            }
        }
    }

    /// Read and discard everything left in the body, returning the number of
    /// bytes thrown away.
    ///
    /// A read error ends the drain early; the connection is then unusable
    /// anyway, so the error itself is not reported.
    pub async fn drain(self) -> u64 {
        match self.kind {
            Kind::Empty => 0,
            Kind::Full(bytes) => bytes.len() as u64,
            Kind::Stream(mut stream) => {
                let mut discarded = 0;
                while let Some(Ok(chunk)) = stream.next().await {
                    discarded += chunk.len() as u64;
                }
                discarded
            }
        }
    }

    /// Buffer the body and decode it as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or the body is not valid UTF-8.
    pub async fn text(self) -> Result<String> {
        let bytes = self.collect().await?;
        String::from_utf8(bytes.to_vec()).map_err(|e| crate::Error::body(e.to_string()))
    }

    /// Buffer the body and deserialize it as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or deserialization fails.
    pub async fn json<T: serde::de::DeserializeOwned>(self) -> Result<T> {
        let bytes = self.collect().await?;
        from_json(&bytes)
    }

    /// Consume into a chunk stream.
    #[must_use]
    pub fn into_stream(self) -> BodyStream {
        match self.kind {
            Kind::Empty => Box::pin(futures_util::stream::empty()),
            Kind::Full(bytes) => Box::pin(futures_util::stream::once(async move { Ok(bytes) })),
            Kind::Stream(stream) => stream,
        }
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            Kind::Empty => f.write_str("Body::Empty"),
            Kind::Full(bytes) => f.debug_tuple("Body::Full").field(&bytes.len()).finish(),
            Kind::Stream(_) => f.write_str("Body::Stream(..)"),
        }
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Self {
            kind: Kind::Full(bytes),
        }
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Bytes::from(bytes).into()
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Bytes::from(text).into()
    }
}

impl From<&'static str> for Body {
    fn from(text: &'static str) -> Self {
        Bytes::from_static(text.as_bytes()).into()
    }
}

/// Content type for request bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// JSON content type (`application/json`).
    Json,
    /// Plain text content type (`text/plain`).
    PlainText,
    /// Binary content type (`application/octet-stream`).
    OctetStream,
}

impl ContentType {
    /// Get the MIME type string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::PlainText => "text/plain",
            Self::OctetStream => "application/octet-stream",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serialize a value to JSON bytes.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Example
///
/// ```
/// use trip_core::to_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Charge { amount: u32 }
///
/// let bytes = to_json(&Charge { amount: 42 }).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"amount":42}"#);
/// ```
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// # Errors
///
/// Returns an error if JSON deserialization fails, with the error message
/// including the path to the problematic field (e.g., "charge.amount").
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}
