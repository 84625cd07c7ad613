//! Prelude module for convenient imports.
//!
//! ```ignore
//! use trip_core::prelude::*;
//! ```

pub use crate::{
    Body, ContentType, Error, Method, Request, RequestBuilder, Response, Result, Transport,
    TransportExt, from_json, to_json,
};
