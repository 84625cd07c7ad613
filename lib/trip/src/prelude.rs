//! Prelude module for convenient imports.
//!
//! ```ignore
//! use trip::prelude::*;
//! ```

pub use crate::{
    Body, Client, ClientBuilder, ClientConfig, Decorator, Error, Method, Request, RequestBuilder,
    Response, Result, StatusCode, Transport, TransportExt, compose, compose_default,
};
