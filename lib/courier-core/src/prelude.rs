//! Prelude module for convenient imports.
//!
//! ```ignore
//! use courier_core::prelude::*;
//! ```

pub use crate::{
    ContentType, DecodeError, Endpoint, Method, RawResponse, Request, RequestBody,
    RequestBuilder, ResponseMetadata, Transport, TransportError, TransportErrorKind,
    TransportOutcome, WebServiceError, from_json,
};
