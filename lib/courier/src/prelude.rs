//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits for easy
//! glob importing:
//!
//! ```ignore
//! use courier::prelude::*;
//! ```

pub use crate::{
    ContentType, Endpoint, EndpointExt, HyperTransport, Method, RequestBody, StubTransport,
    Transport, TransportError, WebService, WebServiceError, from_json, iso8601,
};
pub use serde::{Deserialize, Serialize};
