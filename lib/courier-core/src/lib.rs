//! Core types and traits for the courier declarative endpoint client.
//!
//! This crate provides the transport-agnostic pieces:
//! - [`Endpoint`] - Declarative endpoint descriptor with default behaviors
//! - [`Method`] - HTTP method enum
//! - [`Request`] and [`RequestBuilder`] - Concrete HTTP requests
//! - [`RawResponse`] and [`ResponseMetadata`] - Uninterpreted transport output
//! - [`Transport`] - Pluggable request sender
//! - [`classify`] - Turns a transport outcome into a typed result
//! - [`WebServiceError`] - Closed error taxonomy
//! - [`from_json`] and [`iso8601`] - Default response decoding

mod body;
mod classify;
mod endpoint;
mod error;
pub mod iso8601;
mod method;
pub mod prelude;
mod request;
mod response;
mod transport;

pub use body::{ContentType, DecodeError, RequestBody, from_json};
pub use classify::{MISSING_BODY, MISSING_STATUS, classify, validate_status};
pub use endpoint::Endpoint;
pub use error::{TransportError, TransportErrorKind, WebServiceError};
pub use method::Method;
pub use request::{Request, RequestBuilder};
pub use response::{RawResponse, ResponseMetadata, TransportOutcome};
pub use transport::Transport;

// Re-export http crate types for status codes and headers
pub use http::{StatusCode, header};
