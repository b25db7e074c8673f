//! Declarative endpoint client for Rust.
//!
//! Describe an endpoint with the [`Endpoint`] trait, run it, and get either
//! the decoded response or one [`WebServiceError`].
//!
//! # Example
//!
//! ```ignore
//! use std::borrow::Cow;
//!
//! use courier::prelude::*;
//!
//! #[derive(Debug, Deserialize)]
//! pub struct Contributor {
//!     login: String,
//!     contributions: u32,
//! }
//!
//! struct Contributors {
//!     owner: String,
//!     repo: String,
//! }
//!
//! impl Endpoint for Contributors {
//!     type Response = Vec<Contributor>;
//!
//!     fn base_url(&self) -> Cow<'_, str> {
//!         Cow::Borrowed("https://api.github.com")
//!     }
//!
//!     fn path_components(&self) -> Vec<Cow<'_, str>> {
//!         vec!["repos".into(), (&*self.owner).into(), (&*self.repo).into(), "contributors".into()]
//!     }
//! }
//!
//! // async
//! let contributors = Contributors { owner: "rust-lang".into(), repo: "rust".into() }
//!     .execute()
//!     .await?;
//!
//! // completion handler, delivered on the `courier-main` thread
//! Contributors { owner: "rust-lang".into(), repo: "rust".into() }.start(|result| {
//!     match result {
//!         Ok(contributors) => println!("{} contributors", contributors.len()),
//!         Err(WebServiceError::NoInternet) => println!("offline"),
//!         Err(err) => println!("failed: {err}"),
//!     }
//! });
//! ```

mod config;
mod connector;
mod delivery;
mod endpoint_ext;
mod logging;
pub mod prelude;
mod runtime;
mod service;
mod stub;
mod transport;

pub use config::{ClientConfig, ClientConfigBuilder};
pub use delivery::{DeliveryQueue, MAIN_QUEUE_NAME};
pub use endpoint_ext::EndpointExt;
pub use logging::{LogLevel, Logging, LoggingLayer};
pub use runtime::RUNTIME_THREAD_NAME;
pub use service::WebService;
pub use stub::StubTransport;
pub use transport::{HyperTransport, HyperTransportBuilder};

// Re-export tower for layer composition
pub use tower;

// Re-export core types
pub use courier_core::{
    ContentType, DecodeError, Endpoint, MISSING_BODY, MISSING_STATUS, Method, RawResponse,
    Request, RequestBody, RequestBuilder, ResponseMetadata, Transport, TransportError,
    TransportErrorKind, TransportOutcome, WebServiceError, classify, from_json, iso8601,
    validate_status,
};

// Re-export http types for status codes and headers
pub use courier_core::{StatusCode, header};
