//! Transport trait.
//!
//! A [`Transport`] sends one concrete [`Request`] and reports the raw
//! [`TransportOutcome`] exactly once. It never looks at status codes and
//! never retries; classification happens in [`crate::classify`].
//!
//! Implement it to plug in another network stack, or to fake responses in
//! tests.

use std::future::Future;
use std::sync::Arc;

use crate::{Request, TransportOutcome};

/// Sender of raw HTTP requests.
pub trait Transport: Send + Sync {
    /// Send a request and report what came back.
    ///
    /// "Not connected" and "cancelled" failures must carry the matching
    /// [`crate::TransportErrorKind`]; they surface as
    /// [`crate::WebServiceError::NoInternet`] and
    /// [`crate::WebServiceError::Cancelled`].
    fn send(&self, request: Request) -> impl Future<Output = TransportOutcome> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn send(&self, request: Request) -> impl Future<Output = TransportOutcome> + Send {
        (**self).send(request)
    }
}

impl<T: Transport> Transport for &T {
    fn send(&self, request: Request) -> impl Future<Output = TransportOutcome> + Send {
        (**self).send(request)
    }
}
