//! Calling an endpoint directly.

use std::future::Future;

use crate::{Endpoint, Transport, WebService, WebServiceError};

/// Extension trait running an [`Endpoint`] without managing a [`WebService`].
///
/// `execute` and `start` use a fresh default service over the real network;
/// the `_with` variants take an injected one, e.g. over a
/// [`crate::StubTransport`].
///
/// # Example
///
/// ```ignore
/// use courier::prelude::*;
///
/// let contributors = Contributors { owner: "rust-lang".into(), repo: "rust".into() }
///     .execute()
///     .await?;
/// ```
pub trait EndpointExt: Endpoint {
    /// Run this endpoint over a fresh [`crate::HyperTransport`].
    fn execute(&self) -> impl Future<Output = Result<Self::Response, WebServiceError>> + Send
    where
        Self: Sync,
    {
        async move { WebService::default().execute(self).await }
    }

    /// Run this endpoint with an injected service.
    fn execute_with<'a, T: Transport>(
        &'a self,
        service: &'a WebService<T>,
    ) -> impl Future<Output = Result<Self::Response, WebServiceError>> + Send + 'a
    where
        Self: Sync,
    {
        service.execute(self)
    }

    /// Run this endpoint in the background over a fresh [`crate::HyperTransport`].
    ///
    /// See [`WebService::start`] for the delivery guarantees.
    fn start<F>(self, completion: F)
    where
        Self: Sized + Send + Sync + 'static,
        Self::Response: Send + 'static,
        F: FnOnce(Result<Self::Response, WebServiceError>) + Send + 'static,
    {
        WebService::default().start(self, completion);
    }

    /// Run this endpoint in the background with an injected service.
    fn start_with<T, F>(self, service: &WebService<T>, completion: F)
    where
        Self: Sized + Send + Sync + 'static,
        Self::Response: Send + 'static,
        T: Transport + 'static,
        F: FnOnce(Result<Self::Response, WebServiceError>) + Send + 'static,
    {
        service.start(self, completion);
    }
}

impl<E: Endpoint + ?Sized> EndpointExt for E {}
