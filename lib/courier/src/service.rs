//! Request execution.
//!
//! [`WebService`] runs an [`Endpoint`] end to end: build the request, send it
//! through the transport, classify the outcome. [`WebService::execute`] is the
//! async form; [`WebService::start`] takes a completion handler and delivers
//! the result on a [`DeliveryQueue`].

use std::marker::PhantomData;
use std::sync::Arc;

use tracing::{Instrument, debug, debug_span, warn};

use crate::{
    DeliveryQueue, Endpoint, HyperTransport, Transport, WebServiceError, classify, runtime,
};

/// Executes endpoints over a transport.
///
/// A service carries no per-call state: every call builds its own request
/// and gets its own outcome. Cloning shares the transport.
///
/// # Example
///
/// ```ignore
/// use courier::{HyperTransport, WebService};
///
/// let service = WebService::new(HyperTransport::new());
/// let names = service.execute(&SearchNames { query: "rust".into() }).await?;
/// ```
#[derive(Debug)]
pub struct WebService<T = HyperTransport> {
    transport: Arc<T>,
    delivery: DeliveryQueue,
}

impl<T> Clone for WebService<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            delivery: self.delivery.clone(),
        }
    }
}

impl<T> WebService<T> {
    /// Create a service delivering completions on [`DeliveryQueue::main`].
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self::with_delivery(transport, DeliveryQueue::main().clone())
    }

    /// Create a service delivering completions on `delivery`.
    #[must_use]
    pub fn with_delivery(transport: T, delivery: DeliveryQueue) -> Self {
        Self {
            transport: Arc::new(transport),
            delivery,
        }
    }

    /// The underlying transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Queue on which [`WebService::start`] delivers completions.
    #[must_use]
    pub const fn delivery(&self) -> &DeliveryQueue {
        &self.delivery
    }
}

impl Default for WebService<HyperTransport> {
    fn default() -> Self {
        Self::new(HyperTransport::new())
    }
}

impl<T: Transport> WebService<T> {
    /// Run an endpoint and return its decoded response.
    ///
    /// # Errors
    ///
    /// Every failure, from the transport, the status code or the decoder,
    /// is returned as a [`WebServiceError`].
    pub async fn execute<E>(&self, endpoint: &E) -> Result<E::Response, WebServiceError>
    where
        E: Endpoint + ?Sized,
    {
        let request = endpoint.build_request();
        let span = debug_span!(
            "webservice_request",
            method = %request.method(),
            url = %request.url()
        );

        async move {
            debug!("dispatching request");
            let outcome = self.transport.send(request).await;
            let result = classify(endpoint, outcome);

            match &result {
                Ok(_) => debug!("request succeeded"),
                Err(WebServiceError::Cancelled) => debug!("request cancelled"),
                Err(error) => warn!(%error, "request failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

impl<T: Transport + 'static> WebService<T> {
    /// Run an endpoint in the background and hand the result to `completion`.
    ///
    /// `completion` is called exactly once, on this service's
    /// [`DeliveryQueue`]. If the background task is dropped before it
    /// finishes, for instance because the runtime shuts down, it receives
    /// [`WebServiceError::Cancelled`]; if the task panics, it receives
    /// [`WebServiceError::NetworkingError`].
    ///
    /// Outside of a Tokio runtime the request runs on a shared fallback
    /// runtime. If that runtime cannot be started, `completion` receives
    /// [`WebServiceError::NetworkingError`].
    pub fn start<E, F>(&self, endpoint: E, completion: F)
    where
        E: Endpoint + Send + Sync + 'static,
        E::Response: Send + 'static,
        F: FnOnce(Result<E::Response, WebServiceError>) + Send + 'static,
    {
        let service = self.clone();
        let guard = CompletionGuard::new(self.delivery.clone(), completion);

        let Some(handle) = runtime::handle() else {
            guard.deliver(Err(WebServiceError::NetworkingError));
            return;
        };

        handle.spawn(async move {
            let result = service.execute(&endpoint).await;
            guard.deliver(result);
        });
    }
}

/// Hands a result to a completion handler exactly once, even if the task
/// running the request never finishes.
struct CompletionGuard<V, F>
where
    V: Send + 'static,
    F: FnOnce(Result<V, WebServiceError>) + Send + 'static,
{
    delivery: DeliveryQueue,
    completion: Option<F>,
    _value: PhantomData<fn() -> V>,
}

impl<V, F> CompletionGuard<V, F>
where
    V: Send + 'static,
    F: FnOnce(Result<V, WebServiceError>) + Send + 'static,
{
    fn new(delivery: DeliveryQueue, completion: F) -> Self {
        Self {
            delivery,
            completion: Some(completion),
            _value: PhantomData,
        }
    }

    fn deliver(mut self, result: Result<V, WebServiceError>) {
        if let Some(completion) = self.completion.take() {
            self.delivery.dispatch(move || completion(result));
        }
    }
}

impl<V, F> Drop for CompletionGuard<V, F>
where
    V: Send + 'static,
    F: FnOnce(Result<V, WebServiceError>) + Send + 'static,
{
    fn drop(&mut self) {
        if let Some(completion) = self.completion.take() {
            let error = if std::thread::panicking() {
                WebServiceError::NetworkingError
            } else {
                WebServiceError::Cancelled
            };
            debug!(%error, "request task ended without a result");
            self.delivery.dispatch(move || completion(Err(error)));
        }
    }
}
