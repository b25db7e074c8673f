//! In-memory transport for tests.
//!
//! [`StubTransport`] never touches the network. Preset the body, the status
//! code and headers, or a transport error; every request it receives is
//! recorded and can be observed before the outcome is delivered.
//!
//! # Example
//!
//! ```ignore
//! use courier::{StubTransport, TransportError, WebService};
//!
//! let stub = StubTransport::new().with_error(TransportError::not_connected("offline"));
//! let service = WebService::new(stub.clone());
//!
//! let result = service.execute(&endpoint).await;
//! assert_eq!(result, Err(WebServiceError::NoInternet));
//! assert_eq!(stub.requests().len(), 1);
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bytes::Bytes;

use crate::{
    RawResponse, Request, ResponseMetadata, Transport, TransportError, TransportOutcome,
};

type Observer = Arc<dyn Fn(&Request) + Send + Sync>;

/// Transport returning a preset outcome.
///
/// Clones share their presets and recorded requests. The outcome is
/// delivered from a freshly spawned Tokio task, so it always arrives
/// asynchronously.
#[derive(Clone, Default)]
pub struct StubTransport {
    state: Arc<Mutex<State>>,
}

#[derive(Default)]
struct State {
    body: Option<Bytes>,
    metadata: Option<ResponseMetadata>,
    error: Option<TransportError>,
    will_request: Option<Observer>,
    requests: Vec<Request>,
}

impl std::fmt::Debug for StubTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("StubTransport")
            .field("body", &state.body)
            .field("metadata", &state.metadata)
            .field("error", &state.error)
            .field("requests", &state.requests.len())
            .finish_non_exhaustive()
    }
}

impl StubTransport {
    /// A stub answering with no metadata, no body and no error.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset the body bytes.
    #[must_use]
    pub fn with_body(self, body: impl Into<Bytes>) -> Self {
        self.lock().body = Some(body.into());
        self
    }

    /// Preset a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn with_json<T: serde::Serialize + ?Sized>(
        self,
        value: &T,
    ) -> Result<Self, serde_json::Error> {
        let body = serde_json::to_vec(value)?;
        Ok(self.with_body(body))
    }

    /// Preset the status code, keeping any preset headers.
    #[must_use]
    pub fn with_status(self, status: u16) -> Self {
        {
            let mut state = self.lock();
            let headers = state
                .metadata
                .take()
                .map(|metadata| metadata.headers().clone())
                .unwrap_or_default();
            state.metadata = Some(ResponseMetadata::new(status, headers));
        }
        self
    }

    /// Preset a response header. Requires a status, see [`StubTransport::with_status`].
    #[must_use]
    pub fn with_header(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let Some(metadata) = self.lock().metadata.as_mut() {
            metadata.headers_mut().insert(name.into(), value.into());
        }
        self
    }

    /// Preset a transport error. It takes priority over body and metadata.
    #[must_use]
    pub fn with_error(self, error: TransportError) -> Self {
        self.lock().error = Some(error);
        self
    }

    /// Observe each request before its outcome is delivered.
    #[must_use]
    pub fn will_request<F>(self, observer: F) -> Self
    where
        F: Fn(&Request) + Send + Sync + 'static,
    {
        self.lock().will_request = Some(Arc::new(observer));
        self
    }

    /// Requests received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<Request> {
        self.lock().requests.clone()
    }

    /// The most recent request.
    #[must_use]
    pub fn last_request(&self) -> Option<Request> {
        self.lock().requests.last().cloned()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Transport for StubTransport {
    async fn send(&self, request: Request) -> TransportOutcome {
        let (observer, outcome) = {
            let mut state = self.lock();
            state.requests.push(request.clone());
            let outcome = match &state.error {
                Some(error) => Err(error.clone()),
                None => Ok(RawResponse::new(state.metadata.clone(), state.body.clone())),
            };
            (state.will_request.clone(), outcome)
        };

        if let Some(observer) = observer {
            observer(&request);
        }

        tokio::spawn(async move { outcome })
            .await
            .map_err(|err| TransportError::other(err.to_string()))?
    }
}
