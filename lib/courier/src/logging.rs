//! Request/response logging for transports.
//!
//! [`Logging`] wraps any [`Transport`] and logs each request and its raw
//! outcome using the `tracing` crate. Build it directly or through
//! [`LoggingLayer`], a `tower` layer.

use std::time::Instant;

use tower::Layer;
use tracing::{Instrument, Level, debug, info, span, warn};

use crate::{Request, Transport, TransportOutcome};

/// Layer that adds request/response logging to a transport.
///
/// # Example
///
/// ```ignore
/// use courier::{HyperTransport, LoggingLayer, WebService};
/// use tower::Layer;
///
/// let service = WebService::new(LoggingLayer::new().layer(HyperTransport::new()));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLayer {
    level: LogLevel,
}

/// Log level for the logging transport.
#[derive(Debug, Clone, Copy, Default)]
pub enum LogLevel {
    /// Log at debug level (request/response details).
    Debug,
    /// Log at info level (summary only).
    #[default]
    Info,
}

impl LoggingLayer {
    /// Create a new logging layer with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a logging layer that logs at debug level.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            level: LogLevel::Debug,
        }
    }
}

impl<T> Layer<T> for LoggingLayer {
    type Service = Logging<T>;

    fn layer(&self, inner: T) -> Self::Service {
        Logging {
            inner,
            level: self.level,
        }
    }
}

/// Transport that logs requests and raw outcomes.
#[derive(Debug, Clone)]
pub struct Logging<T> {
    inner: T,
    level: LogLevel,
}

impl<T> Logging<T> {
    /// Create a new logging transport wrapping the given transport.
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            level: LogLevel::Info,
        }
    }

    /// The wrapped transport.
    pub fn inner(&self) -> &T {
        &self.inner
    }
}

impl<T: Transport> Transport for Logging<T> {
    async fn send(&self, request: Request) -> TransportOutcome {
        let method = request.method();
        let url = request.url().to_string();
        let level = self.level;

        let span = span!(Level::INFO, "http_request", %method, %url);

        async move {
            let start = Instant::now();

            match level {
                LogLevel::Debug => {
                    debug!(
                        method = %method,
                        url = %url,
                        headers = ?request.headers(),
                        "sending request"
                    );
                }
                LogLevel::Info => {
                    info!(method = %method, url = %url, "sending request");
                }
            }

            let outcome = self.inner.send(request).await;

            // Saturating conversion to u64 (truncates after ~584 million years)
            let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

            match &outcome {
                Ok(response) => match response.metadata() {
                    Some(metadata) if metadata.is_success() => {
                        info!(status = metadata.status(), elapsed_ms, "request completed");
                    }
                    Some(metadata) => {
                        warn!(
                            status = metadata.status(),
                            elapsed_ms,
                            "request failed with HTTP error"
                        );
                    }
                    None => warn!(elapsed_ms, "response without status"),
                },
                Err(err) => {
                    warn!(error = %err, elapsed_ms, "request failed");
                }
            }

            outcome
        }
        .instrument(span)
        .await
    }
}
