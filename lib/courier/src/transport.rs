//! Network transport implementation using hyper-util.

use std::collections::HashMap;
use std::error::Error as StdError;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_rustls::HttpsConnector;
use hyper_util::{
    client::legacy::{Client, connect::HttpConnector},
    rt::TokioExecutor,
};

use crate::{
    RawResponse, Request, ResponseMetadata, Transport, TransportError, TransportErrorKind,
    TransportOutcome,
    config::{ClientConfig, ClientConfigBuilder},
    connector::https_connector,
};

/// Transport over the real network: hyper-util client with rustls TLS.
///
/// This is the transport used when an endpoint is started without an
/// injected one.
///
/// # Example
///
/// ```ignore
/// use courier::HyperTransport;
/// use std::time::Duration;
///
/// let transport = HyperTransport::builder()
///     .timeout(Duration::from_secs(30))
///     .user_agent("my-app/1.0")
///     .build();
/// ```
#[derive(Clone)]
pub struct HyperTransport {
    inner: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
    config: Arc<ClientConfig>,
}

impl std::fmt::Debug for HyperTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperTransport")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HyperTransport {
    /// Create a transport with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Create a transport with custom configuration.
    #[must_use]
    pub fn with_config(config: ClientConfig) -> Self {
        let connector = https_connector(&config);
        let inner = Client::builder(TokioExecutor::new())
            .retry_canceled_requests(false)
            .build(connector);

        Self {
            inner,
            config: Arc::new(config),
        }
    }

    /// Create a new transport builder.
    #[must_use]
    pub fn builder() -> HyperTransportBuilder {
        HyperTransportBuilder::default()
    }

    /// Get the transport configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build a hyper request from a courier request.
    fn build_hyper_request(&self, request: Request) -> Result<http::Request<Full<Bytes>>, TransportError> {
        let (method, url, headers, body) = request.into_parts();

        // Validate only: the parsed form removes dot segments, the text is sent as built.
        let parsed = url::Url::parse(&url).map_err(|err| invalid_url(&url, &err))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(TransportError::new(
                TransportErrorKind::InvalidUrl,
                format!("unsupported URL scheme `{}`", parsed.scheme()),
            ));
        }
        let uri = http::Uri::try_from(url.as_str()).map_err(|err| invalid_url(&url, &err))?;

        let mut builder = http::Request::builder()
            .method(http::Method::from(method))
            .uri(uri);

        if !headers
            .keys()
            .any(|name| name.eq_ignore_ascii_case(http::header::USER_AGENT.as_str()))
        {
            builder = builder.header(http::header::USER_AGENT, self.config.user_agent.as_str());
        }
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let body = body.map_or_else(Full::default, Full::new);
        builder
            .body(body)
            .map_err(|err| TransportError::other(format!("invalid request: {err}")))
    }

    /// Extract response headers as a `HashMap`.
    fn extract_headers(headers: &http::HeaderMap) -> HashMap<String, String> {
        headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect()
    }

    #[allow(clippy::needless_pass_by_value)]
    fn map_hyper_error(err: hyper_util::client::legacy::Error) -> TransportError {
        let kind = if is_tls(&err) {
            TransportErrorKind::Tls
        } else if err.is_connect() && is_offline(&err) {
            TransportErrorKind::NotConnected
        } else {
            TransportErrorKind::Other
        };

        TransportError::new(kind, describe(&err))
    }

    fn timed_out(timeout: Duration) -> TransportError {
        TransportError::new(
            TransportErrorKind::TimedOut,
            format!("no response within {}ms", timeout.as_millis()),
        )
    }
}

impl Default for HyperTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HyperTransport {
    async fn send(&self, request: Request) -> TransportOutcome {
        let hyper_request = self.build_hyper_request(request)?;
        let timeout = self.config.timeout;

        let response = tokio::time::timeout(timeout, self.inner.request(hyper_request))
            .await
            .map_err(|_| Self::timed_out(timeout))?
            .map_err(Self::map_hyper_error)?;

        let status = response.status().as_u16();
        let headers = Self::extract_headers(response.headers());

        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|err| TransportError::other(err.to_string()))?
            .to_bytes();

        Ok(RawResponse::new(
            Some(ResponseMetadata::new(status, headers)),
            Some(body),
        ))
    }
}

fn sources<'a>(
    err: &'a (dyn StdError + 'static),
) -> impl Iterator<Item = &'a (dyn StdError + 'static)> {
    std::iter::successors(Some(err), |&err| err.source())
}

fn invalid_url(url: &str, err: &dyn StdError) -> TransportError {
    TransportError::new(
        TransportErrorKind::InvalidUrl,
        format!("invalid URL `{url}`: {err}"),
    )
}

/// No route to any network. An unknown host name is not an offline condition.
fn is_offline(err: &(dyn StdError + 'static)) -> bool {
    sources(err).any(|err| {
        err.downcast_ref::<io::Error>().is_some_and(|io| {
            matches!(
                io.kind(),
                io::ErrorKind::NetworkUnreachable
                    | io::ErrorKind::NetworkDown
                    | io::ErrorKind::HostUnreachable
                    | io::ErrorKind::AddrNotAvailable
            )
        })
    })
}

fn is_tls(err: &(dyn StdError + 'static)) -> bool {
    sources(err).any(|err| {
        err.is::<rustls::Error>()
            || err
                .downcast_ref::<io::Error>()
                .and_then(io::Error::get_ref)
                .is_some_and(|inner| inner.is::<rustls::Error>())
    })
}

/// Messages of the whole source chain, outermost first.
fn describe(err: &(dyn StdError + 'static)) -> String {
    sources(err)
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(": ")
}

/// Builder for [`HyperTransport`].
#[derive(Debug, Clone, Default)]
pub struct HyperTransportBuilder {
    config: ClientConfigBuilder,
}

impl HyperTransportBuilder {
    /// Set the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.timeout(timeout);
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.connect_timeout(timeout);
        self
    }

    /// Set the default `User-Agent`.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config = self.config.user_agent(user_agent);
        self
    }

    /// Build the transport.
    #[must_use]
    pub fn build(self) -> HyperTransport {
        HyperTransport::with_config(self.config.build())
    }
}
