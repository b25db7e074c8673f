//! Error types for courier.
//!
//! - [`WebServiceError`] - the closed set of failures a call can end with
//! - [`TransportError`] - the raw failure reported by a [`crate::Transport`]

use derive_more::{Display, Error};

// ============================================================================
// Domain Error
// ============================================================================

/// Terminal failure of an endpoint call.
///
/// Every call ends with either the decoded response or exactly one of these
/// values. None of them carries retry metadata.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum WebServiceError {
    /// There was no network connection.
    #[display("no internet connection")]
    NoInternet,

    /// The transport failed for any reason other than connectivity or cancellation.
    #[display("networking error")]
    NetworkingError,

    /// The response returned a non-2xx status code without a dedicated variant.
    #[display("unexpected HTTP status {status_code}")]
    BadResponse {
        /// HTTP status code.
        status_code: u16,
    },

    /// The response returned a non-2xx status code, with a display message from the server.
    ///
    /// Only raised by [`crate::Endpoint::configuration_error`] hooks.
    #[display("server error: {display_message}")]
    ServerError {
        /// Message meant for the end user.
        display_message: String,
    },

    /// The response returned a 400 status code.
    #[display("bad request")]
    BadRequest,

    /// The response returned a 401 status code.
    #[display("unauthorized")]
    Unauthorized,

    /// The response returned a 403 status code.
    #[display("forbidden")]
    Forbidden,

    /// The response returned a 404 status code.
    #[display("not found")]
    NotFound,

    /// The response returned a 409 status code.
    #[display("conflict")]
    Conflict,

    /// The response could not be turned into the expected value.
    #[display("invalid response: {debug_description}")]
    InvalidResponse {
        /// Diagnostic text, e.g. the decoder error.
        debug_description: String,
    },

    /// The request was cancelled, usually superseded by a newer request of the same kind.
    #[display("request cancelled")]
    Cancelled,
}

impl WebServiceError {
    /// Create an invalid response error.
    #[must_use]
    pub fn invalid_response(debug_description: impl Into<String>) -> Self {
        Self::InvalidResponse {
            debug_description: debug_description.into(),
        }
    }

    /// Create a server error carrying a message for display.
    #[must_use]
    pub fn server_error(display_message: impl Into<String>) -> Self {
        Self::ServerError {
            display_message: display_message.into(),
        }
    }

    /// Returns the HTTP status code this error was derived from, if known.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::BadResponse { status_code } => Some(*status_code),
            Self::BadRequest => Some(400),
            Self::Unauthorized => Some(401),
            Self::Forbidden => Some(403),
            Self::NotFound => Some(404),
            Self::Conflict => Some(409),
            _ => None,
        }
    }

    /// Returns `true` if this error was derived from a 4xx status code.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_some_and(|s| (400..500).contains(&s))
    }

    /// Returns `true` if the request never reached a server.
    #[must_use]
    pub const fn is_connectivity(&self) -> bool {
        matches!(self, Self::NoInternet | Self::NetworkingError)
    }
}

impl From<TransportError> for WebServiceError {
    fn from(error: TransportError) -> Self {
        match error.kind() {
            TransportErrorKind::NotConnected => Self::NoInternet,
            TransportErrorKind::Cancelled => Self::Cancelled,
            TransportErrorKind::TimedOut
            | TransportErrorKind::InvalidUrl
            | TransportErrorKind::Tls
            | TransportErrorKind::Other => Self::NetworkingError,
        }
    }
}

// ============================================================================
// Transport Error
// ============================================================================

/// Category of a transport-level failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TransportErrorKind {
    /// The device is not connected to a network.
    #[display("not connected")]
    NotConnected,
    /// The operation was cancelled before completing.
    #[display("cancelled")]
    Cancelled,
    /// The transport gave up waiting for the response.
    #[display("timed out")]
    TimedOut,
    /// The request URL cannot be sent.
    #[display("invalid URL")]
    InvalidUrl,
    /// TLS handshake or certificate failure.
    #[display("TLS error")]
    Tls,
    /// Any other failure.
    #[display("transport error")]
    Other,
}

/// Raw failure reported by a transport, before classification.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("{kind}: {message}")]
pub struct TransportError {
    kind: TransportErrorKind,
    message: String,
}

impl TransportError {
    /// Create a transport error.
    #[must_use]
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Create a "not connected" error.
    #[must_use]
    pub fn not_connected(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::NotConnected, message)
    }

    /// Create a "cancelled" error.
    #[must_use]
    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Cancelled, message)
    }

    /// Create an uncategorized error.
    #[must_use]
    pub fn other(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Other, message)
    }

    /// Failure category.
    #[must_use]
    pub const fn kind(&self) -> TransportErrorKind {
        self.kind
    }

    /// Failure description.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
