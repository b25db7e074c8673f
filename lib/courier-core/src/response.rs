//! Raw transport responses.
//!
//! A [`RawResponse`] is what a [`crate::Transport`] hands back before any
//! interpretation: optional metadata and optional body bytes. Both may be
//! missing; the classifier decides what that means.

use std::collections::HashMap;

use bytes::Bytes;

use crate::TransportError;

/// Result of sending one request: a raw response or a transport failure.
pub type TransportOutcome = Result<RawResponse, TransportError>;

/// Response metadata: status code and headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseMetadata {
    status: u16,
    headers: HashMap<String, String>,
}

impl ResponseMetadata {
    /// Creates metadata for the given status code.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, String>) -> Self {
        Self { status, headers }
    }

    /// Creates metadata with no headers.
    #[must_use]
    pub fn with_status(status: u16) -> Self {
        Self::new(status, HashMap::new())
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Mutable access to headers.
    #[must_use]
    pub fn headers_mut(&mut self) -> &mut HashMap<String, String> {
        &mut self.headers
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Uninterpreted response from a transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResponse {
    metadata: Option<ResponseMetadata>,
    body: Option<Bytes>,
}

impl RawResponse {
    /// Creates a raw response.
    #[must_use]
    pub fn new(metadata: Option<ResponseMetadata>, body: Option<Bytes>) -> Self {
        Self { metadata, body }
    }

    /// A response with no metadata and no body.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Response metadata, if the transport produced any.
    #[must_use]
    pub const fn metadata(&self) -> Option<&ResponseMetadata> {
        self.metadata.as_ref()
    }

    /// HTTP status code, if one can be extracted.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.metadata.as_ref().map(ResponseMetadata::status)
    }

    /// Body bytes, if the transport produced any.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Consume into (metadata, body).
    #[must_use]
    pub fn into_parts(self) -> (Option<ResponseMetadata>, Option<Bytes>) {
        (self.metadata, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_basic() {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());

        let metadata = ResponseMetadata::new(200, headers);

        assert_eq!(metadata.status(), 200);
        assert_eq!(metadata.header("content-type"), Some("application/json"));
        assert!(metadata.is_success());
        assert!(!ResponseMetadata::with_status(300).is_success());
        assert!(!ResponseMetadata::with_status(199).is_success());
    }

    #[test]
    fn raw_response_parts() {
        let response = RawResponse::new(
            Some(ResponseMetadata::with_status(201)),
            Some(Bytes::from_static(b"[]")),
        );

        assert_eq!(response.status(), Some(201));
        assert_eq!(response.body().map(|b| &b[..]), Some(&b"[]"[..]));

        let (metadata, body) = response.into_parts();
        assert!(metadata.is_some());
        assert!(body.is_some());
    }

    #[test]
    fn raw_response_empty() {
        let response = RawResponse::empty();
        assert!(response.metadata().is_none());
        assert!(response.status().is_none());
        assert!(response.body().is_none());
    }
}
