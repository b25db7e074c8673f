//! HTTP request building.
//!
//! Use [`Request::builder`] to construct requests from a base URL, path
//! segments and query parameters. Building is pure: the same inputs always
//! produce the same request, and nothing is validated against the network.
//!
//! # Example
//!
//! ```
//! use courier_core::{Method, Request};
//!
//! let request = Request::builder(Method::Get, "https://api.example.com")
//!     .path_segment("users")
//!     .path_segment("jane doe")
//!     .query("page", "1")
//!     .build();
//!
//! assert_eq!(request.url(), "https://api.example.com/users/jane%20doe?page=1");
//! ```

use std::collections::HashMap;

use bytes::Bytes;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::{Method, RequestBody};

/// Characters escaped inside a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Characters escaped inside a query parameter name or value.
const QUERY_COMPONENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'`');

/// An HTTP request with method, URL, headers, and optional body.
///
/// The URL is kept as text so that every descriptor can be built, including
/// one with an empty base URL; transports reject URLs they cannot send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,
    url: String,
    headers: HashMap<String, String>,
    body: Option<Bytes>,
}

impl Request {
    /// Creates a new [`RequestBuilder`].
    #[must_use]
    pub fn builder(method: Method, base_url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(method, base_url)
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Request URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Consume into (method, url, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (Method, String, HashMap<String, String>, Option<Bytes>) {
        (self.method, self.url, self.headers, self.body)
    }
}

/// Builder for constructing [`Request`] instances.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    base_url: String,
    segments: Vec<String>,
    query: Vec<(String, String)>,
    headers: HashMap<String, String>,
    body: Option<Bytes>,
}

impl RequestBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(method: Method, base_url: impl Into<String>) -> Self {
        Self {
            method,
            base_url: base_url.into(),
            segments: Vec::new(),
            query: Vec::new(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Appends one path segment. The segment is escaped, so a `/` inside it
    /// does not create a new segment.
    #[must_use]
    pub fn path_segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    /// Appends path segments in order.
    #[must_use]
    pub fn path_segments<S: Into<String>>(mut self, segments: impl IntoIterator<Item = S>) -> Self {
        self.segments.extend(segments.into_iter().map(Into::into));
        self
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Appends multiple query parameters, keeping their order.
    #[must_use]
    pub fn query_pairs(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets multiple headers.
    #[must_use]
    pub fn headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Sets the request body and its `Content-Type` header.
    #[must_use]
    pub fn body(mut self, body: RequestBody) -> Self {
        self.headers
            .retain(|name, _| !name.eq_ignore_ascii_case("Content-Type"));
        self.headers
            .insert("Content-Type".to_string(), body.content_type().to_string());
        self.body = Some(body.into_bytes());
        self
    }

    /// Builds the [`Request`].
    #[must_use]
    pub fn build(self) -> Request {
        let url = compose_url(&self.base_url, &self.segments, &self.query);
        Request {
            method: self.method,
            url,
            headers: self.headers,
            body: self.body,
        }
    }
}

/// Appends `segments` to the path of `base` and, when `query` is non-empty,
/// replaces its query string. A fragment on `base` stays at the end.
fn compose_url(base: &str, segments: &[String], query: &[(String, String)]) -> String {
    let (head, fragment) = match base.find('#') {
        Some(index) => base.split_at(index),
        None => (base, ""),
    };
    let (path, base_query) = match head.find('?') {
        Some(index) => head.split_at(index),
        None => (head, ""),
    };

    let mut url = path.to_string();
    for segment in segments {
        if !url.is_empty() && !url.ends_with('/') {
            url.push('/');
        }
        url.extend(utf8_percent_encode(segment, PATH_SEGMENT));
    }

    if query.is_empty() {
        url.push_str(base_query);
    } else {
        for (index, (name, value)) in query.iter().enumerate() {
            url.push(if index == 0 { '?' } else { '&' });
            url.extend(utf8_percent_encode(name, QUERY_COMPONENT));
            url.push('=');
            url.extend(utf8_percent_encode(value, QUERY_COMPONENT));
        }
    }

    url.push_str(fragment);
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get(base: &str) -> RequestBuilder {
        Request::builder(Method::Get, base)
    }

    #[test]
    fn request_builder_basic() {
        let request = get("https://api.example.com/users")
            .header("Accept", "application/json")
            .build();

        assert_eq!(request.method(), Method::Get);
        assert_eq!(request.url(), "https://api.example.com/users");
        assert_eq!(request.header("Accept"), Some("application/json"));
        assert!(request.body().is_none());
    }

    #[test]
    fn path_segments_are_appended_in_order() {
        let request = get("https://www.google.com")
            .path_segments(["test", "someQuery", "last"])
            .build();

        assert_eq!(request.url(), "https://www.google.com/test/someQuery/last");
    }

    #[test]
    fn path_segments_respect_trailing_slash() {
        let request = get("https://api.example.com/v1/").path_segment("users").build();
        assert_eq!(request.url(), "https://api.example.com/v1/users");
    }

    #[test]
    fn path_segments_are_escaped() {
        let request = get("https://api.example.com")
            .path_segment("a/b")
            .path_segment("c d?e#f")
            .path_segment("100%")
            .path_segment("café")
            .build();

        assert_eq!(
            request.url(),
            "https://api.example.com/a%2Fb/c%20d%3Fe%23f/100%25/caf%C3%A9"
        );
    }

    #[test]
    fn query_parameters_keep_order() {
        let request = get("https://api.example.com/search")
            .query("z", "1")
            .query("a", "2")
            .query_pairs([("m".to_string(), "3".to_string())])
            .build();

        assert_eq!(request.url(), "https://api.example.com/search?z=1&a=2&m=3");
    }

    #[test]
    fn query_parameters_are_escaped() {
        let request = get("https://api.example.com/search")
            .query("q", "rust & http=fun+")
            .build();

        assert_eq!(
            request.url(),
            "https://api.example.com/search?q=rust%20%26%20http%3Dfun%2B"
        );
    }

    #[test]
    fn no_query_means_no_question_mark() {
        let request = get("https://api.example.com").path_segment("users").build();
        assert!(!request.url().contains('?'));
    }

    #[test]
    fn query_replaces_base_query_and_keeps_fragment() {
        let request = get("https://api.example.com/v1?key=old#top")
            .path_segment("users")
            .query("key", "new")
            .build();
        assert_eq!(request.url(), "https://api.example.com/v1/users?key=new#top");

        let request = get("https://api.example.com/v1?key=old")
            .path_segment("users")
            .build();
        assert_eq!(request.url(), "https://api.example.com/v1/users?key=old");
    }

    #[test]
    fn empty_base_url() {
        let request = get("").path_segments(["test", "query"]).build();
        assert_eq!(request.url(), "test/query");

        let request = get("").build();
        assert_eq!(request.url(), "");
    }

    #[test]
    fn building_is_deterministic() {
        let builder = get("https://api.example.com")
            .path_segments(["a", "b"])
            .query("x", "1")
            .header("Accept", "application/json");

        assert_eq!(builder.clone().build(), builder.build());
    }

    #[test]
    fn request_builder_with_body() {
        let body = RequestBody::json(&serde_json::json!({"name": "test"})).expect("json");
        let request = Request::builder(Method::Post, "https://api.example.com/users")
            .body(body)
            .build();

        assert_eq!(request.method(), Method::Post);
        assert_eq!(request.header("Content-Type"), Some("application/json"));
        assert_eq!(
            request.body().map(|b| &b[..]),
            Some(&br#"{"name":"test"}"#[..])
        );
    }

    #[test]
    fn body_replaces_content_type_in_any_case() {
        let body = RequestBody::json(&serde_json::json!({"name": "test"})).expect("json");
        let request = Request::builder(Method::Post, "https://api.example.com/users")
            .header("content-type", "text/plain")
            .header("Accept", "application/json")
            .body(body)
            .build();

        let content_types = request
            .headers()
            .keys()
            .filter(|name| name.eq_ignore_ascii_case("content-type"))
            .count();
        assert_eq!(content_types, 1);
        assert_eq!(request.header("Content-Type"), Some("application/json"));
        assert_eq!(request.header("Accept"), Some("application/json"));
    }
}
