//! Endpoint descriptors.
//!
//! An [`Endpoint`] describes one logical request: where it goes, how it is
//! sent and what the success body decodes into. Everything but
//! [`Endpoint::path_components`] has a default.
//!
//! # Example
//!
//! ```
//! use std::borrow::Cow;
//!
//! use courier_core::{Endpoint, Method};
//!
//! struct Search {
//!     query: String,
//! }
//!
//! impl Endpoint for Search {
//!     type Response = Vec<String>;
//!
//!     fn base_url(&self) -> Cow<'_, str> {
//!         Cow::Borrowed("https://www.example.com")
//!     }
//!
//!     fn method(&self) -> Method {
//!         Method::Post
//!     }
//!
//!     fn path_components(&self) -> Vec<Cow<'_, str>> {
//!         vec!["test".into(), self.query.as_str().into()]
//!     }
//! }
//!
//! let request = Search { query: "someQuery".to_string() }.build_request();
//! assert_eq!(request.url(), "https://www.example.com/test/someQuery");
//! assert_eq!(request.method(), Method::Post);
//! ```

use std::borrow::Cow;

use serde::de::DeserializeOwned;

use crate::{DecodeError, Method, Request, RequestBody, WebServiceError, from_json};

/// Declarative description of one endpoint call.
///
/// A descriptor holds no transport state. It is plain data plus the hooks
/// below, and is usually built per call.
pub trait Endpoint {
    /// Type the success body decodes into.
    type Response: DeserializeOwned;

    /// Absolute base URL.
    ///
    /// Defaults to the empty string: an endpoint that keeps the default
    /// builds a request against an empty base, which no real transport can
    /// send.
    fn base_url(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    /// HTTP method, GET by default.
    fn method(&self) -> Method {
        Method::Get
    }

    /// Path segments appended to [`Endpoint::base_url`], in order.
    fn path_components(&self) -> Vec<Cow<'_, str>>;

    /// Query parameters, in order. `None` or an empty list adds no query string.
    fn query_parameters(&self) -> Option<Vec<(String, String)>> {
        None
    }

    /// Headers sent with every request, e.g. a pre-computed `Authorization`.
    fn headers(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    /// Request body.
    fn body(&self) -> Option<RequestBody> {
        None
    }

    /// Hook for endpoint-specific errors on non-2xx status codes.
    ///
    /// Called before the generic status table. Returning an error replaces
    /// the generic mapping, e.g. a [`WebServiceError::ServerError`] carrying
    /// a message extracted from `body`. The default raises nothing.
    fn configuration_error(
        &self,
        status: u16,
        body: Option<&[u8]>,
    ) -> Result<(), WebServiceError> {
        let _ = (status, body);
        Ok(())
    }

    /// Decode a success body.
    ///
    /// Defaults to [`from_json`]. The error's text becomes the
    /// [`WebServiceError::InvalidResponse`] description.
    fn decode_response(&self, data: &[u8]) -> Result<Self::Response, DecodeError> {
        from_json(data)
    }

    /// Build the concrete request. Pure: the same descriptor state always
    /// gives the same request.
    fn build_request(&self) -> Request {
        let mut builder = Request::builder(self.method(), self.base_url())
            .path_segments(self.path_components())
            .query_pairs(self.query_parameters().unwrap_or_default())
            .headers(self.headers());
        if let Some(body) = self.body() {
            builder = builder.body(body);
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use bytes::Bytes;

    use super::*;

    struct Bare;

    impl Endpoint for Bare {
        type Response = ();

        fn path_components(&self) -> Vec<Cow<'_, str>> {
            vec!["ping".into()]
        }
    }

    struct Full {
        base_url: String,
        user: String,
        page: Option<u32>,
    }

    impl Endpoint for Full {
        type Response = Vec<String>;

        fn base_url(&self) -> Cow<'_, str> {
            Cow::Borrowed(&self.base_url)
        }

        fn method(&self) -> Method {
            Method::Put
        }

        fn path_components(&self) -> Vec<Cow<'_, str>> {
            vec!["users".into(), Cow::Borrowed(&self.user), "tags".into()]
        }

        fn query_parameters(&self) -> Option<Vec<(String, String)>> {
            self.page
                .map(|page| vec![("page".to_string(), page.to_string())])
        }

        fn headers(&self) -> Vec<(String, String)> {
            vec![("Authorization".to_string(), "Bearer abc".to_string())]
        }

        fn body(&self) -> Option<RequestBody> {
            RequestBody::json(&["rust", "http"]).ok()
        }
    }

    #[test]
    fn defaults() {
        let request = Bare.build_request();

        check!(request.method() == Method::Get);
        check!(request.url() == "ping");
        check!(request.headers().is_empty());
        check!(request.body().is_none());
        check!(Bare.configuration_error(500, None) == Ok(()));
    }

    #[test]
    fn default_decoder_is_json() {
        let_assert!(Ok(()) = Bare.decode_response(b"null"));
        let_assert!(Err(err) = Bare.decode_response(b"{"));
        check!(err.path() == ".");
    }

    #[test]
    fn overrides() {
        let endpoint = Full {
            base_url: "https://api.example.com".to_string(),
            user: "jane/doe".to_string(),
            page: Some(2),
        };
        let request = endpoint.build_request();

        check!(request.method() == Method::Put);
        check!(request.url() == "https://api.example.com/users/jane%2Fdoe/tags?page=2");
        check!(request.header("Authorization") == Some("Bearer abc"));
        check!(request.header("Content-Type") == Some("application/json"));
        check!(request.body() == Some(&Bytes::from_static(br#"["rust","http"]"#)));
    }

    #[test]
    fn no_query_parameters() {
        let endpoint = Full {
            base_url: "https://api.example.com".to_string(),
            user: "jane".to_string(),
            page: None,
        };

        check!(endpoint.build_request().url() == "https://api.example.com/users/jane/tags");
    }

    #[test]
    fn build_request_is_pure() {
        let endpoint = Full {
            base_url: "https://api.example.com".to_string(),
            user: "jane".to_string(),
            page: Some(1),
        };

        check!(endpoint.build_request() == endpoint.build_request());
    }
}
