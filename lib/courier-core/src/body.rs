//! Body serialization utilities.

use std::fmt;

use bytes::Bytes;
use derive_more::Error;

/// Content type constants for request bodies.
///
/// These are provided for endpoints that send a body; the core never checks
/// them against the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// JSON content type (`application/json`).
    Json,
    /// Multipart form content type (`multipart/form-data`).
    MultipartForm,
}

impl ContentType {
    /// Get the MIME type string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::MultipartForm => "multipart/form-data",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encoded request body with the content type it should be sent with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBody {
    content_type: String,
    bytes: Bytes,
}

impl RequestBody {
    /// Create a body from raw bytes.
    #[must_use]
    pub fn new(content_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Serialize a value as a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn json<T: serde::Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        let bytes = serde_json::to_vec(value)?;
        Ok(Self::new(ContentType::Json.as_str(), bytes))
    }

    /// Value for the `Content-Type` header.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Encoded bytes.
    #[must_use]
    pub const fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Consume into the encoded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }
}

// ============================================================================
// Decoding
// ============================================================================

/// Failure to decode a response body.
///
/// The [`Display`](fmt::Display) output is the diagnostic surfaced through
/// [`crate::WebServiceError::InvalidResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct DecodeError {
    path: String,
    message: String,
}

impl DecodeError {
    /// Create a decode error that is not tied to a field.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self::at(".", message)
    }

    /// Create a decode error for the field at `path`.
    #[must_use]
    pub fn at(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Path to the failing field (`.` for the document root).
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Decoder message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() || self.path == "." {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// This is the decoder endpoints use unless they override
/// [`crate::Endpoint::decode_response`]. Timestamp fields are expected in
/// ISO 8601 form, see [`crate::iso8601`].
///
/// # Errors
///
/// Returns an error if JSON deserialization fails, with the path to the
/// problematic field (e.g. `user.address.city`).
///
/// # Example
///
/// ```
/// use courier_core::from_json;
/// use serde::Deserialize;
///
/// #[derive(Debug, PartialEq, Deserialize)]
/// struct User { name: String }
///
/// let bytes = br#"{"name":"Alice"}"#;
/// let user: User = from_json(bytes).expect("deserialize");
/// assert_eq!(user, User { name: "Alice".to_string() });
/// ```
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeError> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| DecodeError::at(e.path().to_string(), e.inner().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_as_str() {
        assert_eq!(ContentType::Json.as_str(), "application/json");
        assert_eq!(ContentType::MultipartForm.as_str(), "multipart/form-data");
    }

    #[test]
    fn content_type_display() {
        assert_eq!(ContentType::Json.to_string(), "application/json");
    }

    #[test]
    fn request_body_json() {
        #[derive(serde::Serialize)]
        struct User {
            name: String,
            age: u32,
        }

        let body = RequestBody::json(&User {
            name: "Alice".to_string(),
            age: 30,
        })
        .expect("serialize");

        assert_eq!(body.content_type(), "application/json");
        assert_eq!(body.bytes().as_ref(), br#"{"name":"Alice","age":30}"#);
    }

    #[test]
    fn from_json_deserialize() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct User {
            name: String,
            age: u32,
        }

        let user: User = from_json(br#"{"name":"Alice","age":30}"#).expect("deserialize");
        assert_eq!(
            user,
            User {
                name: "Alice".to_string(),
                age: 30,
            }
        );
    }

    #[test]
    fn from_json_syntax_error_has_no_path() {
        let err = from_json::<Vec<String>>(b"not json").expect_err("should fail");

        assert_eq!(err.path(), ".");
        assert_eq!(err.to_string(), err.message());
    }

    #[test]
    fn from_json_type_mismatch_reports_index() {
        let err = from_json::<Vec<String>>(b"[1]").expect_err("should fail");

        assert_eq!(err.path(), "[0]");
        let msg = err.to_string();
        assert!(msg.starts_with("[0]: invalid type: integer `1`"), "{msg}");
    }

    #[test]
    fn from_json_missing_field_error_with_path() {
        #[derive(Debug, serde::Deserialize)]
        struct Address {
            #[allow(dead_code)]
            city: String,
        }

        #[derive(Debug, serde::Deserialize)]
        struct User {
            #[allow(dead_code)]
            address: Address,
        }

        let err = from_json::<User>(br#"{"address":{}}"#).expect_err("should fail");
        let msg = err.to_string();
        assert!(msg.contains("address"), "Expected path 'address' in error: {msg}");
        assert!(msg.contains("city"), "Expected field 'city' in error: {msg}");
    }

    #[test]
    fn decode_error_display() {
        assert_eq!(DecodeError::new("boom").to_string(), "boom");
        assert_eq!(
            DecodeError::at("user.name", "expected a string").to_string(),
            "user.name: expected a string"
        );
    }
}
