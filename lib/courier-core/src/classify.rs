//! Response classification.
//!
//! Turns a [`TransportOutcome`] into the endpoint's decoded value or a
//! [`WebServiceError`], checking in this order:
//!
//! 1. transport failure (not connected, cancelled, anything else);
//! 2. missing status code;
//! 3. non-2xx status: [`Endpoint::configuration_error`] first, then the
//!    generic status table;
//! 4. missing body;
//! 5. body decoding.

use crate::{Endpoint, TransportOutcome, WebServiceError};

/// Description used when the response carries no status code.
pub const MISSING_STATUS: &str = "Failed to parse HTTP status code";

/// Description used when a 2xx response carries no body.
pub const MISSING_BODY: &str = "Response data was nil";

/// Classify the raw outcome of one request.
///
/// # Errors
///
/// Returns the [`WebServiceError`] for whichever check fails first.
pub fn classify<E: Endpoint + ?Sized>(
    endpoint: &E,
    outcome: TransportOutcome,
) -> Result<E::Response, WebServiceError> {
    let response = outcome?;

    let Some(status) = response.status() else {
        return Err(WebServiceError::invalid_response(MISSING_STATUS));
    };

    let body = response.body().map(|bytes| &bytes[..]);
    validate_status(endpoint, status, body)?;

    let Some(body) = body else {
        return Err(WebServiceError::invalid_response(MISSING_BODY));
    };

    endpoint
        .decode_response(body)
        .map_err(|err| WebServiceError::invalid_response(err.to_string()))
}

/// Check a status code, accepting `[200, 300)`.
///
/// # Errors
///
/// Returns the error raised by [`Endpoint::configuration_error`] or, if it
/// raises nothing, the generic mapping of the status code.
pub fn validate_status<E: Endpoint + ?Sized>(
    endpoint: &E,
    status: u16,
    body: Option<&[u8]>,
) -> Result<(), WebServiceError> {
    if (200..300).contains(&status) {
        return Ok(());
    }

    endpoint.configuration_error(status, body)?;

    Err(match status {
        400 => WebServiceError::BadRequest,
        401 => WebServiceError::Unauthorized,
        403 => WebServiceError::Forbidden,
        404 => WebServiceError::NotFound,
        409 => WebServiceError::Conflict,
        status_code => WebServiceError::BadResponse { status_code },
    })
}
