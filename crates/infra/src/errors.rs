//! Conversions from external infrastructure errors into domain errors.

use hearth_domain::HearthError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can
/// be converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub HearthError);

impl From<InfraError> for HearthError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<HearthError> for InfraError {
    fn from(value: HearthError) -> Self {
        InfraError(value)
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        if value.is_timeout() {
            return InfraError(HearthError::Network("HTTP request timed out".into()));
        }

        if value.is_connect() {
            return InfraError(HearthError::Network("HTTP connection failure".into()));
        }

        if let Some(status) = value.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return InfraError(match code {
                401 | 403 => HearthError::Auth(message),
                404 => HearthError::NotFound(message),
                400..=499 => HearthError::VendorRejected(message),
                500..=599 => HearthError::VendorRejected(message),
                _ => HearthError::Network(message),
            });
        }

        InfraError(HearthError::Network(value.to_string()))
    }
}

/// Map a non-2xx vendor response into the domain taxonomy. Auth failures
/// surface as `Auth` so callers can prompt a re-authorization; everything
/// else is a vendor rejection with the status attached.
pub fn vendor_status_error(status: reqwest::StatusCode, body: &str) -> HearthError {
    let detail = if body.is_empty() {
        format!("HTTP {status}")
    } else {
        format!("HTTP {status}: {body}")
    };

    match status.as_u16() {
        401 | 403 => HearthError::Auth(detail),
        _ => HearthError::VendorRejected(detail),
    }
}
