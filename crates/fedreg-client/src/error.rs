//! Errors from the Federal Register API client.

use fedreg_types::{DiagnosticError, ErrorKind, FedRegError};
use thiserror::Error;

/// Errors returned by [`crate::FederalRegisterApi`] implementations.
///
/// None of these are retried; the caller decides what to do.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API (or a secondary text/HTML fetch) answered with a non-success status.
    #[error("Federal Register API returned HTTP {status} for {url}")]
    Status { status: u16, url: String },
    /// The request did not complete before the configured timeout.
    #[error("request to {url} timed out")]
    Timeout { url: String },
    /// Connection-level failure (DNS, TLS, reset...).
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },
    /// The response body was not the JSON shape we expected.
    #[error("could not decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl ApiError {
    /// Returns the upstream HTTP status, if the failure carried one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn from_reqwest(url: &str, e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else {
            Self::Request {
                url: url.to_string(),
                message: e.to_string(),
            }
        }
    }
}

impl From<ApiError> for FedRegError {
    fn from(e: ApiError) -> Self {
        let message = e.to_string();
        match e {
            ApiError::Status { status: 404, .. } => FedRegError::not_found(message),
            ApiError::Status { .. } | ApiError::Request { .. } => FedRegError::upstream(message),
            ApiError::Timeout { .. } => FedRegError::new(ErrorKind::Timeout, message),
            ApiError::Decode { .. } => FedRegError::new(ErrorKind::Internal, message),
        }
    }
}

impl DiagnosticError for ApiError {
    fn hint(&self) -> Option<String> {
        match self {
            Self::Status { status: 400 | 422, .. } => Some(
                "The API rejected the query parameters (unknown condition, bad date or slug)."
                    .into(),
            ),
            Self::Status { status: 429, .. } => {
                Some("The Federal Register API is rate limiting this client.".into())
            }
            Self::Status { status, .. } if *status >= 500 => {
                Some("The Federal Register API is having trouble; try again later.".into())
            }
            Self::Timeout { .. } => Some("The API did not answer in time.".into()),
            Self::Request { .. } => Some("The API host could not be reached.".into()),
            _ => None,
        }
    }

    fn fix(&self) -> Option<String> {
        match self {
            Self::Timeout { .. } => Some(
                "Increase the timeout in config:\n  [api]\n  timeout_secs = 60".into(),
            ),
            Self::Request { .. } => {
                Some("Check network access or set [api] base_url / FEDREG_API__BASE_URL.".into())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_carries_code() {
        let e = ApiError::Status {
            status: 503,
            url: "https://www.federalregister.gov/api/v1/documents.json".into(),
        };
        assert_eq!(e.status(), Some(503));
        assert!(e.to_string().contains("HTTP 503"));
        assert!(e.hint().expect("hint").contains("trouble"));
    }

    #[test]
    fn not_found_status_maps_to_not_found_kind() {
        let err: FedRegError = ApiError::Status {
            status: 404,
            url: "u".into(),
        }
        .into();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[test]
    fn timeout_maps_to_timeout_kind_and_has_fix() {
        let e = ApiError::Timeout { url: "u".into() };
        assert!(e.fix().expect("fix").contains("timeout_secs"));
        let err: FedRegError = e.into();
        assert_eq!(err.kind, ErrorKind::Timeout);
    }

    #[test]
    fn decode_error_has_no_status() {
        let e = ApiError::Decode {
            url: "u".into(),
            message: "expected value".into(),
        };
        assert!(e.status().is_none());
        assert!(e.hint().is_none());
    }
}
