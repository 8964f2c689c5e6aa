//! Bearer token check for `/mcp`.

use axum::http::{header, HeaderMap, StatusCode};

/// Validates the `Authorization: Bearer <token>` header.
///
/// # Errors
///
/// Returns `StatusCode::UNAUTHORIZED` if the header is absent, uses
/// another scheme, or carries a token other than `expected`.
pub(crate) fn validate_bearer(headers: &HeaderMap, expected: &str) -> Result<(), StatusCode> {
    let provided = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim);

    match provided {
        Some(token) if !expected.is_empty() && token == expected => Ok(()),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}
