//! Bearer credential extraction from the `Authorization` header.

use http::HeaderMap;
use http::header::AUTHORIZATION;

use chirpy_core::error::AuthError;

/// Authentication scheme expected in front of the token.
pub const BEARER_SCHEME: &str = "Bearer";

/// Extracts the token from an `Authorization` header value.
///
/// The value must be exactly `Bearer <token>`: the scheme is matched
/// case-sensitively and anything other than two space-separated parts is
/// rejected. The token itself is returned verbatim; its shape is checked by
/// whoever consumes it.
pub fn extract_bearer(header: &str) -> Result<&str, AuthError> {
    if header.is_empty() {
        return Err(AuthError::missing_credential(
            "No authorization header included in request",
        ));
    }

    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(BEARER_SCHEME), Some(token), None) => Ok(token),
        _ => Err(AuthError::malformed_header("Malformed authorization header")),
    }
}

/// Extracts the bearer token from a request's headers.
///
/// A missing header is `MissingCredential`; a value that is not visible
/// ASCII is `MalformedHeader`.
pub fn extract_bearer_from_headers(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers.get(AUTHORIZATION).ok_or_else(|| {
        AuthError::missing_credential("No authorization header included in request")
    })?;
    let value = value
        .to_str()
        .map_err(|_| AuthError::malformed_header("Authorization header is not valid text"))?;
    extract_bearer(value)
}
