//! Bearer header parsing.

use super::error::AuthError;

/// Value browsers send once the session cookie backing the header is cleared.
const CLEARED_COOKIE: &str = "undefined";

/// Extracts the API key from a `Bearer <key>` header value.
///
/// The scheme is matched case-insensitively. Exactly two whitespace-separated
/// parts are required.
///
/// # Errors
///
/// - [`AuthError::MissingCredentials`] if the header is absent, blank or `undefined`
/// - [`AuthError::MissingScheme`] if the first part is not `Bearer`
/// - [`AuthError::MalformedCredentials`] if there are not exactly two parts
pub fn extract_bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let value = match header.map(str::trim) {
        None | Some("" | CLEARED_COOKIE) => return Err(AuthError::MissingCredentials),
        Some(v) => v,
    };

    let mut parts = value.split_whitespace();
    let scheme = parts.next().unwrap_or_default();
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return Err(AuthError::MissingScheme);
    }

    match (parts.next(), parts.next()) {
        (Some(token), None) => Ok(token),
        _ => Err(AuthError::MalformedCredentials),
    }
}
