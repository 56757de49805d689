//! Bearer token guard for protected routes.
//!
//! Flow Overview: read `Authorization: Bearer <token>`, verify it, and hand the
//! claims back to the caller. A missing token is a 401; a token that fails
//! verification is a 403. Roles and scopes are not checked here.

use super::{AuthError, token::Claims, token::TokenService};
use axum::http::{HeaderMap, header::AUTHORIZATION};

/// Extract the token from an `Authorization: Bearer <token>` header.
/// The scheme is matched case-insensitively.
#[must_use]
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Verify the request's bearer token and return its claims.
///
/// # Errors
/// [`AuthError::TokenMissing`] when there is no bearer token,
/// [`AuthError::TokenInvalid`] or [`AuthError::TokenExpired`] when verification fails.
pub fn require_bearer(headers: &HeaderMap, tokens: &TokenService) -> Result<Claims, AuthError> {
    let token = bearer_token(headers).ok_or(AuthError::TokenMissing)?;
    Ok(tokens.verify(token)?)
}
