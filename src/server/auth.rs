//! Bearer-token shim.
//!
//! Requires `Authorization: Bearer <token>` with a non-empty token; any
//! syntactically valid token resolves to one fixed local identity. This is
//! an explicit placeholder, not a security boundary — a real deployment must
//! swap this extractor for verification against an identity provider that
//! derives a distinct identity per token. Handlers only ever see
//! [`CurrentUser`], so this is the single swap point.

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

use crate::server::error::ApiError;

/// The fixed identity every valid token resolves to.
pub const LOCAL_USER_ID: &str = "local-user";

/// The authenticated caller, as resolved from the Authorization header.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub String);

/// Extracts the token from a `Bearer <token>` header value.
/// Returns None for a missing scheme or an empty token.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let token = header_value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() { None } else { Some(token) }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthenticated)?;
        let _token = bearer_token(header_value).ok_or(ApiError::Unauthenticated)?;
        Ok(CurrentUser(LOCAL_USER_ID.to_string()))
    }
}
