//! Custom Axum extractors for request authentication.
//!
//! Provides:
//! - `PanelAuth` — verifies the `Authorization: Bearer …` identity token
//!   against the external identity provider (panel tier).
//! - `ReaderAuth` — compares the `x-api-token` header against the
//!   configured shared secret (read-only tier).
//!
//! Either tier failing yields a 401 with a generic JSON error body; no
//! internal detail leaks to the caller.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use rcfg_core::auth::{Principal, VerifyError};
use rcfg_sdk::API_TOKEN_HEADER;
use rcfg_sdk::objects::ApiErrorBody;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// PanelAuth — identity-token tier
// ---------------------------------------------------------------------------

/// Extractor for the identity-token tier. On success carries the
/// [`Principal`] the provider vouched for, for audit logging in handlers.
pub struct PanelAuth(pub Principal);

/// Rejections of the identity-token tier. Both are 401s; the underlying
/// cause of a provider failure only ever reaches the server log.
#[derive(Debug)]
pub enum PanelAuthError {
    MissingToken,
    InvalidToken,
}

impl IntoResponse for PanelAuthError {
    fn into_response(self) -> Response {
        let message = match self {
            PanelAuthError::MissingToken => "Unauthorized: No token provided",
            PanelAuthError::InvalidToken => "Unauthorized: Invalid token",
        };
        (StatusCode::UNAUTHORIZED, Json(ApiErrorBody::new(message))).into_response()
    }
}

impl FromRequestParts<AppState> for PanelAuth {
    type Rejection = PanelAuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(PanelAuthError::MissingToken)?
            .to_str()
            .map_err(|_| PanelAuthError::MissingToken)?;

        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or(PanelAuthError::MissingToken)?;

        match state.verifier.verify(token).await {
            Ok(principal) => Ok(PanelAuth(principal)),
            Err(VerifyError::Rejected) => Err(PanelAuthError::InvalidToken),
            Err(VerifyError::Provider(e)) => {
                tracing::warn!(error = %e, "identity provider verification failed");
                Err(PanelAuthError::InvalidToken)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// ReaderAuth — shared-secret tier
// ---------------------------------------------------------------------------

/// Extractor for the read-only shared-secret tier.
pub struct ReaderAuth;

/// Rejection of the shared-secret tier.
#[derive(Debug)]
pub struct ReaderAuthError;

impl IntoResponse for ReaderAuthError {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(ApiErrorBody::new("Unauthorized: Invalid API token")),
        )
            .into_response()
    }
}

impl FromRequestParts<AppState> for ReaderAuth {
    type Rejection = ReaderAuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let supplied = parts
            .headers
            .get(API_TOKEN_HEADER)
            .ok_or(ReaderAuthError)?
            .to_str()
            .map_err(|_| ReaderAuthError)?;

        let auth = state.config.auth.read().await;
        if !token_matches(supplied.as_bytes(), auth.api_token.as_bytes()) {
            return Err(ReaderAuthError);
        }

        Ok(ReaderAuth)
    }
}

/// Length-checked, constant-time byte comparison for the shared secret.
fn token_matches(supplied: &[u8], expected: &[u8]) -> bool {
    if supplied.len() != expected.len() {
        return false;
    }
    supplied
        .iter()
        .zip(expected)
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_matches() {
        assert!(token_matches(b"reader-secret", b"reader-secret"));
        assert!(!token_matches(b"reader-secret", b"reader-secreu"));
        assert!(!token_matches(b"reader", b"reader-secret"));
        assert!(!token_matches(b"", b"reader-secret"));
        assert!(token_matches(b"", b""));
    }
}
