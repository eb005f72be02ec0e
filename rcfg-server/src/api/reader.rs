//! Reader API handlers.
//!
//! The read-only tier for mobile/API-token clients. Authenticates with the
//! shared `x-api-token` secret and only ever sees the resolved key → value
//! map — no versions, descriptions, or override maps.
//!
//! # Endpoints
//!
//! - `GET /` (mounted at `/config`) – resolved configuration, optionally
//!   filtered by `?country=CC`

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use rcfg_core::gateway::GatewayError;
use rcfg_sdk::objects::{ApiErrorBody, ResolveQuery};

use crate::api::extractors::ReaderAuth;
use crate::state::AppState;

/// Build the Reader API router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(resolve_config))
}

/// `GET /config?country=CC` — the resolved view, computed fresh per call.
async fn resolve_config(
    State(state): State<AppState>,
    _auth: ReaderAuth,
    Query(query): Query<ResolveQuery>,
) -> Result<impl IntoResponse, ReaderApiError> {
    let resolved = state.gateway.resolve(query.country.as_deref()).await?;
    Ok(Json(resolved))
}

/// Errors that can occur in Reader API handlers.
///
/// The read path has no validation or version protocol, so everything the
/// gateway can throw here is a store fault.
#[derive(Debug)]
struct ReaderApiError(GatewayError);

impl From<GatewayError> for ReaderApiError {
    fn from(err: GatewayError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ReaderApiError {
    fn into_response(self) -> axum::response::Response {
        tracing::error!(error = %self.0, "Reader API store error");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiErrorBody::new("Internal server error")),
        )
            .into_response()
    }
}
