use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use rcfg_sdk::objects::CreateEntryRequest;

use crate::api::extractors::PanelAuth;
use crate::state::AppState;

use super::{PanelApiError, entry_to_response};

/// `POST /config/add_config` — create a new entry at version 1.
pub(super) async fn create_entry(
    State(state): State<AppState>,
    PanelAuth(principal): PanelAuth,
    Json(request): Json<CreateEntryRequest>,
) -> Result<impl IntoResponse, PanelApiError> {
    let record = state.gateway.create_entry(request).await?;

    tracing::info!(
        key = %record.key,
        by = %principal.subject,
        "configuration entry created"
    );

    Ok((StatusCode::CREATED, Json(entry_to_response(&record))))
}
