use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use rcfg_sdk::objects::MessageResponse;

use crate::api::extractors::PanelAuth;
use crate::state::AppState;

use super::PanelApiError;

/// `DELETE /config/delete/{key}` — remove an entry and all its overrides.
pub(super) async fn delete_entry(
    State(state): State<AppState>,
    PanelAuth(principal): PanelAuth,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, PanelApiError> {
    state.gateway.delete_entry(&key).await?;

    tracing::info!(key = %key, by = %principal.subject, "configuration entry deleted");

    Ok(Json(MessageResponse {
        message: "Configuration deleted successfully".to_string(),
    }))
}
