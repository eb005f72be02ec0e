use axum::{Json, extract::State, response::IntoResponse};

use crate::api::extractors::PanelAuth;
use crate::state::AppState;

use super::{PanelApiError, entry_to_response};

/// `GET /config/all` — list every entry in full (panel view).
pub(super) async fn list_all(
    State(state): State<AppState>,
    _auth: PanelAuth,
) -> Result<impl IntoResponse, PanelApiError> {
    let records = state.gateway.list_all().await?;
    let response: Vec<_> = records.iter().map(entry_to_response).collect();
    Ok(Json(response))
}
