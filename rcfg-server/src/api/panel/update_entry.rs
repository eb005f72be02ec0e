use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use rcfg_sdk::objects::UpdateEntryRequest;

use crate::api::extractors::PanelAuth;
use crate::state::AppState;

use super::{PanelApiError, entry_to_response};

/// `PUT /config/update/{key}` — update value/description under the version
/// check. A supplied `countryOverrides` replaces the stored map wholesale.
pub(super) async fn update_entry(
    State(state): State<AppState>,
    PanelAuth(principal): PanelAuth,
    Path(key): Path<String>,
    Json(request): Json<UpdateEntryRequest>,
) -> Result<impl IntoResponse, PanelApiError> {
    let record = state.gateway.update_entry(&key, request).await?;

    tracing::info!(
        key = %record.key,
        version = record.version,
        by = %principal.subject,
        "configuration entry updated"
    );

    Ok(Json(entry_to_response(&record)))
}
