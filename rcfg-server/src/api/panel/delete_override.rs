use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use rcfg_sdk::objects::MessageResponse;

use crate::api::extractors::PanelAuth;
use crate::state::AppState;

use super::PanelApiError;

/// `DELETE /config/delete/{key}/country/{country}` — remove one country's
/// override. No version token; deleting an absent override succeeds.
pub(super) async fn delete_override(
    State(state): State<AppState>,
    PanelAuth(principal): PanelAuth,
    Path((key, country)): Path<(String, String)>,
) -> Result<impl IntoResponse, PanelApiError> {
    state
        .gateway
        .delete_country_override(&key, &country)
        .await?;

    tracing::info!(
        key = %key,
        country = %country,
        by = %principal.subject,
        "country override deleted"
    );

    Ok(Json(MessageResponse {
        message: "Country override deleted successfully".to_string(),
    }))
}
