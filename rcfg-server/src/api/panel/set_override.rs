use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use rcfg_sdk::objects::SetOverrideRequest;

use crate::api::extractors::PanelAuth;
use crate::state::AppState;

use super::{PanelApiError, entry_to_response};

/// `PUT /config/update/{key}/country/{country}` — insert or replace one
/// country's override under the version check.
pub(super) async fn set_override(
    State(state): State<AppState>,
    PanelAuth(principal): PanelAuth,
    Path((key, country)): Path<(String, String)>,
    Json(request): Json<SetOverrideRequest>,
) -> Result<impl IntoResponse, PanelApiError> {
    let record = state
        .gateway
        .set_country_override(&key, &country, request)
        .await?;

    tracing::info!(
        key = %record.key,
        country = %country,
        version = record.version,
        by = %principal.subject,
        "country override set"
    );

    Ok(Json(entry_to_response(&record)))
}
