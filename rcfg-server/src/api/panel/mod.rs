//! Panel API handlers.
//!
//! These endpoints are called by the admin control panel and require an
//! identity token verified by the external provider (`Authorization:
//! Bearer …`).
//!
//! # Endpoints
//!
//! - `GET    /all`                              – list every entry in full
//! - `POST   /add_config`                       – create an entry
//! - `PUT    /update/{key}`                     – update an entry (version-checked)
//! - `PUT    /update/{key}/country/{country}`   – set a country override (version-checked)
//! - `DELETE /delete/{key}/country/{country}`   – remove a country override
//! - `DELETE /delete/{key}`                     – remove an entry
//!
//! Routes are mounted under `/config` by the main router.

use axum::{
    Json, Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

mod create_entry;
mod delete_entry;
mod delete_override;
mod list_all;
mod set_override;
mod update_entry;

/// Build the Panel API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/all", get(list_all::list_all))
        .route("/add_config", post(create_entry::create_entry))
        .route("/update/{key}", put(update_entry::update_entry))
        .route(
            "/update/{key}/country/{country}",
            put(set_override::set_override),
        )
        .route(
            "/delete/{key}/country/{country}",
            delete(delete_override::delete_override),
        )
        .route("/delete/{key}", delete(delete_entry::delete_entry))
}

// ---------------------------------------------------------------------------
// Shared error type
// ---------------------------------------------------------------------------

use rcfg_core::entities::config_entries::ConfigEntryRecord;
use rcfg_core::gateway::GatewayError;
use rcfg_sdk::objects::{ApiErrorBody, ConfigEntryResponse};

/// Errors that can occur in Panel API handlers.
#[derive(Debug)]
pub(crate) struct PanelApiError(pub GatewayError);

impl From<GatewayError> for PanelApiError {
    fn from(err: GatewayError) -> Self {
        Self(err)
    }
}

impl IntoResponse for PanelApiError {
    fn into_response(self) -> axum::response::Response {
        match self.0 {
            GatewayError::MissingField(field) => {
                let body = ApiErrorBody::new(format!("Missing required field: {field}"));
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            GatewayError::KeyConflict => {
                let body = ApiErrorBody::new("Configuration key already exists");
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            GatewayError::NotFound => {
                let body = ApiErrorBody::new("Configuration not found");
                (StatusCode::NOT_FOUND, Json(body)).into_response()
            }
            GatewayError::VersionConflict { current } => {
                (StatusCode::CONFLICT, Json(ApiErrorBody::version_conflict(current)))
                    .into_response()
            }
            GatewayError::Store(e) => {
                tracing::error!(error = %e, "Panel API store error");
                let body = ApiErrorBody::new("Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Convert a `ConfigEntryRecord` (DB model) into a `ConfigEntryResponse`
/// (API model).
pub(crate) fn entry_to_response(record: &ConfigEntryRecord) -> ConfigEntryResponse {
    ConfigEntryResponse {
        key: record.key.clone(),
        value: record.value.clone(),
        description: record.description.clone(),
        country_overrides: record.country_overrides.0.clone(),
        version: record.version,
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    async fn decode_body(response: axum::response::Response) -> ApiErrorBody {
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    // Stale-version mutations must come back as 409 carrying the
    // authoritative stored version, so the caller can re-fetch and retry.
    #[tokio::test]
    async fn test_version_conflict_maps_to_409_with_current_version() {
        let response =
            PanelApiError(GatewayError::VersionConflict { current: 2 }).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = decode_body(response).await;
        assert_eq!(body.error, "Version conflict");
        assert_eq!(body.current_version, Some(2));
    }

    #[tokio::test]
    async fn test_client_error_status_mapping() {
        let cases = [
            (GatewayError::MissingField("value"), StatusCode::BAD_REQUEST),
            (GatewayError::KeyConflict, StatusCode::BAD_REQUEST),
            (GatewayError::NotFound, StatusCode::NOT_FOUND),
        ];
        for (err, expected) in cases {
            let response = PanelApiError(err).into_response();
            assert_eq!(response.status(), expected);

            // Only 409s carry a version; every other body is just a message.
            let body = decode_body(response).await;
            assert!(body.current_version.is_none());
            assert!(!body.error.is_empty());
        }
    }

    #[tokio::test]
    async fn test_store_errors_map_to_500_without_detail() {
        let response = PanelApiError(GatewayError::Store(sqlx::Error::PoolTimedOut))
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = decode_body(response).await;
        assert_eq!(body.error, "Internal server error");
        assert!(body.current_version.is_none());
    }
}
