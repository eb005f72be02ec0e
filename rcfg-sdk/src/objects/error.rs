//! Error and status-message bodies shared by every endpoint.

use serde::{Deserialize, Serialize};

/// JSON body of every non-2xx response.
///
/// `current_version` is populated only on 409 responses, carrying the
/// authoritative stored version so the caller can re-fetch and retry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_version: Option<i64>,
}

impl ApiErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            current_version: None,
        }
    }

    pub fn version_conflict(current_version: i64) -> Self {
        Self {
            error: "Version conflict".to_string(),
            current_version: Some(current_version),
        }
    }
}

/// Body of successful delete responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
