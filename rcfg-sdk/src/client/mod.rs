//! HTTP clients for both trust tiers.
//!
//! Gated behind the `client` cargo feature so downstream crates that only
//! need the shared types do not pull in `reqwest`.

mod panel;
mod reader;

pub use panel::PanelClient;
pub use reader::ReaderClient;

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::objects::ApiErrorBody;

/// Errors produced by the SDK HTTP clients.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure (DNS, TLS, connection reset, …).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server rejected a mutation because the supplied version was
    /// stale. `current_version` is the authoritative stored version;
    /// re-fetch, re-apply the change, and resubmit with it.
    #[error("version conflict: current version is {current_version}")]
    VersionConflict { current_version: i64 },

    /// The server returned a non-2xx status code.
    #[error("api error: status {status}, error: {error}")]
    Api { status: StatusCode, error: String },

    /// Response body could not be deserialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The base URL could not be joined with the endpoint path.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

/// Decode a success body, or map an error response onto [`ClientError`].
async fn parse_response<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp.json::<T>().await?);
    }

    let body = resp.text().await.unwrap_or_default();
    let decoded: Option<ApiErrorBody> = serde_json::from_str(&body).ok();

    if status == StatusCode::CONFLICT {
        if let Some(current_version) = decoded.as_ref().and_then(|b| b.current_version) {
            return Err(ClientError::VersionConflict { current_version });
        }
    }

    Err(ClientError::Api {
        status,
        error: decoded.map_or(body, |b| b.error),
    })
}
