//! Panel API client (admin control panel → config server).
//!
//! All requests carry the administrator's identity token in the
//! `Authorization: Bearer …` header; the server forwards it to the
//! configured identity provider for verification.

use reqwest::Client;
use url::Url;

use super::{ClientError, parse_response};
use crate::objects::{
    ConfigEntryResponse, CreateEntryRequest, MessageResponse, SetOverrideRequest,
    UpdateEntryRequest,
};

/// Typed HTTP client for the identity-token (panel) tier.
#[derive(Debug, Clone)]
pub struct PanelClient {
    http: Client,
    base_url: Url,
    identity_token: String,
}

impl PanelClient {
    /// Create a new `PanelClient`.
    ///
    /// * `base_url` – root URL of the config server.
    /// * `identity_token` – bearer token issued by the identity provider.
    pub fn new(base_url: Url, identity_token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url,
            identity_token: identity_token.into(),
        }
    }

    /// Replace the default `reqwest::Client` with a custom one.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.identity_token)
    }

    /// `GET /config/all` – list every entry in full.
    pub async fn list_all(&self) -> Result<Vec<ConfigEntryResponse>, ClientError> {
        let url = self.base_url.join("/config/all")?;
        let resp = self
            .http
            .get(url)
            .header(reqwest::header::AUTHORIZATION, self.bearer())
            .send()
            .await?;
        parse_response(resp).await
    }

    /// `POST /config/add_config` – create a new entry.
    pub async fn create_entry(
        &self,
        request: &CreateEntryRequest,
    ) -> Result<ConfigEntryResponse, ClientError> {
        let url = self.base_url.join("/config/add_config")?;
        let resp = self
            .http
            .post(url)
            .header(reqwest::header::AUTHORIZATION, self.bearer())
            .json(request)
            .send()
            .await?;
        parse_response(resp).await
    }

    /// `PUT /config/update/{key}` – update value/description (and optionally
    /// replace the override map) under the version check.
    pub async fn update_entry(
        &self,
        key: &str,
        request: &UpdateEntryRequest,
    ) -> Result<ConfigEntryResponse, ClientError> {
        let url = self.base_url.join(&format!("/config/update/{key}"))?;
        let resp = self
            .http
            .put(url)
            .header(reqwest::header::AUTHORIZATION, self.bearer())
            .json(request)
            .send()
            .await?;
        parse_response(resp).await
    }

    /// `PUT /config/update/{key}/country/{country}` – insert or replace a
    /// single country override under the version check.
    pub async fn set_country_override(
        &self,
        key: &str,
        country: &str,
        request: &SetOverrideRequest,
    ) -> Result<ConfigEntryResponse, ClientError> {
        let url = self
            .base_url
            .join(&format!("/config/update/{key}/country/{country}"))?;
        let resp = self
            .http
            .put(url)
            .header(reqwest::header::AUTHORIZATION, self.bearer())
            .json(request)
            .send()
            .await?;
        parse_response(resp).await
    }

    /// `DELETE /config/delete/{key}/country/{country}` – remove one country
    /// override. No version token; removing an absent country succeeds.
    pub async fn delete_country_override(
        &self,
        key: &str,
        country: &str,
    ) -> Result<MessageResponse, ClientError> {
        let url = self
            .base_url
            .join(&format!("/config/delete/{key}/country/{country}"))?;
        let resp = self
            .http
            .delete(url)
            .header(reqwest::header::AUTHORIZATION, self.bearer())
            .send()
            .await?;
        parse_response(resp).await
    }

    /// `DELETE /config/delete/{key}` – remove an entry and all its overrides.
    pub async fn delete_entry(&self, key: &str) -> Result<MessageResponse, ClientError> {
        let url = self.base_url.join(&format!("/config/delete/{key}"))?;
        let resp = self
            .http
            .delete(url)
            .header(reqwest::header::AUTHORIZATION, self.bearer())
            .send()
            .await?;
        parse_response(resp).await
    }
}
