//! Reader API client (mobile/API-token clients → config server).
//!
//! The read-only tier authenticates with a shared secret in the
//! `x-api-token` header and only ever sees the resolved key → value map.

use reqwest::Client;
use url::Url;

use super::{ClientError, parse_response};
use crate::API_TOKEN_HEADER;
use crate::objects::ResolvedConfig;

/// Typed HTTP client for the shared-secret (read-only) tier.
#[derive(Debug, Clone)]
pub struct ReaderClient {
    http: Client,
    base_url: Url,
    api_token: String,
}

impl ReaderClient {
    /// Create a new `ReaderClient`.
    ///
    /// * `base_url` – root URL of the config server.
    /// * `api_token` – the shared read-only secret.
    pub fn new(base_url: Url, api_token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url,
            api_token: api_token.into(),
        }
    }

    /// Replace the default `reqwest::Client` with a custom one.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// `GET /config` – fetch the resolved configuration.
    ///
    /// With a `country`, each entry resolves to its override for that
    /// country when one exists, otherwise to its default value.
    pub async fn resolve(&self, country: Option<&str>) -> Result<ResolvedConfig, ClientError> {
        let url = self.base_url.join("/config")?;
        let mut req = self.http.get(url).header(API_TOKEN_HEADER, &self.api_token);
        if let Some(country) = country {
            req = req.query(&[("country", country)]);
        }
        let resp = req.send().await?;
        parse_response(resp).await
    }
}
