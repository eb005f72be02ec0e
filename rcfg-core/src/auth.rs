//! Identity-token verification, delegated to an external provider.
//!
//! The panel tier never checks credentials itself: it hands the bearer
//! token to an [`IdentityVerifier`] and either gets the authenticated
//! [`Principal`] back or fails. The production implementation is
//! [`HttpIdentityVerifier`]; tests inject [`StaticVerifier`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// The identity the provider vouched for.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Principal {
    #[serde(rename = "sub")]
    pub subject: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Why verification failed. Both variants end up as a 401 at the HTTP
/// boundary; `Provider` is additionally logged with its cause.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("identity token rejected by provider")]
    Rejected,

    #[error("identity provider request failed: {0}")]
    Provider(#[from] reqwest::Error),
}

/// Capability consumed from the external identity provider:
/// `verify(token) -> principal | fails`.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Principal, VerifyError>;
}

#[derive(Serialize)]
struct VerifyRequest<'a> {
    token: &'a str,
}

/// Verifier that POSTs the token to the provider's verify endpoint and
/// decodes the principal from the response.
pub struct HttpIdentityVerifier {
    http: reqwest::Client,
    verify_url: Url,
    timeout: Duration,
}

impl HttpIdentityVerifier {
    const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    pub fn new(verify_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            verify_url,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Replace the default `reqwest::Client` with a custom one.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    /// Per-request timeout for the provider round trip.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl IdentityVerifier for HttpIdentityVerifier {
    async fn verify(&self, token: &str) -> Result<Principal, VerifyError> {
        let resp = self
            .http
            .post(self.verify_url.clone())
            .timeout(self.timeout)
            .json(&VerifyRequest { token })
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(VerifyError::Rejected);
        }

        Ok(resp.json::<Principal>().await?)
    }
}

/// Verifier that accepts exactly one token. For tests and local runs
/// without a reachable identity provider.
pub struct StaticVerifier {
    token: String,
    principal: Principal,
}

impl StaticVerifier {
    pub fn new(token: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            principal: Principal {
                subject: subject.into(),
                email: None,
            },
        }
    }
}

#[async_trait]
impl IdentityVerifier for StaticVerifier {
    async fn verify(&self, token: &str) -> Result<Principal, VerifyError> {
        if token == self.token {
            Ok(self.principal.clone())
        } else {
            Err(VerifyError::Rejected)
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[tokio::test]
    async fn test_static_verifier_accepts_only_its_token() {
        let verifier = StaticVerifier::new("valid-token", "admin@example.com");

        let principal = verifier.verify("valid-token").await.unwrap();
        assert_eq!(principal.subject, "admin@example.com");

        assert!(matches!(
            verifier.verify("other-token").await,
            Err(VerifyError::Rejected)
        ));
    }

    #[test]
    fn test_principal_decodes_provider_payload() {
        let principal: Principal =
            serde_json::from_str(r#"{"sub":"uid-123","email":"ops@example.com"}"#).unwrap();
        assert_eq!(principal.subject, "uid-123");
        assert_eq!(principal.email.as_deref(), Some("ops@example.com"));

        // email is optional in the provider response.
        let bare: Principal = serde_json::from_str(r#"{"sub":"uid-123"}"#).unwrap();
        assert!(bare.email.is_none());
    }
}
