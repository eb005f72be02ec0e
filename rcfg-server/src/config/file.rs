//! TOML file configuration structures.
//!
//! These structs directly map to the `rcfg-config.toml` file format.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use url::Url;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    pub server: ServerSection,
    pub auth: AuthSection,
}

/// Server configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    /// The address and port to listen on (e.g., "0.0.0.0:8080").
    #[serde(default = "default_listen_addr")]
    pub listen: SocketAddr,
}

fn default_listen_addr() -> SocketAddr {
    "0.0.0.0:8080".parse().expect("valid default address")
}

/// Authentication configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSection {
    /// Shared secret for the read-only client tier (`x-api-token` header).
    pub api_token: String,
    pub identity: IdentitySection,
}

/// External identity provider settings for the panel tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentitySection {
    /// Endpoint that verifies bearer tokens and returns the principal.
    pub verify_url: Url,
    /// Per-request timeout for provider round trips, in seconds.
    #[serde(default = "default_verify_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_verify_timeout_secs() -> u64 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parsing() {
        let toml_str = r#"
[server]
listen = "127.0.0.1:3000"

[auth]
api_token = "reader-secret"

[auth.identity]
verify_url = "https://id.example.com/v1/verify"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.listen.port(), 3000);
        assert_eq!(config.auth.api_token, "reader-secret");
        assert_eq!(
            config.auth.identity.verify_url.as_str(),
            "https://id.example.com/v1/verify"
        );
        // Timeout falls back to the default when omitted.
        assert_eq!(config.auth.identity.timeout_secs, 5);
    }

    #[test]
    fn test_listen_defaults_when_omitted() {
        let toml_str = r#"
[server]

[auth]
api_token = "reader-secret"

[auth.identity]
verify_url = "https://id.example.com/v1/verify"
timeout_secs = 2
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.listen, default_listen_addr());
        assert_eq!(config.auth.identity.timeout_secs, 2);
    }
}
