//! Runtime configuration types.
//!
//! Only the auth section lives behind a shared lock: it is the one part
//! SIGHUP can swap while requests are in flight. The server section is
//! consumed once at startup (the listener is already bound).

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use url::Url;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen: SocketAddr,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Shared secret for the read-only tier.
    pub api_token: String,
    /// Identity provider verify endpoint (panel tier).
    pub identity_verify_url: Url,
    pub identity_timeout: Duration,
}

/// The reloadable runtime sections.
#[derive(Clone)]
pub struct SharedConfig {
    pub auth: Arc<RwLock<AuthConfig>>,
}
