//! Application state shared across all request handlers.

use crate::config::runtime::SharedConfig;
use rcfg_core::auth::IdentityVerifier;
use rcfg_core::gateway::ConfigGateway;
use std::sync::Arc;

/// Application state that is shared across all request handlers.
///
/// This is cloneable and cheap to pass around (everything is behind Arc).
#[derive(Clone)]
pub struct AppState {
    /// The config store gateway (owns the database pool).
    pub gateway: Arc<ConfigGateway>,
    /// Runtime configuration (can be reloaded via SIGHUP).
    pub config: SharedConfig,
    /// Identity-token verification, delegated to the external provider.
    pub verifier: Arc<dyn IdentityVerifier>,
}

impl AppState {
    pub fn new(
        gateway: ConfigGateway,
        config: SharedConfig,
        verifier: Arc<dyn IdentityVerifier>,
    ) -> Self {
        Self {
            gateway: Arc::new(gateway),
            config,
            verifier,
        }
    }
}
