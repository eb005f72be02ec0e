//! Shared wire types for the remote configuration service, plus optional
//! typed HTTP clients (behind the `client` feature).

pub mod objects;

#[cfg(feature = "client")]
pub mod client;

/// Header carrying the shared secret for the read-only client tier.
pub const API_TOKEN_HEADER: &str = "x-api-token";
