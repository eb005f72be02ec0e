use sqlx::PgPool;

/// Target of all single-statement database messages.
///
/// The read-modify-write path ([`crate::gateway::ConfigGateway::set_country_override`])
/// drives a `sqlx::Transaction` directly instead.
pub struct DatabaseProcessor {
    pub pool: PgPool,
}
