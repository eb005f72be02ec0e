//! The `config_entries` table: record type and single-statement messages.
//!
//! Every message is a [`kanau::processor::Processor`] impl on
//! [`DatabaseProcessor`]. Version-guarded statements return the row only
//! when the caller's version matched; the gateway turns a miss into
//! `NotFound` or `VersionConflict`.

use compact_str::CompactString;
use kanau::processor::Processor;
use rcfg_sdk::objects::CountryOverrides;
use sqlx::types::Json;

use crate::framework::DatabaseProcessor;

/// One row of `config_entries`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ConfigEntryRecord {
    pub key: String,
    pub value: String,
    pub description: String,
    pub country_overrides: Json<CountryOverrides>,
    pub version: i64,
    pub created_at: time::OffsetDateTime,
    pub updated_at: time::OffsetDateTime,
}

/// Fetch every entry, ordered by key.
#[derive(Debug, Clone)]
pub struct ListConfigEntries;

impl Processor<ListConfigEntries> for DatabaseProcessor {
    type Output = Vec<ConfigEntryRecord>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ListConfigEntries")]
    async fn process(&self, _query: ListConfigEntries) -> Result<Self::Output, sqlx::Error> {
        sqlx::query_as::<_, ConfigEntryRecord>(
            "SELECT key, value, description, country_overrides, version, created_at, updated_at \
             FROM config_entries \
             ORDER BY key",
        )
        .fetch_all(&self.pool)
        .await
    }
}

/// Fetch a single entry by key.
#[derive(Debug, Clone)]
pub struct GetConfigEntry {
    pub key: String,
}

impl Processor<GetConfigEntry> for DatabaseProcessor {
    type Output = Option<ConfigEntryRecord>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetConfigEntry")]
    async fn process(&self, query: GetConfigEntry) -> Result<Self::Output, sqlx::Error> {
        sqlx::query_as::<_, ConfigEntryRecord>(
            "SELECT key, value, description, country_overrides, version, created_at, updated_at \
             FROM config_entries \
             WHERE key = $1",
        )
        .bind(&query.key)
        .fetch_optional(&self.pool)
        .await
    }
}

/// Insert a fresh entry at version 1 with an empty override map.
///
/// Racing creates are arbitrated by the primary key: the loser surfaces a
/// unique violation, which the gateway maps to `KeyConflict`.
#[derive(Debug, Clone)]
pub struct InsertConfigEntry {
    pub key: String,
    pub value: String,
    pub description: String,
}

impl Processor<InsertConfigEntry> for DatabaseProcessor {
    type Output = ConfigEntryRecord;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:InsertConfigEntry")]
    async fn process(&self, insert: InsertConfigEntry) -> Result<Self::Output, sqlx::Error> {
        sqlx::query_as::<_, ConfigEntryRecord>(
            "INSERT INTO config_entries (key, value, description, country_overrides, version) \
             VALUES ($1, $2, $3, '{}'::jsonb, 1) \
             RETURNING key, value, description, country_overrides, version, created_at, updated_at",
        )
        .bind(&insert.key)
        .bind(&insert.value)
        .bind(&insert.description)
        .fetch_one(&self.pool)
        .await
    }
}

/// Compare-and-swap update of value/description (and optionally the whole
/// override map) guarded by the caller's version.
///
/// Returns `None` when no row matched, i.e. the key is absent or the
/// version was stale. A supplied override map replaces the stored one
/// wholesale; `None` leaves it untouched.
#[derive(Debug, Clone)]
pub struct CasUpdateConfigEntry {
    pub key: String,
    pub value: String,
    pub description: String,
    pub expected_version: i64,
    pub country_overrides: Option<CountryOverrides>,
}

impl Processor<CasUpdateConfigEntry> for DatabaseProcessor {
    type Output = Option<ConfigEntryRecord>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:CasUpdateConfigEntry")]
    async fn process(&self, update: CasUpdateConfigEntry) -> Result<Self::Output, sqlx::Error> {
        sqlx::query_as::<_, ConfigEntryRecord>(
            "UPDATE config_entries \
             SET value = $2, \
                 description = $3, \
                 country_overrides = COALESCE($4, country_overrides), \
                 version = version + 1, \
                 updated_at = now() \
             WHERE key = $1 AND version = $5 \
             RETURNING key, value, description, country_overrides, version, created_at, updated_at",
        )
        .bind(&update.key)
        .bind(&update.value)
        .bind(&update.description)
        .bind(update.country_overrides.map(Json))
        .bind(update.expected_version)
        .fetch_optional(&self.pool)
        .await
    }
}

/// Drop one country from an entry's override map.
///
/// Deliberately version-free: the single JSONB `-` statement cannot clobber
/// sibling overrides written concurrently, and the version counter stays
/// put. `updated_at` is still refreshed. Returns `None` if the key is
/// absent; removing a country that was never set is a successful no-op.
#[derive(Debug, Clone)]
pub struct RemoveCountryOverride {
    pub key: String,
    pub country: CompactString,
}

impl Processor<RemoveCountryOverride> for DatabaseProcessor {
    type Output = Option<ConfigEntryRecord>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:RemoveCountryOverride")]
    async fn process(&self, remove: RemoveCountryOverride) -> Result<Self::Output, sqlx::Error> {
        sqlx::query_as::<_, ConfigEntryRecord>(
            "UPDATE config_entries \
             SET country_overrides = country_overrides - $2::text, \
                 updated_at = now() \
             WHERE key = $1 \
             RETURNING key, value, description, country_overrides, version, created_at, updated_at",
        )
        .bind(&remove.key)
        .bind(remove.country.as_str())
        .fetch_optional(&self.pool)
        .await
    }
}

/// Delete an entry and, with it, all of its overrides.
///
/// Returns the number of rows removed (0 when the key was absent).
#[derive(Debug, Clone)]
pub struct DeleteConfigEntry {
    pub key: String,
}

impl Processor<DeleteConfigEntry> for DatabaseProcessor {
    type Output = u64;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:DeleteConfigEntry")]
    async fn process(&self, delete: DeleteConfigEntry) -> Result<Self::Output, sqlx::Error> {
        let result = sqlx::query("DELETE FROM config_entries WHERE key = $1")
            .bind(&delete.key)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
