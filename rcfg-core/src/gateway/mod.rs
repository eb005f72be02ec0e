//! The Config Store Gateway.
//!
//! Mediates every read and write of configuration entries, enforcing the
//! optimistic-concurrency protocol: each entry carries a version counter,
//! and a mutation is applied only when the caller echoes the stored
//! version. Guarded mutations run as Postgres compare-and-swap statements
//! (plain, or inside a row-locking transaction for the map
//! read-modify-write), so two writers racing from the same observed
//! version cannot both win.
//!
//! One mutator stays outside the version discipline on purpose:
//! [`ConfigGateway::delete_country_override`] takes no version and does not
//! bump the counter, matching the service's wire contract (the DELETE route
//! carries no body).

pub mod resolve;

use compact_str::CompactString;
use kanau::processor::Processor;
use rcfg_sdk::objects::{
    CountryOverrides, CreateEntryRequest, ResolvedConfig, SetOverrideRequest, UpdateEntryRequest,
};
use sqlx::PgPool;
use sqlx::types::Json;

use crate::entities::config_entries::{
    CasUpdateConfigEntry, ConfigEntryRecord, DeleteConfigEntry, GetConfigEntry, InsertConfigEntry,
    ListConfigEntries, RemoveCountryOverride,
};
use crate::framework::DatabaseProcessor;

/// Failure taxonomy of the gateway operations.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// A required input was absent or empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Create was called with a key that already exists.
    #[error("configuration key already exists")]
    KeyConflict,

    /// No entry with the given key.
    #[error("configuration not found")]
    NotFound,

    /// The caller's version token was stale. `current` is the stored
    /// version at the time of the request, so the caller can re-fetch,
    /// re-apply, and retry.
    #[error("version conflict: current version is {current}")]
    VersionConflict { current: i64 },

    /// The store itself failed.
    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),
}

/// Reject absent or empty required inputs.
fn require(field: &'static str, value: Option<String>) -> Result<String, GatewayError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(GatewayError::MissingField(field)),
    }
}

fn require_version(value: Option<i64>) -> Result<i64, GatewayError> {
    value.ok_or(GatewayError::MissingField("version"))
}

/// The gateway proper. Holds an injected pool handle; construct one per
/// process and share it (it is cheap to clone at the `PgPool` level).
pub struct ConfigGateway {
    db: DatabaseProcessor,
}

impl ConfigGateway {
    pub fn new(pool: PgPool) -> Self {
        Self {
            db: DatabaseProcessor { pool },
        }
    }

    fn pool(&self) -> &PgPool {
        &self.db.pool
    }

    /// Every entry in full, for the panel view.
    pub async fn list_all(&self) -> Result<Vec<ConfigEntryRecord>, GatewayError> {
        Ok(self.db.process(ListConfigEntries).await?)
    }

    /// Create a new entry at version 1 with an empty override map.
    pub async fn create_entry(
        &self,
        request: CreateEntryRequest,
    ) -> Result<ConfigEntryRecord, GatewayError> {
        let key = require("key", request.key)?;
        let value = require("value", request.value)?;
        let description = require("description", request.description)?;

        match self
            .db
            .process(InsertConfigEntry {
                key,
                value,
                description,
            })
            .await
        {
            Ok(record) => Ok(record),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(GatewayError::KeyConflict)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Replace value and description (and, when supplied, the whole
    /// override map) under the version check.
    pub async fn update_entry(
        &self,
        key: &str,
        request: UpdateEntryRequest,
    ) -> Result<ConfigEntryRecord, GatewayError> {
        let value = require("value", request.value)?;
        let description = require("description", request.description)?;
        let expected_version = require_version(request.version)?;

        let updated = self
            .db
            .process(CasUpdateConfigEntry {
                key: key.to_string(),
                value,
                description,
                expected_version,
                country_overrides: request.country_overrides,
            })
            .await?;

        match updated {
            Some(record) => Ok(record),
            None => Err(self.conflict_or_not_found(key).await?),
        }
    }

    /// Insert or replace one country's override under the version check.
    ///
    /// The override map is read, modified, and written back whole, so the
    /// exchange runs in a transaction with the row locked: the version
    /// check and the write observe the same row state.
    pub async fn set_country_override(
        &self,
        key: &str,
        country: &str,
        request: SetOverrideRequest,
    ) -> Result<ConfigEntryRecord, GatewayError> {
        if country.is_empty() {
            return Err(GatewayError::MissingField("country"));
        }
        let value = require("value", request.value)?;
        let expected_version = require_version(request.version)?;

        let mut tx = self.pool().begin().await?;

        let current = sqlx::query_as::<_, ConfigEntryRecord>(
            "SELECT key, value, description, country_overrides, version, created_at, updated_at \
             FROM config_entries \
             WHERE key = $1 \
             FOR UPDATE",
        )
        .bind(key)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(current) = current else {
            return Err(GatewayError::NotFound);
        };
        if current.version != expected_version {
            return Err(GatewayError::VersionConflict {
                current: current.version,
            });
        }

        let mut overrides: CountryOverrides = current.country_overrides.0;
        overrides.insert(CompactString::from(country), value);

        let updated = sqlx::query_as::<_, ConfigEntryRecord>(
            "UPDATE config_entries \
             SET country_overrides = $2, \
                 version = version + 1, \
                 updated_at = now() \
             WHERE key = $1 \
             RETURNING key, value, description, country_overrides, version, created_at, updated_at",
        )
        .bind(key)
        .bind(Json(overrides))
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Remove one country's override. Version-free by contract; removing a
    /// country with no override is a successful no-op.
    pub async fn delete_country_override(
        &self,
        key: &str,
        country: &str,
    ) -> Result<ConfigEntryRecord, GatewayError> {
        self.db
            .process(RemoveCountryOverride {
                key: key.to_string(),
                country: CompactString::from(country),
            })
            .await?
            .ok_or(GatewayError::NotFound)
    }

    /// Remove an entry together with all of its overrides.
    pub async fn delete_entry(&self, key: &str) -> Result<(), GatewayError> {
        let removed = self
            .db
            .process(DeleteConfigEntry {
                key: key.to_string(),
            })
            .await?;
        if removed == 0 {
            return Err(GatewayError::NotFound);
        }
        Ok(())
    }

    /// Compute the flat resolved view for the read-only tier, applying the
    /// country filter's overrides where present. Computed fresh per call.
    pub async fn resolve(&self, country: Option<&str>) -> Result<ResolvedConfig, GatewayError> {
        let records = self.db.process(ListConfigEntries).await?;
        Ok(resolve::resolve_records(&records, country))
    }

    /// A guarded update matched no row: report the live version if the key
    /// exists, otherwise `NotFound`.
    async fn conflict_or_not_found(&self, key: &str) -> Result<GatewayError, GatewayError> {
        let current = self
            .db
            .process(GetConfigEntry {
                key: key.to_string(),
            })
            .await?;
        Ok(match current {
            Some(record) => GatewayError::VersionConflict {
                current: record.version,
            },
            None => GatewayError::NotFound,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    // A lazy pool never connects; validation failures must surface before
    // any statement is issued.
    fn gateway() -> ConfigGateway {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unreachable")
            .unwrap();
        ConfigGateway::new(pool)
    }

    #[test]
    fn test_require_rejects_absent_and_empty() {
        assert!(matches!(
            require("value", None),
            Err(GatewayError::MissingField("value"))
        ));
        assert!(matches!(
            require("value", Some(String::new())),
            Err(GatewayError::MissingField("value"))
        ));
        assert_eq!(require("value", Some("3000".into())).unwrap(), "3000");
    }

    #[tokio::test]
    async fn test_create_entry_requires_all_fields() {
        let gw = gateway();
        let missing_key = CreateEntryRequest {
            key: None,
            value: Some("3000".into()),
            description: Some("network timeout".into()),
        };
        assert!(matches!(
            gw.create_entry(missing_key).await,
            Err(GatewayError::MissingField("key"))
        ));

        let empty_value = CreateEntryRequest::new("timeout_ms", "", "network timeout");
        assert!(matches!(
            gw.create_entry(empty_value).await,
            Err(GatewayError::MissingField("value"))
        ));
    }

    #[tokio::test]
    async fn test_update_entry_requires_version() {
        let gw = gateway();
        let request = UpdateEntryRequest {
            value: Some("5000".into()),
            description: Some("network timeout".into()),
            version: None,
            country_overrides: None,
        };
        assert!(matches!(
            gw.update_entry("timeout_ms", request).await,
            Err(GatewayError::MissingField("version"))
        ));
    }

    #[tokio::test]
    async fn test_set_override_validates_inputs() {
        let gw = gateway();
        assert!(matches!(
            gw.set_country_override("timeout_ms", "", SetOverrideRequest::new("4000", 1))
                .await,
            Err(GatewayError::MissingField("country"))
        ));
        assert!(matches!(
            gw.set_country_override("timeout_ms", "FR", SetOverrideRequest::default())
                .await,
            Err(GatewayError::MissingField("value"))
        ));
    }
}
