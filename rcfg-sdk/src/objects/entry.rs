//! Configuration entry request and response types.
//!
//! Request fields that the server validates (rather than the JSON parser)
//! are `Option`s: an absent field must produce a 400 with the service's own
//! error body, not a deserialization rejection.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-country override values, keyed by country code.
pub type CountryOverrides = BTreeMap<CompactString, String>;

/// Full configuration entry as seen by the panel tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigEntryResponse {
    pub key: String,
    pub value: String,
    pub description: String,
    pub country_overrides: CountryOverrides,
    /// Optimistic-concurrency token; echo this back to mutate.
    pub version: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: time::OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: time::OffsetDateTime,
}

/// Body of `POST /config/add_config`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryRequest {
    pub key: Option<String>,
    pub value: Option<String>,
    pub description: Option<String>,
}

impl CreateEntryRequest {
    pub fn new(
        key: impl Into<String>,
        value: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            key: Some(key.into()),
            value: Some(value.into()),
            description: Some(description.into()),
        }
    }
}

/// Body of `PUT /config/update/{key}`.
///
/// When `country_overrides` is present it REPLACES the stored map wholesale;
/// it is never merged, so a client must send the complete intended map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEntryRequest {
    pub value: Option<String>,
    pub description: Option<String>,
    pub version: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_overrides: Option<CountryOverrides>,
}

impl UpdateEntryRequest {
    pub fn new(value: impl Into<String>, description: impl Into<String>, version: i64) -> Self {
        Self {
            value: Some(value.into()),
            description: Some(description.into()),
            version: Some(version),
            country_overrides: None,
        }
    }

    /// Replace the stored override map along with the value/description.
    pub fn with_country_overrides(mut self, overrides: CountryOverrides) -> Self {
        self.country_overrides = Some(overrides);
        self
    }
}

/// Body of `PUT /config/update/{key}/country/{country}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetOverrideRequest {
    pub value: Option<String>,
    pub version: Option<i64>,
}

impl SetOverrideRequest {
    pub fn new(value: impl Into<String>, version: i64) -> Self {
        Self {
            value: Some(value.into()),
            version: Some(version),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_response_wire_format() {
        let entry = ConfigEntryResponse {
            key: "timeout_ms".to_string(),
            value: "3000".to_string(),
            description: "network timeout".to_string(),
            country_overrides: CountryOverrides::from([("FR".into(), "4000".to_string())]),
            version: 2,
            created_at: time::OffsetDateTime::UNIX_EPOCH,
            updated_at: time::OffsetDateTime::UNIX_EPOCH,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["countryOverrides"]["FR"], "4000");
        assert_eq!(json["createdAt"], "1970-01-01T00:00:00Z");
        assert_eq!(json["version"], 2);

        let back: ConfigEntryResponse = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_update_request_omits_absent_overrides() {
        let req = UpdateEntryRequest::new("5000", "network timeout", 1);
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("countryOverrides").is_none());
    }

    #[test]
    fn test_missing_body_fields_deserialize_as_none() {
        let req: UpdateEntryRequest = serde_json::from_str(r#"{"value":"5000"}"#).unwrap();
        assert_eq!(req.value.as_deref(), Some("5000"));
        assert!(req.description.is_none());
        assert!(req.version.is_none());
    }
}
