//! Resolution of the flat key → value view served to the read-only tier.

use rcfg_sdk::objects::ResolvedConfig;

use crate::entities::config_entries::ConfigEntryRecord;

/// Resolve each entry to a single value.
///
/// With a country filter, an entry resolves to its override for that
/// country when one exists; in every other case it resolves to its default
/// value. Pure over the fetched records.
pub fn resolve_records(records: &[ConfigEntryRecord], country: Option<&str>) -> ResolvedConfig {
    records
        .iter()
        .map(|record| {
            let resolved = country
                .and_then(|c| record.country_overrides.0.get(c))
                .unwrap_or(&record.value);
            (record.key.clone(), resolved.clone())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rcfg_sdk::objects::CountryOverrides;
    use sqlx::types::Json;

    fn record(key: &str, value: &str, overrides: &[(&str, &str)]) -> ConfigEntryRecord {
        ConfigEntryRecord {
            key: key.to_string(),
            value: value.to_string(),
            description: format!("{key} description"),
            country_overrides: Json(
                overrides
                    .iter()
                    .map(|(country, v)| ((*country).into(), (*v).to_string()))
                    .collect::<CountryOverrides>(),
            ),
            version: 1,
            created_at: time::OffsetDateTime::UNIX_EPOCH,
            updated_at: time::OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_no_filter_returns_default_values() {
        let records = vec![
            record("timeout_ms", "5000", &[("FR", "4000")]),
            record("retries", "3", &[]),
        ];
        let resolved = resolve_records(&records, None);
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved["timeout_ms"], "5000");
        assert_eq!(resolved["retries"], "3");
    }

    #[test]
    fn test_filter_applies_override_when_present() {
        let records = vec![
            record("timeout_ms", "5000", &[("FR", "4000")]),
            record("retries", "3", &[("DE", "5")]),
        ];
        let resolved = resolve_records(&records, Some("FR"));
        assert_eq!(resolved["timeout_ms"], "4000");
        // FR has no override for retries, so the default wins.
        assert_eq!(resolved["retries"], "3");
    }

    #[test]
    fn test_filter_without_matching_override_falls_back() {
        let records = vec![record("timeout_ms", "5000", &[("FR", "4000")])];
        let resolved = resolve_records(&records, Some("DE"));
        assert_eq!(resolved["timeout_ms"], "5000");
    }

    #[test]
    fn test_empty_store_resolves_to_empty_map() {
        assert!(resolve_records(&[], Some("FR")).is_empty());
        assert!(resolve_records(&[], None).is_empty());
    }
}
