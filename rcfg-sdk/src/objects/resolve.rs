//! Types for the resolved, low-trust read view.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Flat key → resolved-value map returned by `GET /config`.
///
/// Carries no metadata: no versions, no descriptions, no override maps.
pub type ResolvedConfig = BTreeMap<String, String>;

/// Query string of `GET /config`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolveQuery {
    /// Country code used to pick per-country overrides, if any.
    pub country: Option<CompactString>,
}
