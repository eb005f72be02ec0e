//! HTTP API surfaces: panel (identity tier) and reader (shared-secret tier).

pub mod extractors;
pub mod panel;
pub mod reader;
