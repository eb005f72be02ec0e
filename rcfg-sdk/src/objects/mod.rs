pub mod entry;
pub mod error;
pub mod resolve;

pub use entry::{
    ConfigEntryResponse, CountryOverrides, CreateEntryRequest, SetOverrideRequest,
    UpdateEntryRequest,
};
pub use error::{ApiErrorBody, MessageResponse};
pub use resolve::{ResolveQuery, ResolvedConfig};
