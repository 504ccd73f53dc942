#[cfg(feature = "api")]
pub mod api_service;

#[cfg(feature = "api")]
pub use api_service::{ApiService, ApiServiceState};
