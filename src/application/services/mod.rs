//! Business logic services for the application layer.

pub mod attribution_service;

pub use attribution_service::{AttributionService, resolve_attribution};
