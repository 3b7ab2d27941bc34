//! Application layer orchestrating the domain rules.
//!
//! This layer wires URL parsing, signal extraction, consent gating and the
//! precedence chain into one call. HTTP handlers and the CLI consume it
//! through [`services::AttributionService`].
//!
//! # Available Services
//!
//! - [`services::attribution_service::AttributionService`] - Attribution with shared defaults

pub mod services;
