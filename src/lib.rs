//! # Attribution Resolver
//!
//! Deterministic last-touch marketing attribution for page visits.
//!
//! Given a page URL and its referrer, the resolver extracts click identifiers
//! (`gclid`, `gbraid`, `wbraid`, `fbclid`, `msclkid`, `ttclid`, `li_fat_id`)
//! and UTM parameters, applies consent gating and self-referral suppression,
//! and runs a fixed precedence chain to produce exactly one attribution
//! record. The same call also returns the page URL with tracking parameters
//! stripped.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Signal types, consent gate, precedence chain
//! - **Application Layer** ([`application`]) - Orchestration and shared defaults
//! - **Utilities** ([`utils`]) - URL decomposition and clean-URL construction
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Library Usage
//!
//! ```
//! use attribution_resolver::prelude::*;
//!
//! let input = RawInput::new(
//!     Some("https://example.com/?utm_source=newsletter&utm_medium=email&utm_campaign=jan"),
//!     None,
//! );
//! let result = resolve_attribution(&input, &ResolutionOptions::default());
//!
//! assert_eq!(result.attribution.channel, Channel::Email);
//! assert_eq!(result.attribution.reason, Reason::UtmPresent);
//! assert_eq!(result.cleaned_url.as_deref(), Some("https://example.com/"));
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use application::services::resolve_attribution;
pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AttributionService, resolve_attribution};
    pub use crate::domain::entities::{
        AttributionRecord, CONTRACT_VERSION, Channel, ClickIdKind, ClickIdRef, ClickIds,
        ConsentOverride, ConsentPolicy, OptionsOverride, PrecedenceRule, RawInput, Reason,
        ResolutionOptions, ResolverResult, UtmParams,
    };
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
