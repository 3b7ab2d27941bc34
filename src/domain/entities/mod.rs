//! Value types flowing through an attribution call.
//!
//! Every entity is created fresh per call and discarded once the caller has
//! consumed the result. Nothing here is shared or mutated across calls.
//!
//! # Entity Types
//!
//! - [`RawInput`] - Normalized page location and referrer
//! - [`ClickIds`] / [`UtmParams`] - Extracted signal groups
//! - [`ResolutionOptions`] / [`OptionsOverride`] - Defaults and per-call overrides
//! - [`AttributionRecord`] / [`ResolverResult`] - Resolution output

pub mod attribution;
pub mod options;
pub mod raw_input;
pub mod signals;

pub use attribution::{
    AttributionRecord, CONTRACT_VERSION, Channel, Reason, ResolverResult, TouchType,
};
pub use options::{
    ConsentOverride, ConsentPolicy, OptionsOverride, PrecedenceRule, ResolutionOptions,
    UnknownRuleError,
};
pub use raw_input::RawInput;
pub use signals::{ClickIdKind, ClickIdRef, ClickIds, Signals, UtmKey, UtmParams};
