//! Domain layer containing attribution entities and decision logic.
//!
//! Everything in this layer is pure: no I/O, no shared state, no URL parsing.
//! Callers hand in already-decomposed values and get fresh values back.
//!
//! # Architecture
//!
//! - [`entities`] - Signal groups, options and result types
//! - [`consent`] - Advertising-consent gate for click identifiers
//! - [`referrer`] - Referrer host classification with self-referral suppression
//! - [`channel`] - Medium to channel keyword classification
//! - [`precedence`] - The last-touch precedence chain
//!
//! # Resolution Flow
//!
//! 1. Query pairs are projected into [`entities::ClickIds`] and [`entities::UtmParams`]
//! 2. Both groups are normalized
//! 3. [`consent::apply_consent`] gates the click identifiers
//! 4. [`referrer::classify_referrer`] derives a creditable referrer host
//! 5. [`precedence::resolve_by_precedence`] picks exactly one record

pub mod channel;
pub mod consent;
pub mod entities;
pub mod precedence;
pub mod referrer;
