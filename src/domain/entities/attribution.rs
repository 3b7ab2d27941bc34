//! Attribution outcome types.

use serde::Serialize;
use std::fmt;

use crate::domain::entities::raw_input::RawInput;
use crate::domain::entities::signals::{ClickIdRef, Signals};

/// Version of the result JSON contract. Bump on any breaking field change.
pub const CONTRACT_VERSION: &str = "1.0.0";

/// Marketing channel credited for a visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Paid,
    Email,
    Social,
    Affiliate,
    Display,
    Referral,
    Organic,
    Other,
    Direct,
}

impl Channel {
    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Paid => "paid",
            Channel::Email => "email",
            Channel::Social => "social",
            Channel::Affiliate => "affiliate",
            Channel::Display => "display",
            Channel::Referral => "referral",
            Channel::Organic => "organic",
            Channel::Other => "other",
            Channel::Direct => "direct",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attribution model. Only last-touch is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchType {
    LastTouch,
}

/// Machine-readable code naming the rule that produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    GclidPresent,
    GbraidOrWbraidPresent,
    UtmPresent,
    ReferrerPresent,
    NoSignals,
}

impl Reason {
    pub fn as_str(self) -> &'static str {
        match self {
            Reason::GclidPresent => "gclid_present",
            Reason::GbraidOrWbraidPresent => "gbraid_or_wbraid_present",
            Reason::UtmPresent => "utm_present",
            Reason::ReferrerPresent => "referrer_present",
            Reason::NoSignals => "no_signals",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single canonical attribution for a visit.
///
/// Optional detail fields serialize as `null` rather than being omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributionRecord {
    pub channel: Channel,
    pub source: String,
    pub medium: String,
    pub campaign: Option<String>,
    pub content: Option<String>,
    pub term: Option<String>,
    pub click_id: Option<ClickIdRef>,
    pub touch_type: TouchType,
    pub reason: Reason,
}

impl AttributionRecord {
    /// The record produced when no rule matched.
    pub fn direct() -> Self {
        Self {
            channel: Channel::Direct,
            source: "(direct)".to_string(),
            medium: "(none)".to_string(),
            campaign: None,
            content: None,
            term: None,
            click_id: None,
            touch_type: TouchType::LastTouch,
            reason: Reason::NoSignals,
        }
    }
}

/// Complete result of one attribution call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolverResult {
    pub version: &'static str,
    pub input: RawInput,
    pub signals: Signals,
    pub attribution: AttributionRecord,
    pub cleaned_url: Option<String>,
}
