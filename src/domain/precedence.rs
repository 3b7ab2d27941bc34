//! Last-touch precedence resolution.
//!
//! Turns normalized, consent-gated signals into exactly one
//! [`AttributionRecord`]. Rules are evaluated in a fixed order and the first
//! match wins:
//!
//! 1. **gclid** - Google Ads click, reported as `paid / google / cpc`
//! 2. **gbraid_wbraid** - Google app/web-to-app click (`gbraid` before `wbraid`)
//! 3. **utm** - manual campaign tags; channel derived from the medium
//! 4. **referrer** - external referring host
//! 5. **direct** - fallback, always matches
//!
//! Rules 1-4 fire only when their name is present in the caller's precedence
//! allow-list. The position of a name in that list has no effect.

use tracing::debug;

use crate::domain::channel::classify_medium;
use crate::domain::entities::{
    AttributionRecord, Channel, ClickIdKind, ClickIdRef, ClickIds, PrecedenceRule, Reason,
    TouchType, UtmKey, UtmParams,
};

/// Signals the resolver decides from.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionSignals<'a> {
    pub click_ids: &'a ClickIds,
    pub utm: &'a UtmParams,
    pub referrer_host: Option<&'a str>,
}

type Rule = fn(&ResolutionSignals<'_>) -> Option<AttributionRecord>;

/// Evaluation order of the configurable rules.
const CHAIN: [(PrecedenceRule, Rule); 4] = [
    (PrecedenceRule::Gclid, gclid_rule),
    (PrecedenceRule::GbraidWbraid, gbraid_wbraid_rule),
    (PrecedenceRule::Utm, utm_rule),
    (PrecedenceRule::Referrer, referrer_rule),
];

/// Resolves signals to a single last-touch attribution record.
///
/// Total: when no enabled rule matches, the direct record is returned.
pub fn resolve_by_precedence(
    signals: &ResolutionSignals<'_>,
    precedence: &[PrecedenceRule],
) -> AttributionRecord {
    let record = CHAIN
        .iter()
        .filter(|(rule, _)| precedence.contains(rule))
        .find_map(|(_, evaluate)| evaluate(signals))
        .unwrap_or_else(AttributionRecord::direct);

    debug!(
        reason = record.reason.as_str(),
        channel = record.channel.as_str(),
        "Attribution resolved"
    );

    record
}

fn gclid_rule(signals: &ResolutionSignals<'_>) -> Option<AttributionRecord> {
    let value = signals.click_ids.get(ClickIdKind::Gclid)?;
    Some(google_ads_record(
        signals.utm,
        ClickIdKind::Gclid,
        value,
        Reason::GclidPresent,
    ))
}

fn gbraid_wbraid_rule(signals: &ResolutionSignals<'_>) -> Option<AttributionRecord> {
    let (kind, value) = [ClickIdKind::Gbraid, ClickIdKind::Wbraid]
        .into_iter()
        .find_map(|kind| signals.click_ids.get(kind).map(|value| (kind, value)))?;

    Some(google_ads_record(
        signals.utm,
        kind,
        value,
        Reason::GbraidOrWbraidPresent,
    ))
}

fn utm_rule(signals: &ResolutionSignals<'_>) -> Option<AttributionRecord> {
    let utm = signals.utm;
    if !utm.any_present() {
        return None;
    }

    let medium = utm.get(UtmKey::Medium).unwrap_or("unknown");

    Some(AttributionRecord {
        channel: classify_medium(medium),
        source: utm.get(UtmKey::Source).unwrap_or("unknown").to_string(),
        medium: medium.to_string(),
        campaign: owned(utm.get(UtmKey::Campaign)),
        content: owned(utm.get(UtmKey::Content)),
        term: owned(utm.get(UtmKey::Term)),
        click_id: signals.click_ids.first_present(),
        touch_type: TouchType::LastTouch,
        reason: Reason::UtmPresent,
    })
}

fn referrer_rule(signals: &ResolutionSignals<'_>) -> Option<AttributionRecord> {
    let host = signals.referrer_host?;

    Some(AttributionRecord {
        channel: Channel::Referral,
        source: host.to_string(),
        medium: "referral".to_string(),
        campaign: None,
        content: None,
        term: None,
        click_id: None,
        touch_type: TouchType::LastTouch,
        reason: Reason::ReferrerPresent,
    })
}

fn google_ads_record(
    utm: &UtmParams,
    kind: ClickIdKind,
    value: &str,
    reason: Reason,
) -> AttributionRecord {
    AttributionRecord {
        channel: Channel::Paid,
        source: "google".to_string(),
        medium: "cpc".to_string(),
        campaign: owned(utm.get(UtmKey::Campaign)),
        content: owned(utm.get(UtmKey::Content)),
        term: owned(utm.get(UtmKey::Term)),
        click_id: Some(ClickIdRef {
            kind,
            value: value.to_string(),
        }),
        touch_type: TouchType::LastTouch,
        reason,
    }
}

fn owned(value: Option<&str>) -> Option<String> {
    value.map(str::to_string)
}
