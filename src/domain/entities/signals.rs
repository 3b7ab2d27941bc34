//! Attribution signals extracted from a page URL's query string.
//!
//! Two closed groups are recognised: click identifiers issued by ad platforms
//! and UTM campaign-tagging parameters. Both are projected from the raw query
//! pairs with first-occurrence-wins semantics, then normalized so that only
//! meaningful values survive.

use serde::Serialize;
use std::fmt;

/// Lowercased placeholder values that analytics tooling emits for "no value".
const SENTINEL_VALUES: [&str; 3] = ["null", "undefined", "(not set)"];

/// Normalizes a single extracted value.
///
/// Trims surrounding whitespace and discards empty values and the
/// case-insensitive sentinels `null`, `undefined` and `(not set)`.
///
/// # Examples
///
/// ```
/// use attribution_resolver::domain::entities::signals::normalize_value;
///
/// assert_eq!(normalize_value("  abc  "), Some("abc".to_string()));
/// assert_eq!(normalize_value("   "), None);
/// assert_eq!(normalize_value("(Not Set)"), None);
/// ```
pub fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    let lowered = trimmed.to_lowercase();
    if SENTINEL_VALUES.contains(&lowered.as_str()) {
        return None;
    }

    Some(trimmed.to_string())
}

fn normalize_slot(slot: &mut Option<String>) {
    *slot = slot.as_deref().and_then(normalize_value);
}

/// Platform click identifier parameter names.
///
/// Declaration order is the opportunistic lookup priority used when a
/// UTM-attributed visit also carries a click identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickIdKind {
    Gclid,
    Gbraid,
    Wbraid,
    Fbclid,
    Msclkid,
    Ttclid,
    LiFatId,
}

impl ClickIdKind {
    /// All click identifier kinds in lookup priority order.
    pub const ALL: [ClickIdKind; 7] = [
        ClickIdKind::Gclid,
        ClickIdKind::Gbraid,
        ClickIdKind::Wbraid,
        ClickIdKind::Fbclid,
        ClickIdKind::Msclkid,
        ClickIdKind::Ttclid,
        ClickIdKind::LiFatId,
    ];

    /// Query parameter name for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ClickIdKind::Gclid => "gclid",
            ClickIdKind::Gbraid => "gbraid",
            ClickIdKind::Wbraid => "wbraid",
            ClickIdKind::Fbclid => "fbclid",
            ClickIdKind::Msclkid => "msclkid",
            ClickIdKind::Ttclid => "ttclid",
            ClickIdKind::LiFatId => "li_fat_id",
        }
    }

    /// Maps a query parameter name to its kind. Matching is case-sensitive.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == key)
    }
}

impl fmt::Display for ClickIdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved click identifier: which parameter carried it and its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClickIdRef {
    #[serde(rename = "type")]
    pub kind: ClickIdKind,
    pub value: String,
}

/// Click identifiers found on the page URL.
///
/// Keys absent from the query string are `None` and are omitted when
/// serialized, so an empty set renders as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClickIds {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gclid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gbraid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wbraid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fbclid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msclkid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttclid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub li_fat_id: Option<String>,
}

impl ClickIds {
    /// Projects click identifiers out of decoded query pairs.
    ///
    /// When a key repeats, the first occurrence wins even if its value is
    /// blank; later normalization then drops it.
    pub fn from_query(query: &[(String, String)]) -> Self {
        let mut ids = Self::default();
        for (key, value) in query {
            if let Some(kind) = ClickIdKind::from_key(key) {
                let slot = ids.slot_mut(kind);
                if slot.is_none() {
                    *slot = Some(value.clone());
                }
            }
        }
        ids
    }

    /// Returns the value for `kind`, if present.
    pub fn get(&self, kind: ClickIdKind) -> Option<&str> {
        match kind {
            ClickIdKind::Gclid => self.gclid.as_deref(),
            ClickIdKind::Gbraid => self.gbraid.as_deref(),
            ClickIdKind::Wbraid => self.wbraid.as_deref(),
            ClickIdKind::Fbclid => self.fbclid.as_deref(),
            ClickIdKind::Msclkid => self.msclkid.as_deref(),
            ClickIdKind::Ttclid => self.ttclid.as_deref(),
            ClickIdKind::LiFatId => self.li_fat_id.as_deref(),
        }
    }

    fn slot_mut(&mut self, kind: ClickIdKind) -> &mut Option<String> {
        match kind {
            ClickIdKind::Gclid => &mut self.gclid,
            ClickIdKind::Gbraid => &mut self.gbraid,
            ClickIdKind::Wbraid => &mut self.wbraid,
            ClickIdKind::Fbclid => &mut self.fbclid,
            ClickIdKind::Msclkid => &mut self.msclkid,
            ClickIdKind::Ttclid => &mut self.ttclid,
            ClickIdKind::LiFatId => &mut self.li_fat_id,
        }
    }

    /// Applies [`normalize_value`] to every present identifier.
    pub fn normalized(mut self) -> Self {
        for kind in ClickIdKind::ALL {
            normalize_slot(self.slot_mut(kind));
        }
        self
    }

    /// Returns the first present identifier in [`ClickIdKind::ALL`] order.
    pub fn first_present(&self) -> Option<ClickIdRef> {
        ClickIdKind::ALL.into_iter().find_map(|kind| {
            self.get(kind).map(|value| ClickIdRef {
                kind,
                value: value.to_string(),
            })
        })
    }

    /// Returns `true` when no identifier is present.
    pub fn is_empty(&self) -> bool {
        ClickIdKind::ALL.into_iter().all(|kind| self.get(kind).is_none())
    }
}

/// UTM parameter names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UtmKey {
    Source,
    Medium,
    Campaign,
    Content,
    Term,
    Id,
}

impl UtmKey {
    pub const ALL: [UtmKey; 6] = [
        UtmKey::Source,
        UtmKey::Medium,
        UtmKey::Campaign,
        UtmKey::Content,
        UtmKey::Term,
        UtmKey::Id,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            UtmKey::Source => "utm_source",
            UtmKey::Medium => "utm_medium",
            UtmKey::Campaign => "utm_campaign",
            UtmKey::Content => "utm_content",
            UtmKey::Term => "utm_term",
            UtmKey::Id => "utm_id",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|utm| utm.as_str() == key)
    }
}

/// UTM campaign parameters found on the page URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UtmParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm_medium: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm_campaign: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm_term: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm_id: Option<String>,
}

impl UtmParams {
    /// Projects UTM parameters out of decoded query pairs, first occurrence wins.
    pub fn from_query(query: &[(String, String)]) -> Self {
        let mut utm = Self::default();
        for (key, value) in query {
            if let Some(utm_key) = UtmKey::from_key(key) {
                let slot = utm.slot_mut(utm_key);
                if slot.is_none() {
                    *slot = Some(value.clone());
                }
            }
        }
        utm
    }

    pub fn get(&self, key: UtmKey) -> Option<&str> {
        match key {
            UtmKey::Source => self.utm_source.as_deref(),
            UtmKey::Medium => self.utm_medium.as_deref(),
            UtmKey::Campaign => self.utm_campaign.as_deref(),
            UtmKey::Content => self.utm_content.as_deref(),
            UtmKey::Term => self.utm_term.as_deref(),
            UtmKey::Id => self.utm_id.as_deref(),
        }
    }

    fn slot_mut(&mut self, key: UtmKey) -> &mut Option<String> {
        match key {
            UtmKey::Source => &mut self.utm_source,
            UtmKey::Medium => &mut self.utm_medium,
            UtmKey::Campaign => &mut self.utm_campaign,
            UtmKey::Content => &mut self.utm_content,
            UtmKey::Term => &mut self.utm_term,
            UtmKey::Id => &mut self.utm_id,
        }
    }

    /// Applies [`normalize_value`] to every present parameter.
    pub fn normalized(mut self) -> Self {
        for key in UtmKey::ALL {
            normalize_slot(self.slot_mut(key));
        }
        self
    }

    /// Returns `true` when any UTM parameter is present.
    pub fn any_present(&self) -> bool {
        UtmKey::ALL.into_iter().any(|key| self.get(key).is_some())
    }
}

/// Extracted and normalized signal groups, as reported in the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Signals {
    pub click_ids: ClickIds,
    pub utm: UtmParams,
}
