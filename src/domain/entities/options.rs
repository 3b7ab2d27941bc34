//! Resolution options and caller overrides.
//!
//! [`ResolutionOptions`] is an immutable value built once (usually at startup
//! from [`crate::config::Config`]) and shared behind an `Arc`. Per-request
//! customisation goes through [`OptionsOverride`], which produces a new value
//! instead of mutating the shared one.

use serde::Deserialize;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use tracing::debug;
use validator::Validate;

use crate::domain::entities::signals::{ClickIdKind, UtmKey};

/// Advertising and analytics storage consent.
///
/// Only `ad_storage_granted` influences resolution: when it is `false` every
/// click identifier is discarded. `analytics_storage_granted` is carried
/// through for callers and is not read by any rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsentPolicy {
    pub ad_storage_granted: bool,
    pub analytics_storage_granted: bool,
}

impl Default for ConsentPolicy {
    fn default() -> Self {
        Self {
            ad_storage_granted: true,
            analytics_storage_granted: true,
        }
    }
}

/// Named rules of the precedence chain that callers may enable or disable.
///
/// The direct fallback is not listed: it always applies last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrecedenceRule {
    Gclid,
    GbraidWbraid,
    Utm,
    Referrer,
}

impl PrecedenceRule {
    pub const DEFAULT_ORDER: [PrecedenceRule; 4] = [
        PrecedenceRule::Gclid,
        PrecedenceRule::GbraidWbraid,
        PrecedenceRule::Utm,
        PrecedenceRule::Referrer,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PrecedenceRule::Gclid => "gclid",
            PrecedenceRule::GbraidWbraid => "gbraid_wbraid",
            PrecedenceRule::Utm => "utm",
            PrecedenceRule::Referrer => "referrer",
        }
    }
}

impl fmt::Display for PrecedenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a precedence rule name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown precedence rule: '{0}'")]
pub struct UnknownRuleError(pub String);

impl FromStr for PrecedenceRule {
    type Err = UnknownRuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::DEFAULT_ORDER
            .into_iter()
            .find(|rule| rule.as_str() == s)
            .ok_or_else(|| UnknownRuleError(s.to_string()))
    }
}

/// Fully-resolved options for one attribution call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionOptions {
    /// Query keys stripped from the cleaned URL.
    pub remove_params: BTreeSet<String>,
    /// When `true`, click identifier keys survive cleaning even if listed in
    /// `remove_params`.
    pub keep_click_ids_in_clean_url: bool,
    pub consent: ConsentPolicy,
    /// Allow-list of enabled rules. Only membership matters; evaluation order
    /// is fixed by the resolver.
    pub precedence: Vec<PrecedenceRule>,
    /// Referrer hosts treated as the site itself and never credited.
    pub self_referral_hosts: BTreeSet<String>,
}

impl Default for ResolutionOptions {
    fn default() -> Self {
        let remove_params = UtmKey::ALL
            .into_iter()
            .map(UtmKey::as_str)
            .chain(ClickIdKind::ALL.into_iter().map(ClickIdKind::as_str))
            .map(str::to_string)
            .collect();

        Self {
            remove_params,
            keep_click_ids_in_clean_url: false,
            consent: ConsentPolicy::default(),
            precedence: PrecedenceRule::DEFAULT_ORDER.to_vec(),
            self_referral_hosts: BTreeSet::new(),
        }
    }
}

impl ResolutionOptions {
    /// Returns `true` if `rule` is enabled.
    pub fn allows(&self, rule: PrecedenceRule) -> bool {
        self.precedence.contains(&rule)
    }

    /// Returns a copy of these options with `overrides` applied.
    ///
    /// Lists replace the current value wholesale, scalars replace when set,
    /// and `consent` is merged field by field. Unknown precedence rule names
    /// are skipped, so they can never enable a rule; only their count is
    /// logged.
    pub fn with_overrides(&self, overrides: &OptionsOverride) -> Self {
        let mut merged = self.clone();

        if let Some(params) = &overrides.remove_params {
            merged.remove_params = params.iter().cloned().collect();
        }

        if let Some(keep) = overrides.keep_click_ids_in_clean_url {
            merged.keep_click_ids_in_clean_url = keep;
        }

        if let Some(consent) = &overrides.consent {
            if let Some(granted) = consent.ad_storage_granted {
                merged.consent.ad_storage_granted = granted;
            }
            if let Some(granted) = consent.analytics_storage_granted {
                merged.consent.analytics_storage_granted = granted;
            }
        }

        if let Some(names) = &overrides.precedence {
            merged.precedence = names
                .iter()
                .filter_map(|name| name.parse::<PrecedenceRule>().ok())
                .collect();

            let ignored = names.len() - merged.precedence.len();
            if ignored > 0 {
                debug!(ignored, "Skipped unknown precedence entries");
            }
        }

        if let Some(hosts) = &overrides.self_referral_hosts {
            merged.self_referral_hosts = hosts.iter().cloned().collect();
        }

        merged
    }
}

/// Partial consent settings supplied by a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentOverride {
    pub ad_storage_granted: Option<bool>,
    pub analytics_storage_granted: Option<bool>,
}

/// Caller-supplied option overrides.
///
/// Every field is optional; unset fields keep the base value. Unknown keys
/// are ignored rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OptionsOverride {
    #[validate(length(max = 256))]
    pub remove_params: Option<Vec<String>>,
    pub keep_click_ids_in_clean_url: Option<bool>,
    pub consent: Option<ConsentOverride>,
    #[validate(length(max = 16))]
    pub precedence: Option<Vec<String>>,
    #[validate(length(max = 256))]
    pub self_referral_hosts: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_options() {
        let options = ResolutionOptions::default();

        assert_eq!(options.remove_params.len(), 13);
        assert!(options.remove_params.contains("utm_source"));
        assert!(options.remove_params.contains("utm_id"));
        assert!(options.remove_params.contains("gclid"));
        assert!(options.remove_params.contains("li_fat_id"));
        assert!(!options.keep_click_ids_in_clean_url);
        assert!(options.consent.ad_storage_granted);
        assert!(options.consent.analytics_storage_granted);
        assert_eq!(options.precedence, PrecedenceRule::DEFAULT_ORDER.to_vec());
        assert!(options.self_referral_hosts.is_empty());
    }

    #[test]
    fn test_precedence_rule_from_str() {
        assert_eq!("gclid".parse::<PrecedenceRule>(), Ok(PrecedenceRule::Gclid));
        assert_eq!(
            "gbraid_wbraid".parse::<PrecedenceRule>(),
            Ok(PrecedenceRule::GbraidWbraid)
        );
        assert_eq!("utm".parse::<PrecedenceRule>(), Ok(PrecedenceRule::Utm));
        assert_eq!(
            "referrer".parse::<PrecedenceRule>(),
            Ok(PrecedenceRule::Referrer)
        );
        assert!("direct".parse::<PrecedenceRule>().is_err());
        assert!("GCLID".parse::<PrecedenceRule>().is_err());
    }

    #[test]
    fn test_empty_override_is_identity() {
        let base = ResolutionOptions::default();
        assert_eq!(base.with_overrides(&OptionsOverride::default()), base);
    }

    #[test]
    fn test_override_replaces_lists_wholesale() {
        let base = ResolutionOptions::default();
        let overrides = OptionsOverride {
            remove_params: Some(vec!["ref".to_string()]),
            self_referral_hosts: Some(vec!["shop.example.com".to_string()]),
            ..Default::default()
        };

        let merged = base.with_overrides(&overrides);
        assert_eq!(merged.remove_params.len(), 1);
        assert!(merged.remove_params.contains("ref"));
        assert!(merged.self_referral_hosts.contains("shop.example.com"));
    }

    #[test]
    fn test_override_merges_consent_field_by_field() {
        let base = ResolutionOptions::default();
        let overrides = OptionsOverride {
            consent: Some(ConsentOverride {
                ad_storage_granted: Some(false),
                analytics_storage_granted: None,
            }),
            ..Default::default()
        };

        let merged = base.with_overrides(&overrides);
        assert!(!merged.consent.ad_storage_granted);
        assert!(merged.consent.analytics_storage_granted);
    }

    #[test]
    fn test_override_precedence_skips_unknown_names() {
        let base = ResolutionOptions::default();
        let overrides = OptionsOverride {
            precedence: Some(vec![
                "utm".to_string(),
                "direct".to_string(),
                "referrer".to_string(),
            ]),
            ..Default::default()
        };

        let merged = base.with_overrides(&overrides);
        assert_eq!(
            merged.precedence,
            vec![PrecedenceRule::Utm, PrecedenceRule::Referrer]
        );
        assert!(!merged.allows(PrecedenceRule::Gclid));
        assert!(merged.allows(PrecedenceRule::Utm));
    }

    #[test]
    fn test_override_precedence_all_unknown_disables_every_rule() {
        let base = ResolutionOptions::default();
        let overrides = OptionsOverride {
            precedence: Some(vec![
                "GCLID".to_string(),
                "utm\nforged log line".to_string(),
                " referrer".to_string(),
            ]),
            ..Default::default()
        };

        let merged = base.with_overrides(&overrides);
        assert!(merged.precedence.is_empty());
        for rule in PrecedenceRule::DEFAULT_ORDER {
            assert!(!merged.allows(rule));
        }
    }

    #[test]
    fn test_override_does_not_mutate_base() {
        let base = ResolutionOptions::default();
        let overrides = OptionsOverride {
            keep_click_ids_in_clean_url: Some(true),
            ..Default::default()
        };

        let merged = base.with_overrides(&overrides);
        assert!(merged.keep_click_ids_in_clean_url);
        assert!(!base.keep_click_ids_in_clean_url);
    }

    #[test]
    fn test_override_deserializes_camel_case_and_ignores_unknown_keys() {
        let overrides: OptionsOverride = serde_json::from_value(json!({
            "removeParams": ["utm_source"],
            "keepClickIdsInCleanUrl": true,
            "consent": { "adStorageGranted": false },
            "precedence": ["gclid"],
            "selfReferralHosts": ["example.com"],
            "somethingElse": { "nested": 1 }
        }))
        .unwrap();

        assert_eq!(overrides.remove_params, Some(vec!["utm_source".to_string()]));
        assert_eq!(overrides.keep_click_ids_in_clean_url, Some(true));
        assert_eq!(
            overrides.consent,
            Some(ConsentOverride {
                ad_storage_granted: Some(false),
                analytics_storage_granted: None,
            })
        );
        assert_eq!(overrides.precedence, Some(vec!["gclid".to_string()]));
        assert_eq!(
            overrides.self_referral_hosts,
            Some(vec!["example.com".to_string()])
        );
    }

    #[test]
    fn test_override_validation_limits() {
        let overrides = OptionsOverride {
            precedence: Some(vec!["utm".to_string(); 17]),
            ..Default::default()
        };
        assert!(overrides.validate().is_err());

        let overrides = OptionsOverride {
            precedence: Some(vec!["utm".to_string(); 4]),
            ..Default::default()
        };
        assert!(overrides.validate().is_ok());
    }
}
