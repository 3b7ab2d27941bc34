//! Attribution orchestration: input in, [`ResolverResult`] out.

use std::sync::Arc;
use tracing::debug;

use crate::domain::consent::apply_consent;
use crate::domain::entities::{
    CONTRACT_VERSION, ClickIds, OptionsOverride, RawInput, ResolutionOptions, ResolverResult,
    Signals, UtmParams,
};
use crate::domain::precedence::{ResolutionSignals, resolve_by_precedence};
use crate::domain::referrer::classify_referrer;
use crate::utils::clean_url::build_clean_url;
use crate::utils::url_provider::ParsedUrl;

/// Resolves a page visit to its attribution record and cleaned URL.
///
/// Infallible: unparseable URLs degrade to absent signals, and the precedence
/// chain always yields a record. The same `(input, options)` pair always
/// produces an identical result.
///
/// # Flow
///
/// 1. Parse page location and referrer
/// 2. Extract and normalize click identifiers and UTM parameters
/// 3. Gate click identifiers on ad-storage consent
/// 4. Classify the referrer host
/// 5. Run the precedence chain
/// 6. Build the cleaned URL from the parsed page location
pub fn resolve_attribution(input: &RawInput, options: &ResolutionOptions) -> ResolverResult {
    let page = input.page_location.as_deref().and_then(parse_or_absent);
    let referrer = input.page_referrer.as_deref().and_then(parse_or_absent);

    let query = page.as_ref().map(ParsedUrl::query).unwrap_or_default();
    let click_ids = apply_consent(
        ClickIds::from_query(query).normalized(),
        &options.consent,
    );
    let utm = UtmParams::from_query(query).normalized();

    let referrer_host = classify_referrer(
        referrer.as_ref().map(ParsedUrl::hostname),
        &options.self_referral_hosts,
    );

    let attribution = resolve_by_precedence(
        &ResolutionSignals {
            click_ids: &click_ids,
            utm: &utm,
            referrer_host: referrer_host.as_deref(),
        },
        &options.precedence,
    );

    let cleaned_url = build_clean_url(
        page.as_ref(),
        &options.remove_params,
        options.keep_click_ids_in_clean_url,
    );

    ResolverResult {
        version: CONTRACT_VERSION,
        input: input.clone(),
        signals: Signals { click_ids, utm },
        attribution,
        cleaned_url,
    }
}

fn parse_or_absent(raw: &str) -> Option<ParsedUrl> {
    match ParsedUrl::parse(raw) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            debug!("Treating URL as absent: {}", e);
            None
        }
    }
}

/// Service wrapper holding the process-wide default options.
///
/// Defaults are built once at startup and never mutated; per-call overrides
/// produce a fresh [`ResolutionOptions`] for that call only.
#[derive(Debug, Clone)]
pub struct AttributionService {
    defaults: Arc<ResolutionOptions>,
}

impl AttributionService {
    pub fn new(defaults: ResolutionOptions) -> Self {
        Self {
            defaults: Arc::new(defaults),
        }
    }

    /// The options used when a call supplies no overrides.
    pub fn defaults(&self) -> &ResolutionOptions {
        &self.defaults
    }

    /// Resolves `input` using the defaults, optionally overridden.
    pub fn resolve(&self, input: &RawInput, overrides: Option<&OptionsOverride>) -> ResolverResult {
        match overrides {
            Some(overrides) => {
                let options = self.defaults.with_overrides(overrides);
                resolve_attribution(input, &options)
            }
            None => resolve_attribution(input, &self.defaults),
        }
    }
}

impl Default for AttributionService {
    fn default() -> Self {
        Self::new(ResolutionOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Channel, ClickIdKind, ConsentOverride, Reason};

    fn input(page: &str, referrer: Option<&str>) -> RawInput {
        RawInput::new(Some(page), referrer)
    }

    #[test]
    fn test_gclid_scenario() {
        let result = resolve_attribution(
            &input(
                "https://example.com/product?gclid=AAA111&utm_source=facebook&utm_medium=paid_social&utm_campaign=summer",
                Some("https://google.com/"),
            ),
            &ResolutionOptions::default(),
        );

        assert_eq!(result.attribution.channel, Channel::Paid);
        assert_eq!(result.attribution.source, "google");
        assert_eq!(result.attribution.reason, Reason::GclidPresent);
        let click_id = result.attribution.click_id.as_ref().unwrap();
        assert_eq!(click_id.kind, ClickIdKind::Gclid);
        assert_eq!(click_id.value, "AAA111");
        assert_eq!(result.cleaned_url.as_deref(), Some("https://example.com/product"));
    }

    #[test]
    fn test_missing_page_location_is_direct() {
        let result = resolve_attribution(&RawInput::default(), &ResolutionOptions::default());

        assert_eq!(result.attribution.reason, Reason::NoSignals);
        assert_eq!(result.signals, Signals::default());
        assert!(result.cleaned_url.is_none());
    }

    #[test]
    fn test_unparseable_page_location_degrades() {
        let result = resolve_attribution(
            &input("::not a url?gclid=abc", Some("https://ref.example.org/")),
            &ResolutionOptions::default(),
        );

        assert!(result.signals.click_ids.is_empty());
        assert!(result.cleaned_url.is_none());
        assert_eq!(result.attribution.reason, Reason::ReferrerPresent);
        assert_eq!(result.input.page_location.as_deref(), Some("::not a url?gclid=abc"));
    }

    #[test]
    fn test_unparseable_referrer_is_ignored() {
        let result = resolve_attribution(
            &input("https://example.com/", Some("garbage")),
            &ResolutionOptions::default(),
        );
        assert_eq!(result.attribution.reason, Reason::NoSignals);
    }

    #[test]
    fn test_service_applies_overrides_per_call() {
        let service = AttributionService::default();
        let page = input("https://example.com/?gclid=g&utm_source=news&utm_medium=email", None);

        let overrides = OptionsOverride {
            consent: Some(ConsentOverride {
                ad_storage_granted: Some(false),
                analytics_storage_granted: None,
            }),
            ..Default::default()
        };

        let gated = service.resolve(&page, Some(&overrides));
        assert_eq!(gated.attribution.reason, Reason::UtmPresent);
        assert!(gated.signals.click_ids.is_empty());

        let ungated = service.resolve(&page, None);
        assert_eq!(ungated.attribution.reason, Reason::GclidPresent);
        assert!(service.defaults().consent.ad_storage_granted);
    }

    #[test]
    fn test_service_uses_configured_defaults() {
        let mut defaults = ResolutionOptions::default();
        defaults.self_referral_hosts.insert("example.com".to_string());
        let service = AttributionService::new(defaults);

        let result = service.resolve(
            &input("https://example.com/", Some("https://example.com/cart")),
            None,
        );
        assert_eq!(result.attribution.reason, Reason::NoSignals);
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let service = AttributionService::default();
        let page = input(
            "https://example.com/?utm_source=a&utm_medium=cpc&fbclid=x&keep=1",
            Some("https://ref.example.org/"),
        );

        let first = serde_json::to_string(&service.resolve(&page, None)).unwrap();
        let second = serde_json::to_string(&service.resolve(&page, None)).unwrap();
        assert_eq!(first, second);
    }
}
