//! Tracking-parameter removal for page URLs.

use std::collections::BTreeSet;
use url::form_urlencoded;

use crate::domain::entities::ClickIdKind;
use crate::utils::url_provider::ParsedUrl;

/// Builds the page URL with tracking parameters stripped.
///
/// Every query pair whose key is in `remove_params` is dropped; with
/// `keep_click_ids` set, click identifier keys are kept even when listed.
/// Remaining pairs are re-encoded in their original order. The parsed URL is
/// only read, never modified.
///
/// Returns `None` when the page URL could not be parsed.
///
/// # Examples
///
/// ```ignore
/// let page = ParsedUrl::parse("https://x.com/?utm_source=a&gclid=b&keep=1").ok();
/// let remove = ResolutionOptions::default().remove_params;
/// assert_eq!(
///     build_clean_url(page.as_ref(), &remove, false).as_deref(),
///     Some("https://x.com/?keep=1")
/// );
/// ```
pub fn build_clean_url(
    page: Option<&ParsedUrl>,
    remove_params: &BTreeSet<String>,
    keep_click_ids: bool,
) -> Option<String> {
    let page = page?;

    let retained = page.query().iter().filter(|(key, _)| {
        (keep_click_ids && ClickIdKind::from_key(key).is_some()) || !remove_params.contains(key)
    });

    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(retained)
        .finish();

    let mut cleaned = page.origin();
    cleaned.push_str(page.pathname());
    if !query.is_empty() {
        cleaned.push('?');
        cleaned.push_str(&query);
    }
    cleaned.push_str(&page.hash());

    Some(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ResolutionOptions;

    fn clean(url: &str, remove: &BTreeSet<String>, keep_click_ids: bool) -> Option<String> {
        let page = ParsedUrl::parse(url).ok();
        build_clean_url(page.as_ref(), remove, keep_click_ids)
    }

    fn defaults() -> BTreeSet<String> {
        ResolutionOptions::default().remove_params
    }

    #[test]
    fn test_default_params_removed() {
        assert_eq!(
            clean("https://x.com/?utm_source=a&gclid=b&keep=1", &defaults(), false).as_deref(),
            Some("https://x.com/?keep=1")
        );
    }

    #[test]
    fn test_all_params_removed_drops_question_mark() {
        assert_eq!(
            clean(
                "https://example.com/landing?utm_source=a&utm_medium=b",
                &defaults(),
                false
            )
            .as_deref(),
            Some("https://example.com/landing")
        );
    }

    #[test]
    fn test_keep_click_ids() {
        assert_eq!(
            clean(
                "https://x.com/?utm_source=a&gclid=b&fbclid=c&keep=1",
                &defaults(),
                true
            )
            .as_deref(),
            Some("https://x.com/?gclid=b&fbclid=c&keep=1")
        );
    }

    #[test]
    fn test_fragment_and_path_preserved() {
        assert_eq!(
            clean(
                "https://example.com/a/b?utm_campaign=x&page=2#section",
                &defaults(),
                false
            )
            .as_deref(),
            Some("https://example.com/a/b?page=2#section")
        );
    }

    #[test]
    fn test_duplicate_removed_keys_all_dropped() {
        assert_eq!(
            clean("https://x.com/?gclid=1&a=1&gclid=2", &defaults(), false).as_deref(),
            Some("https://x.com/?a=1")
        );
    }

    #[test]
    fn test_custom_remove_list_only() {
        let remove: BTreeSet<String> = ["ref".to_string()].into_iter().collect();
        assert_eq!(
            clean("https://x.com/?ref=abc&utm_source=a", &remove, false).as_deref(),
            Some("https://x.com/?utm_source=a")
        );
    }

    #[test]
    fn test_retained_values_reencoded() {
        assert_eq!(
            clean("https://x.com/?q=summer%20sale&gclid=1", &defaults(), false).as_deref(),
            Some("https://x.com/?q=summer+sale")
        );
    }

    #[test]
    fn test_unparseable_page_is_none() {
        assert_eq!(clean("not a url", &defaults(), false), None);
        assert_eq!(build_clean_url(None, &defaults(), false), None);
    }
}
