//! Referrer host classification.

use std::collections::BTreeSet;

/// Host that is never credited as a referrer.
const LOCALHOST: &str = "localhost";

/// Returns the creditable referrer host, if any.
///
/// `hostname` is the host of the already-parsed referrer URL, `None` when the
/// referrer was absent or unparseable. Empty hosts, `localhost` and members of
/// `self_referral_hosts` (compared ASCII case-insensitively) yield `None`.
pub fn classify_referrer(
    hostname: Option<&str>,
    self_referral_hosts: &BTreeSet<String>,
) -> Option<String> {
    let host = hostname.filter(|h| !h.is_empty())?;

    if host.eq_ignore_ascii_case(LOCALHOST) {
        return None;
    }

    if self_referral_hosts
        .iter()
        .any(|own| own.eq_ignore_ascii_case(host))
    {
        return None;
    }

    Some(host.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hosts(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|h| h.to_string()).collect()
    }

    #[test]
    fn test_external_host() {
        assert_eq!(
            classify_referrer(Some("news.example.org"), &BTreeSet::new()),
            Some("news.example.org".to_string())
        );
    }

    #[test]
    fn test_missing_or_empty_host() {
        assert_eq!(classify_referrer(None, &BTreeSet::new()), None);
        assert_eq!(classify_referrer(Some(""), &BTreeSet::new()), None);
    }

    #[test]
    fn test_localhost_suppressed() {
        assert_eq!(classify_referrer(Some("localhost"), &BTreeSet::new()), None);
    }

    #[test]
    fn test_self_referral_suppressed() {
        let own = hosts(&["shop.example.com", "example.com"]);
        assert_eq!(classify_referrer(Some("example.com"), &own), None);
        assert_eq!(classify_referrer(Some("Shop.Example.com"), &own), None);
    }

    #[test]
    fn test_subdomain_is_not_self_referral() {
        let own = hosts(&["example.com"]);
        assert_eq!(
            classify_referrer(Some("blog.example.com"), &own),
            Some("blog.example.com".to_string())
        );
    }
}
