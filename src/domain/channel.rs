//! Channel classification from a UTM medium.

use crate::domain::entities::Channel;

/// Keyword table checked top to bottom; the first substring hit wins.
const MEDIUM_KEYWORDS: &[(&[&str], Channel)] = &[
    (&["cpc", "ppc", "paid"], Channel::Paid),
    (&["email"], Channel::Email),
    (&["social"], Channel::Social),
    (&["affiliate"], Channel::Affiliate),
    (&["display", "banner"], Channel::Display),
    (&["referral"], Channel::Referral),
    (&["organic", "seo"], Channel::Organic),
];

/// Maps a medium to a channel by case-insensitive keyword containment.
///
/// Falls back to [`Channel::Other`] when no keyword matches.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(classify_medium("Paid_Social"), Channel::Paid);
/// assert_eq!(classify_medium("newsletter-email"), Channel::Email);
/// assert_eq!(classify_medium("print"), Channel::Other);
/// ```
pub fn classify_medium(medium: &str) -> Channel {
    let medium = medium.to_lowercase();
    MEDIUM_KEYWORDS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|kw| medium.contains(*kw)))
        .map(|(_, channel)| *channel)
        .unwrap_or(Channel::Other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paid_keywords() {
        assert_eq!(classify_medium("cpc"), Channel::Paid);
        assert_eq!(classify_medium("PPC"), Channel::Paid);
        assert_eq!(classify_medium("paid_search"), Channel::Paid);
    }

    #[test]
    fn test_paid_wins_over_social() {
        assert_eq!(classify_medium("paid_social"), Channel::Paid);
    }

    #[test]
    fn test_single_keyword_channels() {
        assert_eq!(classify_medium("email"), Channel::Email);
        assert_eq!(classify_medium("Social"), Channel::Social);
        assert_eq!(classify_medium("affiliate"), Channel::Affiliate);
        assert_eq!(classify_medium("display"), Channel::Display);
        assert_eq!(classify_medium("top-banner"), Channel::Display);
        assert_eq!(classify_medium("referral"), Channel::Referral);
        assert_eq!(classify_medium("organic"), Channel::Organic);
        assert_eq!(classify_medium("seo"), Channel::Organic);
    }

    #[test]
    fn test_table_order_email_before_social() {
        assert_eq!(classify_medium("social-email"), Channel::Email);
    }

    #[test]
    fn test_unmatched_is_other() {
        assert_eq!(classify_medium("print"), Channel::Other);
        assert_eq!(classify_medium("unknown"), Channel::Other);
        assert_eq!(classify_medium(""), Channel::Other);
    }
}
