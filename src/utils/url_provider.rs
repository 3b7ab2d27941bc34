//! URL decomposition for attribution.
//!
//! Wraps [`url::Url`] and exposes the parts attribution needs: host, origin,
//! path, fragment and the percent-decoded query pairs in their original order,
//! duplicates included.

use url::Url;

/// Errors that can occur while parsing a URL.
#[derive(Debug, thiserror::Error)]
pub enum UrlParseError {
    #[error("URL is empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),
}

/// A parsed URL with its decoded query string.
#[derive(Debug, Clone)]
pub struct ParsedUrl {
    url: Url,
    query: Vec<(String, String)>,
}

impl ParsedUrl {
    /// Parses an absolute URL.
    ///
    /// # Errors
    ///
    /// Returns [`UrlParseError::Empty`] for blank input and
    /// [`UrlParseError::InvalidFormat`] when the string is not an absolute URL.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let parsed = ParsedUrl::parse("https://Example.com/p?a=1&a=2#top").unwrap();
    /// assert_eq!(parsed.hostname(), "example.com");
    /// assert_eq!(parsed.query().len(), 2);
    /// assert_eq!(parsed.hash(), "#top");
    /// ```
    pub fn parse(input: &str) -> Result<Self, UrlParseError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(UrlParseError::Empty);
        }

        let url = Url::parse(input).map_err(|e| UrlParseError::InvalidFormat(e.to_string()))?;
        let query = url
            .query_pairs()
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        Ok(Self { url, query })
    }

    /// Host name, empty when the URL has no host.
    pub fn hostname(&self) -> &str {
        self.url.host_str().unwrap_or("")
    }

    /// Serialized origin, e.g. `https://example.com:8443`.
    pub fn origin(&self) -> String {
        self.url.origin().ascii_serialization()
    }

    pub fn pathname(&self) -> &str {
        self.url.path()
    }

    /// Fragment including the leading `#`, or an empty string.
    pub fn hash(&self) -> String {
        match self.url.fragment() {
            Some(fragment) if !fragment.is_empty() => format!("#{}", fragment),
            _ => String::new(),
        }
    }

    /// Decoded query pairs in source order.
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_components() {
        let parsed = ParsedUrl::parse("https://Example.com:8443/shop/item?id=7#reviews").unwrap();
        assert_eq!(parsed.hostname(), "example.com");
        assert_eq!(parsed.origin(), "https://example.com:8443");
        assert_eq!(parsed.pathname(), "/shop/item");
        assert_eq!(parsed.hash(), "#reviews");
        assert_eq!(parsed.query(), &[("id".to_string(), "7".to_string())]);
    }

    #[test]
    fn test_parse_default_port_and_root_path() {
        let parsed = ParsedUrl::parse("https://example.com:443").unwrap();
        assert_eq!(parsed.origin(), "https://example.com");
        assert_eq!(parsed.pathname(), "/");
        assert_eq!(parsed.hash(), "");
    }

    #[test]
    fn test_query_preserves_duplicates_in_order() {
        let parsed = ParsedUrl::parse("https://example.com/?a=1&b=2&a=3").unwrap();
        let keys: Vec<&str> = parsed.query().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["a", "b", "a"]);
        assert_eq!(parsed.query()[2].1, "3");
    }

    #[test]
    fn test_query_percent_decoding() {
        let parsed =
            ParsedUrl::parse("https://example.com/?utm_campaign=summer%20sale&q=a+b").unwrap();
        assert_eq!(parsed.query()[0].1, "summer sale");
        assert_eq!(parsed.query()[1].1, "a b");
    }

    #[test]
    fn test_empty_fragment() {
        let parsed = ParsedUrl::parse("https://example.com/#").unwrap();
        assert_eq!(parsed.hash(), "");
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(ParsedUrl::parse("  "), Err(UrlParseError::Empty)));
    }

    #[test]
    fn test_parse_relative_url() {
        assert!(matches!(
            ParsedUrl::parse("/just/a/path?gclid=1"),
            Err(UrlParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(
            ParsedUrl::parse("not a valid url"),
            Err(UrlParseError::InvalidFormat(_))
        ));
    }
}
