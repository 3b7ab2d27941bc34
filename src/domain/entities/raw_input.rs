//! Caller-supplied page context.

use serde::Serialize;
use serde_json::Value;

/// The two URLs an attribution decision is made from.
///
/// Both fields are either a non-empty, trimmed string or `None`. Construction
/// never fails: anything that is not a usable string becomes `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawInput {
    pub page_location: Option<String>,
    pub page_referrer: Option<String>,
}

impl RawInput {
    /// Creates an input from optional string slices, trimming both.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let input = RawInput::new(Some("  https://example.com/  "), Some("   "));
    /// assert_eq!(input.page_location.as_deref(), Some("https://example.com/"));
    /// assert!(input.page_referrer.is_none());
    /// ```
    pub fn new(page_location: Option<&str>, page_referrer: Option<&str>) -> Self {
        Self {
            page_location: normalize_field(page_location),
            page_referrer: normalize_field(page_referrer),
        }
    }

    /// Coerces an arbitrary JSON value into an input.
    ///
    /// Non-object values, missing fields and non-string field values all
    /// normalize to `None`.
    pub fn from_value(value: &Value) -> Self {
        Self::new(
            value.get("page_location").and_then(Value::as_str),
            value.get("page_referrer").and_then(Value::as_str),
        )
    }
}

fn normalize_field(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
