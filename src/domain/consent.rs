//! Advertising-consent gate for click identifiers.

use tracing::debug;

use crate::domain::entities::{ClickIds, ConsentPolicy};

/// Drops every click identifier unless advertising storage is granted.
///
/// The gate is all-or-nothing: without ad-storage consent no identifier
/// survives, whichever platform issued it.
pub fn apply_consent(click_ids: ClickIds, consent: &ConsentPolicy) -> ClickIds {
    if consent.ad_storage_granted || click_ids.is_empty() {
        return click_ids;
    }

    debug!("Ad storage not granted, discarding click identifiers");
    ClickIds::default()
}
