//! URL plumbing shared by the resolver and the clean-URL builder.
//!
//! - [`url_provider`] - URL decomposition with ordered, decoded query pairs
//! - [`clean_url`] - Tracking-parameter removal

pub mod clean_url;
pub mod url_provider;
