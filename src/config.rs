//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server
//! starts. The `ATTRIBUTION_*` variables are applied over the built-in
//! resolution defaults to form the service-wide [`ResolutionOptions`]; request
//! payloads may override them further on a per-call basis.
//!
//! ## Example
//!
//! ```bash
//! export LISTEN="0.0.0.0:3000"
//! export ATTRIBUTION_SELF_REFERRAL_HOSTS="example.com,shop.example.com"
//! export ATTRIBUTION_PRECEDENCE="gclid,gbraid_wbraid,utm,referrer"
//! export ATTRIBUTION_AD_STORAGE_GRANTED="false"
//! ```
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `MAX_BATCH_SIZE` - Maximum items per batch request (default: 100)
//! - `ATTRIBUTION_REMOVE_PARAMS` - Comma list of query keys stripped from cleaned URLs
//! - `ATTRIBUTION_KEEP_CLICK_IDS` - Keep click identifiers in cleaned URLs
//! - `ATTRIBUTION_AD_STORAGE_GRANTED` - Default ad-storage consent
//! - `ATTRIBUTION_ANALYTICS_STORAGE_GRANTED` - Default analytics-storage consent
//! - `ATTRIBUTION_PRECEDENCE` - Comma list of enabled rules
//! - `ATTRIBUTION_SELF_REFERRAL_HOSTS` - Comma list of hosts never credited as referrers

use anyhow::Result;
use std::env;

use crate::domain::entities::{
    ConsentOverride, OptionsOverride, PrecedenceRule, ResolutionOptions,
};

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// Upper bound on `items` in `POST /api/resolve/batch`.
    pub max_batch_size: usize,
    /// Overrides applied over [`ResolutionOptions::default`] at startup.
    pub attribution: OptionsOverride,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Every variable is optional; missing ones fall back to defaults.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let max_batch_size = env::var("MAX_BATCH_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(100);

        let attribution = Self::load_attribution_overrides();

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            max_batch_size,
            attribution,
        })
    }

    /// Collects `ATTRIBUTION_*` variables into an override set.
    ///
    /// Unset variables leave the corresponding default untouched.
    fn load_attribution_overrides() -> OptionsOverride {
        let ad_storage_granted = env_bool("ATTRIBUTION_AD_STORAGE_GRANTED");
        let analytics_storage_granted = env_bool("ATTRIBUTION_ANALYTICS_STORAGE_GRANTED");

        let consent = if ad_storage_granted.is_some() || analytics_storage_granted.is_some() {
            Some(ConsentOverride {
                ad_storage_granted,
                analytics_storage_granted,
            })
        } else {
            None
        };

        OptionsOverride {
            remove_params: env_list("ATTRIBUTION_REMOVE_PARAMS"),
            keep_click_ids_in_clean_url: env_bool("ATTRIBUTION_KEEP_CLICK_IDS"),
            consent,
            precedence: env_list("ATTRIBUTION_PRECEDENCE"),
            self_referral_hosts: env_list("ATTRIBUTION_SELF_REFERRAL_HOSTS"),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - `max_batch_size` is outside `1..=10000`
    /// - `ATTRIBUTION_PRECEDENCE` names an unknown rule
    pub fn validate(&self) -> Result<()> {
        // Validate log format
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        // Validate listen address format
        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.max_batch_size == 0 || self.max_batch_size > 10_000 {
            anyhow::bail!(
                "MAX_BATCH_SIZE must be between 1 and 10000, got {}",
                self.max_batch_size
            );
        }

        // Operator-supplied rule names are strict, unlike request overrides
        if let Some(ref names) = self.attribution.precedence {
            for name in names {
                if let Err(e) = name.parse::<PrecedenceRule>() {
                    anyhow::bail!("ATTRIBUTION_PRECEDENCE: {}", e);
                }
            }
        }

        Ok(())
    }

    /// Builds the service-wide default resolution options.
    pub fn resolution_options(&self) -> ResolutionOptions {
        ResolutionOptions::default().with_overrides(&self.attribution)
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        let options = self.resolution_options();
        let precedence: Vec<&str> = options.precedence.iter().map(|r| r.as_str()).collect();

        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Max batch size: {}", self.max_batch_size);
        tracing::info!("  Precedence: {}", precedence.join(","));
        tracing::info!(
            "  Consent: ad_storage={}, analytics_storage={}",
            options.consent.ad_storage_granted,
            options.consent.analytics_storage_granted
        );
        tracing::info!(
            "  Self-referral hosts: {}",
            options.self_referral_hosts.len()
        );
        tracing::info!("  Removed params: {}", options.remove_params.len());
        tracing::info!(
            "  Keep click IDs in clean URL: {}",
            options.keep_click_ids_in_clean_url
        );
    }
}

/// Reads a boolean flag; `true`/`1` are true, any other set value is false.
fn env_bool(name: &str) -> Option<bool> {
    env::var(name)
        .ok()
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
}

/// Reads a comma-separated list, trimming entries and dropping empty ones.
fn env_list(name: &str) -> Option<Vec<String>> {
    env::var(name).ok().map(|v| {
        v.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    })
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
