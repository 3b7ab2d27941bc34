//! Command-line attribution resolver.
//!
//! Resolves a single page visit locally, without the HTTP service, and prints
//! the result JSON to stdout. A coloured one-line summary goes to stderr so
//! stdout stays machine-readable.
//!
//! # Usage
//!
//! ```bash
//! # Resolve a tagged landing page
//! cargo run --bin resolve -- "https://example.com/?utm_source=newsletter&utm_medium=email"
//!
//! # With a referrer treated as the site itself
//! cargo run --bin resolve -- "https://example.com/" \
//!     --referrer "https://example.com/cart" --self-referral-host example.com
//!
//! # Without ad-storage consent, only the UTM and referrer rules enabled
//! cargo run --bin resolve -- "https://example.com/?gclid=abc" \
//!     --deny-ad-storage --precedence utm,referrer --compact
//! ```
//!
//! # Environment Variables
//!
//! The `ATTRIBUTION_*` variables documented in
//! [`attribution_resolver::config`] provide defaults; flags override them.

use attribution_resolver::config;
use attribution_resolver::prelude::*;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use tracing_subscriber::EnvFilter;

/// Resolve marketing attribution for a page visit.
#[derive(Parser)]
#[command(name = "resolve")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Page URL including its query string
    page_location: String,

    /// Referrer URL of the visit
    #[arg(short, long)]
    referrer: Option<String>,

    /// Host treated as the site itself (repeatable)
    #[arg(long = "self-referral-host")]
    self_referral_hosts: Vec<String>,

    /// Resolve as if advertising storage consent was denied
    #[arg(long)]
    deny_ad_storage: bool,

    /// Keep click identifiers in the cleaned URL
    #[arg(long)]
    keep_click_ids: bool,

    /// Comma-separated list of enabled rules (gclid,gbraid_wbraid,utm,referrer)
    #[arg(long, value_delimiter = ',')]
    precedence: Option<Vec<String>>,

    /// Print compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

impl Cli {
    /// Translates flags into overrides; unset flags leave defaults alone.
    fn overrides(&self) -> OptionsOverride {
        OptionsOverride {
            keep_click_ids_in_clean_url: self.keep_click_ids.then_some(true),
            consent: self.deny_ad_storage.then(|| ConsentOverride {
                ad_storage_granted: Some(false),
                analytics_storage_granted: None,
            }),
            precedence: self.precedence.clone(),
            self_referral_hosts: (!self.self_referral_hosts.is_empty())
                .then(|| self.self_referral_hosts.clone()),
            ..Default::default()
        }
    }
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = config::load_from_env().context("Invalid ATTRIBUTION_* configuration")?;
    let service = AttributionService::new(config.resolution_options());

    let input = RawInput::new(Some(cli.page_location.as_str()), cli.referrer.as_deref());
    let result = service.resolve(&input, Some(&cli.overrides()));

    print_summary(&result);

    let json = if cli.compact {
        serde_json::to_string(&result)?
    } else {
        serde_json::to_string_pretty(&result)?
    };
    println!("{}", json);

    Ok(())
}

/// Prints a one-line human summary to stderr.
fn print_summary(result: &ResolverResult) {
    let attribution = &result.attribution;

    let channel = match attribution.channel {
        Channel::Paid => attribution.channel.as_str().yellow().bold(),
        Channel::Direct => attribution.channel.as_str().dimmed(),
        _ => attribution.channel.as_str().green().bold(),
    };

    let click_id = attribution
        .click_id
        .as_ref()
        .map(|id| format!(" [{}]", id.kind))
        .unwrap_or_default();

    eprintln!(
        "{} {} / {}{}  {}",
        channel,
        attribution.source.cyan(),
        attribution.medium,
        click_id,
        format!("({})", attribution.reason).dimmed()
    );

    if result.input.page_location.is_some() && result.cleaned_url.is_none() {
        eprintln!("{}", "Page URL could not be parsed".red());
    }
}
