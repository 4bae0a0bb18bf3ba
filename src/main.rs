//! Dropship Automation - Entry Point
//!
//! Runs one pass: every enabled supplier's top product is filtered,
//! priced and listed on every enabled storefront.
//!
//! Wiring sequence:
//! 1. Load config (first CLI argument, default `config.toml`) + validate
//! 2. Init tracing (JSON structured logging)
//! 3. Load credentials for enabled components from env vars
//! 4. Create the shared ApiClient (HTTP + retry/backoff)
//! 5. Build supplier gateways, storefront publishers, shipping, notifier
//! 6. Run the pipeline and log the summary
//!
//! Exit code is 0 whenever the pass completes, however many products
//! were listed; configuration errors exit non-zero.

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use dropship_automation::adapters::http::{ApiClient, ApiClientConfig};
use dropship_automation::adapters::{notify, platforms, shipping, suppliers};
use dropship_automation::config::credentials::Credentials;
use dropship_automation::config::loader::load_config;
use dropship_automation::domain::pricing::margin_from_f64;
use dropship_automation::usecases::{Pipeline, PipelineOptions, ProductFilter};

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration ───────────────────────────────
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = load_config(&config_path).context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.run.log_level)),
        )
        .json()
        .init();

    info!(
        name = %config.run.name,
        version = env!("CARGO_PKG_VERSION"),
        config = %config_path,
        dry_run = config.run.dry_run,
        suppliers = config.suppliers.enabled_count(),
        platforms = config.platforms.enabled_count(),
        margin = config.pricing.margin,
        "Configuration loaded, starting dropship automation"
    );

    // ── 3. Credentials, before any network call ─────────────
    let creds = Credentials::from_env(&config).context("Failed to load credentials from env")?;
    info!(credentials = ?creds, "Credentials loaded");

    // ── 4. Shared HTTP client with retry ────────────────────
    let client = Arc::new(
        ApiClient::new(ApiClientConfig {
            timeout: Duration::from_secs(config.http.timeout_seconds),
            retry: config.retry.policy(),
            ..ApiClientConfig::default()
        })
        .context("Failed to create HTTP client")?,
    );

    // ── 5. Adapters ─────────────────────────────────────────
    let gateways = suppliers::build_gateways(&config.suppliers, &creds, &client)?;
    let publishers = platforms::build_publishers(&config.platforms, &creds, &client)?;
    let rates = shipping::build_shipping(&config.shipping, &creds, &client)?;
    let notifier = notify::build_notifier(&config.notifications, &creds, &client)?;

    let margin = margin_from_f64(config.pricing.margin).context("pricing.margin is not a number")?;
    let pipeline = Pipeline::new(
        gateways,
        publishers,
        ProductFilter::new(rates, margin),
        notifier,
        PipelineOptions {
            product_type: config.run.product_type.clone(),
            dry_run: config.run.dry_run,
        },
    );

    // ── 6. Run one pass ─────────────────────────────────────
    let summary = pipeline.run().await;
    info!(
        run_id = %summary.run_id,
        suppliers = summary.suppliers,
        accepted = summary.accepted,
        published = summary.published,
        publish_failures = summary.publish_failures,
        supplier_failures = summary.supplier_failures,
        "Run complete"
    );

    Ok(())
}
