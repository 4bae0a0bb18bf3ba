//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters,
//! and providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};

use super::{AppConfig, NotificationChannel, ShippingProvider};
use crate::domain::pricing::margin_from_f64;

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  parse_config(&content)
}

/// Parse and validate configuration text.
pub fn parse_config(content: &str) -> Result<AppConfig> {
  let config: AppConfig =
    toml::from_str(content).with_context(|| "Failed to parse config.toml")?;
  validate_config(&config)?;
  Ok(config)
}

/// Validate all configuration parameters.
///
/// Checks for:
/// - At least one supplier and one platform enabled
/// - Store identifiers for enabled platforms
/// - Sane retry policy and positive margin
/// - Complete shipping and notification profiles
fn validate_config(config: &AppConfig) -> Result<()> {
  anyhow::ensure!(
    config.suppliers.enabled_count() > 0,
    "At least one supplier must be enabled"
  );
  anyhow::ensure!(
    config.platforms.enabled_count() > 0,
    "At least one platform must be enabled"
  );

  // Platform validation
  let shopify = &config.platforms.shopify;
  if shopify.enabled {
    anyhow::ensure!(
      !shopify.store_name.trim().is_empty() || shopify.base_url.is_some(),
      "Shopify is enabled but platforms.shopify.store_name is empty"
    );
  }
  let woo = &config.platforms.woocommerce;
  if woo.enabled {
    anyhow::ensure!(
      woo.store_url.starts_with("http://") || woo.store_url.starts_with("https://"),
      "WooCommerce store_url must be an http(s) URL, got {:?}",
      woo.store_url
    );
  }

  // Retry validation
  config.retry.policy().validate().context("Invalid [retry] section")?;
  anyhow::ensure!(
    config.http.timeout_seconds > 0,
    "http.timeout_seconds must be positive"
  );

  // Pricing validation
  let margin = margin_from_f64(config.pricing.margin)
    .with_context(|| format!("pricing.margin is not a number: {}", config.pricing.margin))?;
  anyhow::ensure!(
    margin.is_sign_positive() && !margin.is_zero(),
    "pricing.margin must be positive, got {}",
    config.pricing.margin
  );

  // Shipping validation
  let shipping = &config.shipping;
  match shipping.provider {
    ShippingProvider::Flat => {
      anyhow::ensure!(
        shipping.flat_rate.is_finite() && shipping.flat_rate >= 0.0,
        "shipping.flat_rate must be >= 0, got {}",
        shipping.flat_rate
      );
    }
    ShippingProvider::ShipStation => {
      anyhow::ensure!(
        !shipping.from_postal_code.trim().is_empty(),
        "shipping.from_postal_code is required for ShipStation"
      );
      anyhow::ensure!(
        !shipping.default_destination_postal_code.trim().is_empty(),
        "shipping.default_destination_postal_code is required for ShipStation"
      );
      anyhow::ensure!(
        shipping.weight_oz > 0.0,
        "shipping.weight_oz must be positive"
      );
    }
  }

  // Notification validation
  let notify = &config.notifications;
  if notify.channel == NotificationChannel::EmailRelay {
    anyhow::ensure!(
      !notify.relay_url.is_empty(),
      "notifications.relay_url is required for the email_relay channel"
    );
    anyhow::ensure!(
      !notify.to.is_empty(),
      "notifications.to must list at least one recipient"
    );
  }

  Ok(())
}
