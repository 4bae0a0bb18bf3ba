//! Configuration Module - TOML-based Run Configuration
//!
//! Loads and validates non-secret settings from `config.toml`.
//! API keys and secrets never live in the file: they are read from
//! environment variables into [`credentials::Credentials`] once at
//! startup and handed to each adapter constructor.

pub mod credentials;
pub mod loader;

use std::time::Duration;

use serde::Deserialize;

use crate::adapters::http::RetryPolicy;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
  /// Run identity and behaviour.
  #[serde(default)]
  pub run: RunConfig,
  /// Outbound HTTP settings.
  #[serde(default)]
  pub http: HttpConfig,
  /// Retry/backoff applied to every outbound call.
  #[serde(default)]
  pub retry: RetryConfig,
  /// Markup rules.
  #[serde(default)]
  pub pricing: PricingConfig,
  /// Shipping-rate provider.
  #[serde(default)]
  pub shipping: ShippingConfig,
  /// Supplier catalogs to poll.
  #[serde(default)]
  pub suppliers: SuppliersConfig,
  /// Storefronts to publish to.
  #[serde(default)]
  pub platforms: PlatformsConfig,
  /// Listing notifications.
  #[serde(default)]
  pub notifications: NotificationConfig,
}

/// Run identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
  /// Human-readable name used in logs.
  #[serde(default = "default_run_name")]
  pub name: String,
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
  /// Log payloads instead of publishing them.
  #[serde(default)]
  pub dry_run: bool,
  /// Storefront product type for every listing.
  #[serde(default = "default_product_type")]
  pub product_type: String,
}

impl Default for RunConfig {
  fn default() -> Self {
    Self {
      name: default_run_name(),
      log_level: default_log_level(),
      dry_run: false,
      product_type: default_product_type(),
    }
  }
}

/// Outbound HTTP configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
  /// Whole-request timeout in seconds.
  #[serde(default = "default_timeout")]
  pub timeout_seconds: u64,
}

impl Default for HttpConfig {
  fn default() -> Self {
    Self {
      timeout_seconds: default_timeout(),
    }
  }
}

/// Retry/backoff configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
  /// Total attempts per call, including the first.
  #[serde(default = "default_max_attempts")]
  pub max_attempts: u32,
  /// Delay after the first failure (milliseconds).
  #[serde(default = "default_base_delay_ms")]
  pub base_delay_ms: u64,
  /// Cap for any single delay (milliseconds).
  #[serde(default = "default_max_delay_ms")]
  pub max_delay_ms: u64,
  /// Growth factor between delays.
  #[serde(default = "default_multiplier")]
  pub multiplier: f64,
  /// Optional per-attempt time limit (milliseconds).
  pub attempt_timeout_ms: Option<u64>,
}

impl Default for RetryConfig {
  fn default() -> Self {
    Self {
      max_attempts: default_max_attempts(),
      base_delay_ms: default_base_delay_ms(),
      max_delay_ms: default_max_delay_ms(),
      multiplier: default_multiplier(),
      attempt_timeout_ms: None,
    }
  }
}

impl RetryConfig {
  /// Build the executor policy.
  pub fn policy(&self) -> RetryPolicy {
    RetryPolicy {
      max_attempts: self.max_attempts,
      base_delay: Duration::from_millis(self.base_delay_ms),
      max_delay: Duration::from_millis(self.max_delay_ms),
      multiplier: self.multiplier,
      attempt_timeout: self.attempt_timeout_ms.map(Duration::from_millis),
    }
  }
}

/// Pricing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PricingConfig {
  /// Markup over total cost (0.2 = 20%).
  #[serde(default = "default_margin")]
  pub margin: f64,
}

impl Default for PricingConfig {
  fn default() -> Self {
    Self {
      margin: default_margin(),
    }
  }
}

/// Which shipping-rate provider to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingProvider {
  /// Live rates from ShipStation.
  #[serde(rename = "shipstation")]
  ShipStation,
  /// Fixed cost per product.
  #[default]
  Flat,
}

/// Shipping configuration: provider plus the fixed origin/package profile.
#[derive(Debug, Clone, Deserialize)]
pub struct ShippingConfig {
  #[serde(default)]
  pub provider: ShippingProvider,
  /// Cost used by the flat provider.
  #[serde(default = "default_flat_rate")]
  pub flat_rate: f64,
  #[serde(default = "default_shipstation_url")]
  pub base_url: String,
  #[serde(default = "default_carrier_code")]
  pub carrier_code: String,
  #[serde(default)]
  pub from_postal_code: String,
  #[serde(default = "default_country")]
  pub to_country: String,
  /// Destination used when a product carries no postal code.
  #[serde(default)]
  pub default_destination_postal_code: String,
  #[serde(default = "default_weight_oz")]
  pub weight_oz: f64,
  #[serde(default = "default_dimension_in")]
  pub length_in: f64,
  #[serde(default = "default_dimension_in")]
  pub width_in: f64,
  #[serde(default = "default_dimension_in")]
  pub height_in: f64,
}

impl Default for ShippingConfig {
  fn default() -> Self {
    Self {
      provider: ShippingProvider::default(),
      flat_rate: default_flat_rate(),
      base_url: default_shipstation_url(),
      carrier_code: default_carrier_code(),
      from_postal_code: String::new(),
      to_country: default_country(),
      default_destination_postal_code: String::new(),
      weight_oz: default_weight_oz(),
      length_in: default_dimension_in(),
      width_in: default_dimension_in(),
      height_in: default_dimension_in(),
    }
  }
}

/// One supplier catalog.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SupplierConfig {
  /// Whether this supplier is polled.
  #[serde(default)]
  pub enabled: bool,
  /// Override for the API base URL.
  pub base_url: Option<String>,
  /// Category filter (AliExpress).
  pub category_id: Option<String>,
  /// Item field holding the popularity score (metric-ranked suppliers).
  pub ranking_field: Option<String>,
}

/// All supported supplier catalogs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SuppliersConfig {
  #[serde(default)]
  pub aliexpress: SupplierConfig,
  #[serde(default)]
  pub printify: SupplierConfig,
  #[serde(default)]
  pub printful: SupplierConfig,
  #[serde(default)]
  pub teespring: SupplierConfig,
  #[serde(default)]
  pub modalyst: SupplierConfig,
}

impl SuppliersConfig {
  /// Number of suppliers that will be polled.
  pub fn enabled_count(&self) -> usize {
    [
      &self.aliexpress,
      &self.printify,
      &self.printful,
      &self.teespring,
      &self.modalyst,
    ]
    .iter()
    .filter(|s| s.enabled)
    .count()
  }
}

/// Shopify storefront.
#[derive(Debug, Clone, Deserialize)]
pub struct ShopifyConfig {
  #[serde(default)]
  pub enabled: bool,
  /// `{store_name}.myshopify.com`
  #[serde(default)]
  pub store_name: String,
  #[serde(default = "default_shopify_api_version")]
  pub api_version: String,
  /// Override for the admin API base URL.
  pub base_url: Option<String>,
}

impl Default for ShopifyConfig {
  fn default() -> Self {
    Self {
      enabled: false,
      store_name: String::new(),
      api_version: default_shopify_api_version(),
      base_url: None,
    }
  }
}

/// WooCommerce storefront.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WooCommerceConfig {
  #[serde(default)]
  pub enabled: bool,
  /// Store root, e.g. `https://shop.example.com`.
  #[serde(default)]
  pub store_url: String,
}

/// All supported storefronts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlatformsConfig {
  #[serde(default)]
  pub shopify: ShopifyConfig,
  #[serde(default)]
  pub woocommerce: WooCommerceConfig,
}

impl PlatformsConfig {
  /// Number of storefronts that will receive listings.
  pub fn enabled_count(&self) -> usize {
    usize::from(self.shopify.enabled) + usize::from(self.woocommerce.enabled)
  }
}

/// Notification channel selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationChannel {
  /// Structured log event only.
  #[default]
  Log,
  /// HTTP mail relay.
  EmailRelay,
}

/// Notification configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationConfig {
  #[serde(default)]
  pub channel: NotificationChannel,
  /// Mail relay endpoint (email_relay channel).
  #[serde(default)]
  pub relay_url: String,
  #[serde(default)]
  pub from: String,
  #[serde(default)]
  pub to: Vec<String>,
}

// Default value functions for serde

fn default_run_name() -> String {
  "dropship-automation".to_string()
}

fn default_log_level() -> String {
  "info".to_string()
}

fn default_product_type() -> String {
  crate::domain::normalize::DEFAULT_PRODUCT_TYPE.to_string()
}

fn default_timeout() -> u64 {
  30
}

fn default_max_attempts() -> u32 {
  5
}

fn default_base_delay_ms() -> u64 {
  4_000
}

fn default_max_delay_ms() -> u64 {
  10_000
}

fn default_multiplier() -> f64 {
  2.0
}

fn default_margin() -> f64 {
  0.2
}

fn default_flat_rate() -> f64 {
  5.0
}

fn default_shipstation_url() -> String {
  "https://ssapi.shipstation.com".to_string()
}

fn default_carrier_code() -> String {
  "stamps_com".to_string()
}

fn default_country() -> String {
  "US".to_string()
}

fn default_weight_oz() -> f64 {
  16.0
}

fn default_dimension_in() -> f64 {
  10.0
}

fn default_shopify_api_version() -> String {
  "2023-04".to_string()
}
