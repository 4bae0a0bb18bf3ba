//! Credentials - Secrets Loaded From the Environment
//!
//! Each enabled supplier, platform, shipping provider and notification
//! channel names the environment variables it needs. All of them are
//! resolved once, before any network call; a missing one is a
//! [`ConfigError`].

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use super::{AppConfig, NotificationChannel, ShippingProvider};

pub const ALIEXPRESS_RAPIDAPI_KEY: &str = "ALIEXPRESS_RAPIDAPI_KEY";
pub const PRINTIFY_API_KEY: &str = "PRINTIFY_API_KEY";
pub const PRINTFUL_API_KEY: &str = "PRINTFUL_API_KEY";
pub const TEESPRING_API_KEY: &str = "TEESPRING_API_KEY";
pub const MODALYST_API_KEY: &str = "MODALYST_API_KEY";
pub const SHOPIFY_ACCESS_TOKEN: &str = "SHOPIFY_ACCESS_TOKEN";
pub const WOOCOMMERCE_API_KEY: &str = "WOOCOMMERCE_API_KEY";
pub const WOOCOMMERCE_SECRET: &str = "WOOCOMMERCE_SECRET";
pub const SHIPSTATION_API_KEY: &str = "SHIPSTATION_API_KEY";
pub const SHIPSTATION_API_SECRET: &str = "SHIPSTATION_API_SECRET";
pub const NOTIFY_RELAY_TOKEN: &str = "NOTIFY_RELAY_TOKEN";

/// Startup configuration failure. Never retried.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
  /// A required secret is unset or empty.
  #[error("missing credential {name} (required by {owner})")]
  MissingCredential {
    name: &'static str,
    owner: &'static str,
  },
  /// A credential was requested that was never loaded.
  #[error("credential {0} was not loaded")]
  NotLoaded(&'static str),
}

/// Resolved secrets, keyed by environment variable name.
///
/// `Debug` output never includes the values.
#[derive(Clone, Default)]
pub struct Credentials {
  values: BTreeMap<&'static str, String>,
}

impl Credentials {
  /// Load every credential the config needs from the process environment.
  pub fn from_env(config: &AppConfig) -> Result<Self, ConfigError> {
    Self::from_lookup(config, |name| std::env::var(name).ok())
  }

  /// Load credentials through an arbitrary lookup (env, test map, ...).
  pub fn from_lookup<F>(config: &AppConfig, lookup: F) -> Result<Self, ConfigError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let mut values = BTreeMap::new();

    for (name, owner) in required_credentials(config) {
      let value = lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingCredential { name, owner })?;
      values.insert(name, value);
    }

    Ok(Self { values })
  }

  /// Fetch a loaded credential.
  pub fn get(&self, name: &'static str) -> Result<&str, ConfigError> {
    self
      .values
      .get(name)
      .map(String::as_str)
      .ok_or(ConfigError::NotLoaded(name))
  }
}

impl fmt::Debug for Credentials {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Credentials")
      .field("loaded", &self.values.keys().collect::<Vec<_>>())
      .finish()
  }
}

/// `(env var, owner)` pairs required by the enabled components.
pub fn required_credentials(config: &AppConfig) -> Vec<(&'static str, &'static str)> {
  let mut required = Vec::new();
  let s = &config.suppliers;

  if s.aliexpress.enabled {
    required.push((ALIEXPRESS_RAPIDAPI_KEY, "AliExpress"));
  }
  if s.printify.enabled {
    required.push((PRINTIFY_API_KEY, "Printify"));
  }
  if s.printful.enabled {
    required.push((PRINTFUL_API_KEY, "Printful"));
  }
  if s.teespring.enabled {
    required.push((TEESPRING_API_KEY, "TeeSpring"));
  }
  if s.modalyst.enabled {
    required.push((MODALYST_API_KEY, "Modalyst"));
  }

  if config.platforms.shopify.enabled {
    required.push((SHOPIFY_ACCESS_TOKEN, "Shopify"));
  }
  if config.platforms.woocommerce.enabled {
    required.push((WOOCOMMERCE_API_KEY, "WooCommerce"));
    required.push((WOOCOMMERCE_SECRET, "WooCommerce"));
  }

  if config.shipping.provider == ShippingProvider::ShipStation {
    required.push((SHIPSTATION_API_KEY, "ShipStation"));
    required.push((SHIPSTATION_API_SECRET, "ShipStation"));
  }

  if config.notifications.channel == NotificationChannel::EmailRelay {
    required.push((NOTIFY_RELAY_TOKEN, "email relay"));
  }

  required
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use super::*;

  fn config_with_printify_and_shopify() -> AppConfig {
    let mut config = AppConfig::default();
    config.suppliers.printify.enabled = true;
    config.platforms.shopify.enabled = true;
    config
  }

  #[test]
  fn test_only_enabled_components_require_credentials() {
    let config = config_with_printify_and_shopify();
    let names: Vec<_> = required_credentials(&config).into_iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec![PRINTIFY_API_KEY, SHOPIFY_ACCESS_TOKEN]);
  }

  #[test]
  fn test_missing_credential_is_config_error() {
    let config = config_with_printify_and_shopify();
    let env = HashMap::from([(PRINTIFY_API_KEY, "pk")]);

    let err = Credentials::from_lookup(&config, |n| env.get(n).map(|v| (*v).to_string()))
      .unwrap_err();
    assert_eq!(
      err,
      ConfigError::MissingCredential {
        name: SHOPIFY_ACCESS_TOKEN,
        owner: "Shopify",
      }
    );
  }

  #[test]
  fn test_blank_credential_counts_as_missing() {
    let config = config_with_printify_and_shopify();
    let result = Credentials::from_lookup(&config, |_| Some("   ".to_string()));
    assert!(matches!(result, Err(ConfigError::MissingCredential { .. })));
  }

  #[test]
  fn test_debug_redacts_values() {
    let config = config_with_printify_and_shopify();
    let creds = Credentials::from_lookup(&config, |_| Some("super-secret".to_string())).unwrap();

    assert!(format!("{creds:?}").contains(PRINTIFY_API_KEY));
    assert_eq!(creds.get(PRINTIFY_API_KEY).unwrap(), "super-secret");
    assert!(!format!("{creds:?}").contains("super-secret"));
    assert_eq!(creds.get(MODALYST_API_KEY), Err(ConfigError::NotLoaded(MODALYST_API_KEY)));
  }
}
