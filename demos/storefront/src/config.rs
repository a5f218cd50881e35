// demos/storefront/src/config.rs

use crate::errors::{AppError, Result}; // Use AppError specific Result
use dotenvy::dotenv;
use rust_decimal::Decimal;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use trolley::{PersistencePolicy, ShippingPolicy, DEFAULT_STORAGE_KEY};

#[derive(Debug, Clone)] // Clone is useful if parts of config are passed around
pub struct StorefrontConfig {
  pub data_dir: PathBuf,
  pub cart_key: String,
  pub persistence: PersistencePolicy,
  pub shipping: ShippingPolicy,

  // Optional: replaces the builtin merch catalog
  pub catalog_path: Option<PathBuf>,
}

impl StorefrontConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the config from any variable source; `from_env` passes the process environment.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let data_dir = lookup("STOREFRONT_DATA_DIR")
      .map(PathBuf::from)
      .unwrap_or_else(|| PathBuf::from(".storefront"));
    let cart_key = lookup("STOREFRONT_CART_KEY").unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());

    let persistence = match lookup("STOREFRONT_PERSISTENCE").as_deref().map(str::trim) {
      None | Some("") | Some("immediate") => PersistencePolicy::Immediate,
      Some("deferred") => PersistencePolicy::Deferred,
      Some(other) => {
        return Err(AppError::Config(format!(
          "Invalid STOREFRONT_PERSISTENCE '{}': expected 'immediate' or 'deferred'",
          other
        )))
      }
    };

    let defaults = ShippingPolicy::default();
    let free_over = parse_amount(&lookup, "STOREFRONT_FREE_SHIPPING_OVER", defaults.free_over)?;
    let flat_fee = parse_amount(&lookup, "STOREFRONT_FLAT_SHIPPING", defaults.flat_fee)?;

    let catalog_path = lookup("STOREFRONT_CATALOG")
      .filter(|s| !s.trim().is_empty())
      .map(PathBuf::from);

    tracing::debug!(data_dir = %data_dir.display(), %cart_key, ?persistence, "Storefront configuration loaded.");

    Ok(Self {
      data_dir,
      cart_key,
      persistence,
      shipping: ShippingPolicy::new(free_over, flat_fee),
      catalog_path,
    })
  }
}

fn parse_amount(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: Decimal) -> Result<Decimal> {
  match lookup(name) {
    None => Ok(default),
    Some(raw) => {
      let amount = Decimal::from_str(raw.trim()).map_err(|e| AppError::Config(format!("Invalid {}: {}", name, e)))?;
      if amount.is_sign_negative() {
        return Err(AppError::Config(format!("Invalid {}: must not be negative", name)));
      }
      Ok(amount)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  fn config_from(pairs: &[(&str, &str)]) -> Result<StorefrontConfig> {
    let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    StorefrontConfig::from_lookup(|name| vars.get(name).cloned())
  }

  #[test]
  fn defaults() {
    let config = config_from(&[]).unwrap();
    assert_eq!(config.data_dir, PathBuf::from(".storefront"));
    assert_eq!(config.cart_key, "cart");
    assert_eq!(config.persistence, PersistencePolicy::Immediate);
    assert_eq!(config.shipping, ShippingPolicy::default());
    assert!(config.catalog_path.is_none());
  }

  #[test]
  fn overrides() {
    let config = config_from(&[
      ("STOREFRONT_DATA_DIR", "/tmp/shop"),
      ("STOREFRONT_CART_KEY", "cart_eu"),
      ("STOREFRONT_PERSISTENCE", "deferred"),
      ("STOREFRONT_FREE_SHIPPING_OVER", "50"),
      ("STOREFRONT_FLAT_SHIPPING", " 3.49 "),
      ("STOREFRONT_CATALOG", "catalog.json"),
    ])
    .unwrap();
    assert_eq!(config.persistence, PersistencePolicy::Deferred);
    assert_eq!(config.shipping, ShippingPolicy::new(Decimal::new(50, 0), Decimal::new(349, 2)));
    assert_eq!(config.catalog_path, Some(PathBuf::from("catalog.json")));
  }

  #[test]
  fn rejects_bad_values() {
    assert!(matches!(config_from(&[("STOREFRONT_PERSISTENCE", "sometimes")]), Err(AppError::Config(_))));
    assert!(matches!(config_from(&[("STOREFRONT_FLAT_SHIPPING", "five")]), Err(AppError::Config(_))));
    assert!(matches!(config_from(&[("STOREFRONT_FREE_SHIPPING_OVER", "-1")]), Err(AppError::Config(_))));
  }
}
