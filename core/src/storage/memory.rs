// trolley/src/storage/memory.rs

use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::{event, Level};

use super::{validate_key, KeyValueStorage};
use crate::error::{CartError, CartResult};

/// In-process storage.
///
/// Shared behind an `Arc`, it outlives any one `CartStore`, which is how tests
/// and embedders simulate a reload. A byte quota and a disabled mode reproduce
/// the two ways browser storage refuses writes.
#[derive(Debug, Default)]
pub struct MemoryStorage {
  entries: Mutex<HashMap<String, String>>,
  quota: Option<usize>,
  disabled: bool,
}

impl MemoryStorage {
  pub fn new() -> Self {
    Self::default()
  }

  /// Rejects any write that would push the total stored bytes (keys plus values) above `limit`.
  pub fn with_quota(limit: usize) -> Self {
    Self {
      quota: Some(limit),
      ..Self::default()
    }
  }

  /// Every call fails with `CartError::StorageDisabled`.
  pub fn disabled() -> Self {
    Self {
      disabled: true,
      ..Self::default()
    }
  }

  /// Raw access for seeding and inspection, bypassing the disabled flag and quota.
  pub fn insert_raw(&self, key: &str, value: &str) {
    self.entries.lock().insert(key.to_string(), value.to_string());
  }

  pub fn raw(&self, key: &str) -> Option<String> {
    self.entries.lock().get(key).cloned()
  }

  fn ensure_enabled(&self) -> CartResult<()> {
    if self.disabled {
      return Err(CartError::StorageDisabled);
    }
    Ok(())
  }
}

impl KeyValueStorage for MemoryStorage {
  fn get(&self, key: &str) -> CartResult<Option<String>> {
    self.ensure_enabled()?;
    validate_key(key)?;
    Ok(self.entries.lock().get(key).cloned())
  }

  fn set(&self, key: &str, value: &str) -> CartResult<()> {
    self.ensure_enabled()?;
    validate_key(key)?;
    let mut entries = self.entries.lock();
    if let Some(limit) = self.quota {
      let others: usize = entries
        .iter()
        .filter(|(k, _)| k.as_str() != key)
        .map(|(k, v)| k.len() + v.len())
        .sum();
      let needed = others + key.len() + value.len();
      if needed > limit {
        event!(Level::DEBUG, %key, needed, limit, "Memory storage quota exceeded.");
        return Err(CartError::QuotaExceeded {
          key: key.to_string(),
          needed,
          limit,
        });
      }
    }
    entries.insert(key.to_string(), value.to_string());
    Ok(())
  }

  fn remove(&self, key: &str) -> CartResult<()> {
    self.ensure_enabled()?;
    validate_key(key)?;
    self.entries.lock().remove(key);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn set_get_remove() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.get("cart").unwrap(), None);
    storage.set("cart", "[]").unwrap();
    assert_eq!(storage.get("cart").unwrap().as_deref(), Some("[]"));
    storage.remove("cart").unwrap();
    storage.remove("cart").unwrap();
    assert_eq!(storage.get("cart").unwrap(), None);
  }

  #[test]
  fn quota_counts_replaced_value_only_once() {
    let storage = MemoryStorage::with_quota(12);
    storage.set("cart", "12345678").unwrap();
    // Overwriting the same key does not double count the old value.
    storage.set("cart", "87654321").unwrap();
    let err = storage.set("cart", "123456789").unwrap_err();
    assert!(matches!(err, CartError::QuotaExceeded { needed: 13, limit: 12, .. }));
    assert_eq!(storage.raw("cart").as_deref(), Some("87654321"));
  }

  #[test]
  fn disabled_storage_refuses_everything() {
    let storage = MemoryStorage::disabled();
    assert!(matches!(storage.get("cart"), Err(CartError::StorageDisabled)));
    assert!(matches!(storage.set("cart", "[]"), Err(CartError::StorageDisabled)));
    assert!(matches!(storage.remove("cart"), Err(CartError::StorageDisabled)));
  }
}
