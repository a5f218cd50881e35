// trolley/src/store/persistence.rs

//! Encoding the item list into client-local storage and reading it back.

use std::sync::Arc;
use tracing::{event, instrument, Level};

use crate::error::CartResult;
use crate::model::CartLineItem;
use crate::storage::KeyValueStorage;

pub const DEFAULT_STORAGE_KEY: &str = "cart";

/// When mutations reach storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersistencePolicy {
  /// Every effective mutation writes before returning.
  #[default]
  Immediate,
  /// Mutations mark the cart dirty; `CartStore::flush` (or drop) writes.
  Deferred,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartStoreOptions {
  pub storage_key: String,
  pub policy: PersistencePolicy,
}

impl Default for CartStoreOptions {
  fn default() -> Self {
    Self {
      storage_key: DEFAULT_STORAGE_KEY.to_string(),
      policy: PersistencePolicy::default(),
    }
  }
}

impl CartStoreOptions {
  pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
    self.storage_key = key.into();
    self
  }

  pub fn with_policy(mut self, policy: PersistencePolicy) -> Self {
    self.policy = policy;
    self
  }
}

/// Owns the storage handle and key, and knows the persisted layout (a bare JSON array).
pub(crate) struct Persister {
  storage: Arc<dyn KeyValueStorage>,
  key: String,
}

impl Persister {
  pub(crate) fn new(storage: Arc<dyn KeyValueStorage>, key: String) -> Self {
    Self { storage, key }
  }

  pub(crate) fn key(&self) -> &str {
    &self.key
  }

  /// Reads the persisted cart. Never fails: anything unusable yields an empty list.
  #[instrument(name = "Persister::load", skip(self), fields(key = %self.key))]
  pub(crate) fn load(&self) -> Vec<CartLineItem> {
    let raw = match self.storage.get(&self.key) {
      Ok(Some(raw)) => raw,
      Ok(None) => {
        event!(Level::DEBUG, "No persisted cart found. Starting empty.");
        return Vec::new();
      }
      Err(e) => {
        event!(Level::WARN, error = %e, "Persisted cart unreadable. Starting empty.");
        return Vec::new();
      }
    };

    match serde_json::from_str::<Vec<CartLineItem>>(&raw) {
      Ok(items) => {
        let items = normalize(items);
        event!(Level::DEBUG, lines = items.len(), "Persisted cart restored.");
        items
      }
      Err(e) => {
        event!(Level::WARN, error = %e, "Persisted cart is malformed. Starting empty.");
        Vec::new()
      }
    }
  }

  pub(crate) fn save(&self, items: &[CartLineItem]) -> CartResult<()> {
    let encoded = serde_json::to_string(items)?;
    self.storage.set(&self.key, &encoded)
  }
}

impl std::fmt::Debug for Persister {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Persister").field("key", &self.key).finish_non_exhaustive()
  }
}

/// Restores the cart invariants on data that came from outside the store:
/// quantities are floored at 1 and lines sharing an identity key are merged
/// at the position of their first appearance.
pub(crate) fn normalize(items: Vec<CartLineItem>) -> Vec<CartLineItem> {
  let mut out: Vec<CartLineItem> = Vec::with_capacity(items.len());
  for mut item in items {
    if item.quantity == 0 {
      event!(Level::DEBUG, key = %item.key(), "Persisted line had quantity 0. Raised to 1.");
      item.quantity = 1;
    }
    match out
      .iter_mut()
      .find(|existing| existing.matches(&item.product_id, item.variant.as_deref()))
    {
      Some(existing) => {
        event!(Level::DEBUG, key = %item.key(), "Duplicate persisted line merged.");
        existing.quantity = existing.quantity.saturating_add(item.quantity);
      }
      None => out.push(item),
    }
  }
  out
}
