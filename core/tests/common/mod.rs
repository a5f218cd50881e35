// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::{
  atomic::{AtomicBool, AtomicUsize, Ordering},
  Arc,
};
use tracing::Level;
use trolley::{CartError, CartLineItem, CartResult, CartStore, CartStoreOptions, KeyValueStorage, MemoryStorage, PersistencePolicy};

// --- Sample lines, copied from the builtin catalog ---
pub fn tee(variant: &str, quantity: u32) -> CartLineItem {
  CartLineItem::new(1u64, "Circuit Board T-Shirt", dec!(24.99), "/merch/tshirt.jpg", quantity).with_variant(variant)
}

pub fn hoodie(variant: &str, quantity: u32) -> CartLineItem {
  CartLineItem::new(3u64, "Tech Enthusiast Hoodie", dec!(39.99), "/merch/hoodie.jpg", quantity).with_variant(variant)
}

pub fn pi_kit(quantity: u32) -> CartLineItem {
  CartLineItem::new(4u64, "Raspberry Pi 4 Kit", dec!(69.99), "/merch/raspberry-pi.jpg", quantity)
}

pub fn stickers(quantity: u32) -> CartLineItem {
  CartLineItem::new(6u64, "Tech Sticker Pack", dec!(9.99), "/merch/stickers.jpg", quantity)
}

/// Totals recomputed from scratch, for drift checks.
pub fn recomputed_totals(items: &[CartLineItem]) -> (u64, Decimal) {
  let mut count = 0u64;
  let mut price = Decimal::ZERO;
  for item in items {
    count += u64::from(item.quantity);
    price += item.unit_price * Decimal::from(item.quantity);
  }
  (count, price)
}

pub fn assert_no_drift(store: &CartStore) {
  let (count, price) = recomputed_totals(store.items());
  assert_eq!(store.total_item_count(), count);
  assert_eq!(store.total_price(), price);
}

// --- Storage doubles ---

/// Counts writes and can be switched into a failing mode at runtime.
#[derive(Debug, Default)]
pub struct FlakyStorage {
  inner: MemoryStorage,
  failing: AtomicBool,
  writes: AtomicUsize,
}

impl FlakyStorage {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn set_failing(&self, failing: bool) {
    self.failing.store(failing, Ordering::SeqCst);
  }

  pub fn writes(&self) -> usize {
    self.writes.load(Ordering::SeqCst)
  }

  pub fn raw(&self, key: &str) -> Option<String> {
    self.inner.raw(key)
  }
}

impl KeyValueStorage for FlakyStorage {
  fn get(&self, key: &str) -> CartResult<Option<String>> {
    if self.failing.load(Ordering::SeqCst) {
      return Err(CartError::StorageDisabled);
    }
    self.inner.get(key)
  }

  fn set(&self, key: &str, value: &str) -> CartResult<()> {
    if self.failing.load(Ordering::SeqCst) {
      return Err(CartError::QuotaExceeded {
        key: key.to_string(),
        needed: value.len(),
        limit: 0,
      });
    }
    self.writes.fetch_add(1, Ordering::SeqCst);
    self.inner.set(key, value)
  }

  fn remove(&self, key: &str) -> CartResult<()> {
    self.inner.remove(key)
  }
}

pub fn open_store(storage: &Arc<impl KeyValueStorage + 'static>) -> CartStore {
  CartStore::open(storage.clone(), CartStoreOptions::default())
}

pub fn open_deferred(storage: &Arc<impl KeyValueStorage + 'static>) -> CartStore {
  CartStore::open(
    storage.clone(),
    CartStoreOptions::default().with_policy(PersistencePolicy::Deferred),
  )
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
