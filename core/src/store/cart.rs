// trolley/src/store/cart.rs

//! The authoritative list of line items for one client.

use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{event, instrument, Level};

use super::events::{CartEvent, CartSnapshot, Listener, Listeners, SubscriptionId};
use super::persistence::{CartStoreOptions, PersistencePolicy, Persister};
use crate::model::{CartLineItem, LineKey, ProductId};
use crate::pricing::subtotal_of;
use crate::storage::KeyValueStorage;

/// A shopper's cart.
///
/// Created once per session with [`CartStore::open`], which rehydrates from
/// storage. Mutations never fail: when storage refuses a write the failure is
/// logged, [`CartStore::persistence_healthy`] turns `false`, and the cart keeps
/// working in memory.
///
/// Totals are always recomputed from `items`; nothing derived is cached.
#[derive(Debug)]
pub struct CartStore {
  items: Vec<CartLineItem>,
  drawer_open: bool,
  persister: Persister,
  policy: PersistencePolicy,
  dirty: bool,
  healthy: bool,
  listeners: Listeners,
}

impl CartStore {
  /// Opens the cart persisted under `options.storage_key`, or an empty one.
  #[instrument(name = "CartStore::open", skip(storage), fields(key = %options.storage_key, policy = ?options.policy))]
  pub fn open(storage: Arc<dyn KeyValueStorage>, options: CartStoreOptions) -> Self {
    let persister = Persister::new(storage, options.storage_key);
    let items = persister.load();
    event!(Level::INFO, lines = items.len(), "Cart store ready.");
    Self {
      items,
      drawer_open: false,
      persister,
      policy: options.policy,
      dirty: false,
      healthy: true,
      listeners: Listeners::default(),
    }
  }

  /// Shorthand for `open` with the default key and immediate persistence.
  pub fn with_storage(storage: Arc<dyn KeyValueStorage>) -> Self {
    Self::open(storage, CartStoreOptions::default())
  }

  // --- Mutations ---

  /// Adds `item`, merging into an existing line with the same key, and opens the drawer.
  ///
  /// `item.quantity` must be at least 1.
  pub fn add_item(&mut self, item: CartLineItem) {
    debug_assert!(item.quantity >= 1, "add_item requires quantity >= 1");
    match self.position(&item.product_id, item.variant.as_deref()) {
      Some(idx) => {
        let existing = &mut self.items[idx];
        existing.quantity = existing.quantity.saturating_add(item.quantity);
        event!(Level::DEBUG, key = %existing.key(), quantity = existing.quantity, "Merged into existing line.");
      }
      None => {
        event!(Level::DEBUG, key = %item.key(), quantity = item.quantity, "Appended new line.");
        self.items.push(item);
      }
    }
    self.items_changed();
    self.set_drawer_open(true);
  }

  /// Removes the matching line. Absent keys are ignored.
  pub fn remove_item(&mut self, product_id: &ProductId, variant: Option<&str>) {
    match self.position(product_id, variant) {
      Some(idx) => {
        let removed = self.items.remove(idx);
        event!(Level::DEBUG, key = %removed.key(), "Removed line.");
        self.items_changed();
      }
      None => {
        event!(Level::TRACE, %product_id, ?variant, "Remove ignored: no matching line.");
      }
    }
  }

  /// Sets the matching line's quantity to `max(1, new_quantity)`. Absent keys are ignored.
  pub fn update_quantity(&mut self, product_id: &ProductId, variant: Option<&str>, new_quantity: i64) {
    let Some(idx) = self.position(product_id, variant) else {
      event!(Level::TRACE, %product_id, ?variant, "Quantity update ignored: no matching line.");
      return;
    };
    let clamped = new_quantity.clamp(1, i64::from(u32::MAX)) as u32;
    let line = &mut self.items[idx];
    if line.quantity == clamped {
      return;
    }
    line.quantity = clamped;
    event!(Level::DEBUG, key = %line.key(), requested = new_quantity, quantity = clamped, "Quantity updated.");
    self.items_changed();
  }

  /// Empties the cart. The empty list is always written so stale persisted state is replaced.
  pub fn clear(&mut self) {
    let had_items = !self.items.is_empty();
    self.items.clear();
    self.dirty = true;
    self.persist_if_immediate();
    if had_items {
      event!(Level::DEBUG, "Cart cleared.");
      self.notify(CartEvent::ItemsChanged);
    }
  }

  // --- Derived queries ---

  pub fn total_item_count(&self) -> u64 {
    self.items.iter().map(|i| u64::from(i.quantity)).sum()
  }

  /// Σ line totals, saturating at the bounds of `Decimal`.
  pub fn total_price(&self) -> Decimal {
    subtotal_of(&self.items)
  }

  // --- Read access ---

  pub fn items(&self) -> &[CartLineItem] {
    &self.items
  }

  pub fn get(&self, product_id: &ProductId, variant: Option<&str>) -> Option<&CartLineItem> {
    self.position(product_id, variant).map(|idx| &self.items[idx])
  }

  pub fn get_by_key(&self, key: &LineKey) -> Option<&CartLineItem> {
    self.get(&key.product_id, key.variant())
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn snapshot(&self) -> CartSnapshot<'_> {
    CartSnapshot {
      items: &self.items,
      drawer_open: self.drawer_open,
    }
  }

  pub fn storage_key(&self) -> &str {
    self.persister.key()
  }

  // --- Drawer view state (never persisted) ---

  pub fn is_drawer_open(&self) -> bool {
    self.drawer_open
  }

  pub fn set_drawer_open(&mut self, open: bool) {
    if self.drawer_open != open {
      self.drawer_open = open;
      self.notify(CartEvent::DrawerChanged { open });
    }
  }

  pub fn open_drawer(&mut self) {
    self.set_drawer_open(true);
  }

  pub fn close_drawer(&mut self) {
    self.set_drawer_open(false);
  }

  pub fn toggle_drawer(&mut self) {
    self.set_drawer_open(!self.drawer_open);
  }

  // --- Subscriptions ---

  /// Registers a listener called synchronously after every effective change.
  ///
  /// Listeners run inside the mutating call. When the store lives in a
  /// [`SharedCart`](super::SharedCart) that means under its write guard, so a
  /// listener must not lock that `SharedCart` again (the lock is not
  /// reentrant). Everything a listener needs is in the `CartSnapshot`.
  pub fn subscribe(&mut self, listener: impl Fn(&CartEvent, &CartSnapshot<'_>) + Send + Sync + 'static) -> SubscriptionId {
    let boxed: Listener = Box::new(listener);
    self.listeners.add(boxed)
  }

  pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
    self.listeners.remove(id)
  }

  pub fn subscriber_count(&self) -> usize {
    self.listeners.len()
  }

  // --- Persistence ---

  pub fn policy(&self) -> PersistencePolicy {
    self.policy
  }

  /// `false` once a write has failed, until the next successful write.
  pub fn persistence_healthy(&self) -> bool {
    self.healthy
  }

  /// Whether a deferred write is pending.
  pub fn has_pending_write(&self) -> bool {
    self.dirty
  }

  /// Writes any pending change. Failures are logged and swallowed.
  pub fn flush(&mut self) {
    if !self.dirty {
      return;
    }
    match self.persister.save(&self.items) {
      Ok(()) => {
        if !self.healthy {
          event!(Level::INFO, key = %self.persister.key(), "Cart persistence recovered.");
        }
        self.healthy = true;
        self.dirty = false;
      }
      Err(e) => {
        // The cart keeps working for this session; it just won't survive a reload.
        event!(Level::WARN, key = %self.persister.key(), error = %e, "Failed to persist cart. Continuing in memory.");
        self.healthy = false;
      }
    }
  }

  // --- Internals ---

  fn position(&self, product_id: &ProductId, variant: Option<&str>) -> Option<usize> {
    self.items.iter().position(|i| i.matches(product_id, variant))
  }

  fn items_changed(&mut self) {
    self.dirty = true;
    self.persist_if_immediate();
    self.notify(CartEvent::ItemsChanged);
  }

  fn persist_if_immediate(&mut self) {
    if self.policy == PersistencePolicy::Immediate {
      self.flush();
    }
  }

  fn notify(&self, event: CartEvent) {
    self.listeners.notify(&event, &self.snapshot());
  }
}

impl Drop for CartStore {
  fn drop(&mut self) {
    if self.dirty {
      event!(Level::DEBUG, key = %self.persister.key(), "Flushing pending cart write on drop.");
      self.flush();
    }
  }
}
