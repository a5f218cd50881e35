// trolley/src/store/shared.rs
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

use super::CartStore;

/// The one handle to a cart that gets injected at the root of an application
/// and cloned into whatever needs it.
///
/// IMPORTANT: Lock guards obtained from this struct are blocking and MUST NOT
/// be held across `.await` suspension points in asynchronous code.
///
/// The lock is not reentrant. Listeners registered with
/// [`CartStore::subscribe`] run while the mutating caller holds the write
/// guard, so a listener that calls `read()` or `write()` on a clone of the
/// same `SharedCart` deadlocks. Listeners read the state from the
/// `CartSnapshot` they are given instead.
#[derive(Debug, Clone)]
pub struct SharedCart(Arc<RwLock<CartStore>>);

impl SharedCart {
  pub fn new(store: CartStore) -> Self {
    SharedCart(Arc::new(RwLock::new(store)))
  }

  /// Acquires a read lock.
  /// The returned guard MUST be dropped before any `.await` point.
  pub fn read(&self) -> RwLockReadGuard<'_, CartStore> {
    self.0.read()
  }

  /// Acquires a write lock.
  /// The returned guard MUST be dropped before any `.await` point.
  pub fn write(&self) -> RwLockWriteGuard<'_, CartStore> {
    self.0.write()
  }

  /// Attempts to acquire a read lock without blocking.
  pub fn try_read(&self) -> Option<RwLockReadGuard<'_, CartStore>> {
    self.0.try_read()
  }

  /// Attempts to acquire a write lock without blocking.
  pub fn try_write(&self) -> Option<RwLockWriteGuard<'_, CartStore>> {
    self.0.try_write()
  }

  /// Runs `f` with exclusive access, releasing the lock before returning.
  pub fn update<R>(&self, f: impl FnOnce(&mut CartStore) -> R) -> R {
    let mut guard = self.0.write();
    f(&mut *guard)
  }
}

impl From<CartStore> for SharedCart {
  fn from(store: CartStore) -> Self {
    SharedCart::new(store)
  }
}
