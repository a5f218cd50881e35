// trolley/src/storage/mod.rs

//! Client-local key-value storage the cart persists itself into.
//!
//! Values are opaque strings (the cart writes a JSON array). Implementations
//! must be usable from any thread; the cart only ever calls them synchronously.

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::{CartError, CartResult};

/// Durable, client-local key-value storage.
pub trait KeyValueStorage: Send + Sync {
  /// Returns the stored value, or `None` when the key has never been written.
  fn get(&self, key: &str) -> CartResult<Option<String>>;

  /// Replaces the value stored under `key`.
  fn set(&self, key: &str, value: &str) -> CartResult<()>;

  /// Removes `key`. Removing an absent key is not an error.
  fn remove(&self, key: &str) -> CartResult<()>;
}

/// Storage keys end up as file names, so they are kept to a portable alphabet.
pub(crate) fn validate_key(key: &str) -> CartResult<()> {
  let valid = !key.is_empty()
    && key
      .chars()
      .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
  if valid {
    Ok(())
  } else {
    Err(CartError::InvalidKey { key: key.to_string() })
  }
}
