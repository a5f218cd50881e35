// trolley/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

use crate::model::ProductId;

#[derive(Debug, Error)]
pub enum CartError {
  #[error("Storage I/O failed for key '{key}'. Source: {source}")]
  Storage {
    key: String,
    #[source]
    source: std::io::Error,
  },

  #[error("Storage quota exceeded for key '{key}': {needed} bytes needed, {limit} allowed")]
  QuotaExceeded { key: String, needed: usize, limit: usize },

  #[error("Client-local storage is disabled")]
  StorageDisabled,

  #[error("Invalid storage key '{key}': only ASCII letters, digits, '-' and '_' are allowed")]
  InvalidKey { key: String },

  #[error("JSON (de)serialization failed: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("Product not found in catalog: {0}")]
  UnknownProduct(ProductId),

  #[error("Product {product_id} has no variant '{variant}'")]
  UnknownVariant { product_id: ProductId, variant: String },

  #[error("Cannot check out an empty cart")]
  EmptyCart,

  #[error("Checkout handler failed. Source: {source}")]
  Checkout {
    #[source]
    source: AnyhowError,
  },
}

// Errors coming out of user code (checkout handlers, custom storage) arrive as anyhow.
impl From<AnyhowError> for CartError {
  fn from(err: AnyhowError) -> Self {
    match err.downcast::<CartError>() {
      Ok(cart_err) => cart_err,
      Err(other) => CartError::Checkout { source: other },
    }
  }
}

pub type CartResult<T, E = CartError> = std::result::Result<T, E>;
