// demos/storefront/src/errors.rs

use thiserror::Error;
use trolley::CartError;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Cart Error: {source}")]
  Cart {
    #[from] // Allows conversion from trolley::CartError
    source: CartError,
  },
}

impl AppError {
  /// Process exit code for this error: 2 for bad input or configuration, 1 otherwise.
  pub fn exit_code(&self) -> i32 {
    match self {
      AppError::Config(_) => 2,
      AppError::Cart {
        source: CartError::UnknownProduct(_) | CartError::UnknownVariant { .. } | CartError::EmptyCart,
      } => 2,
      _ => 1,
    }
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
