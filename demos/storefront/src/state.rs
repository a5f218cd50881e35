// demos/storefront/src/state.rs
use crate::config::StorefrontConfig;
use crate::errors::Result;
use std::sync::Arc;
use trolley::{CartDrawer, CartStore, CartStoreOptions, Catalog, FileStorage, SharedCart};

/// Everything a command needs, built once per process (one process run is one "page load").
#[derive(Clone)]
pub struct AppState {
  pub cart: SharedCart,
  pub catalog: Arc<Catalog>,
  pub drawer: CartDrawer,
}

impl AppState {
  pub fn build(config: StorefrontConfig) -> Result<Self> {
    let catalog = match &config.catalog_path {
      Some(path) => {
        tracing::info!(path = %path.display(), "Loading catalog from file.");
        Catalog::from_path(path)?
      }
      None => Catalog::builtin()?,
    };

    let storage = Arc::new(FileStorage::new(config.data_dir.clone()));
    let options = CartStoreOptions::default()
      .with_storage_key(config.cart_key.clone())
      .with_policy(config.persistence);
    let store = CartStore::open(storage, options);

    Ok(Self {
      cart: SharedCart::new(store),
      catalog: Arc::new(catalog),
      drawer: CartDrawer::new(config.shipping),
    })
  }
}
