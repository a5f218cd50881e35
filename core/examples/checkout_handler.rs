// trolley/examples/checkout_handler.rs

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;
use trolley::{
  submit_checkout, CartDrawer, CartError, CartStore, CheckoutHandler, CheckoutOutcome, CheckoutRequest, Catalog,
  MemoryStorage, ProductId, SharedCart,
};

// 1. An integrator-provided checkout. Here it only accepts orders with free shipping.
struct FreeShippingOnly;

#[async_trait]
impl CheckoutHandler for FreeShippingOnly {
  async fn checkout(&self, request: CheckoutRequest) -> anyhow::Result<CheckoutOutcome> {
    tokio::time::sleep(std::time::Duration::from_millis(20)).await; // Simulate a network hop
    if request.summary.shipping.is_free() {
      Ok(CheckoutOutcome::Accepted {
        reference: format!("demo-{}", request.summary.item_count),
      })
    } else {
      Ok(CheckoutOutcome::Declined {
        reason: "this demo only ships free orders".to_string(),
      })
    }
  }
}

#[tokio::main]
async fn main() -> Result<(), CartError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Checkout Handler Example ---");

  let catalog = Catalog::builtin()?;
  let cart = SharedCart::new(CartStore::with_storage(Arc::new(MemoryStorage::new())));
  let drawer = CartDrawer::default();

  // 2. Each checkout request is built under the lock; the lock is released before awaiting.
  for id in [5u64, 4] {
    let product = catalog.require(&ProductId::Numeric(id))?;
    cart.write().add_item(product.line_item(None, 1));

    let request = drawer.checkout_request(&cart.read().snapshot())?;
    let outcome = submit_checkout(&FreeShippingOnly, request).await?;
    info!(?outcome, "Checkout attempt finished.");
  }
  Ok(())
}
