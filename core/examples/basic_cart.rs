// trolley/examples/basic_cart.rs

use std::sync::Arc;
use tracing::info;
use trolley::{
  CartDrawer, CartError, CartStore, CartStoreOptions, Catalog, DrawerAction, LineKey, MemoryStorage, ProductId,
  ProductSelection,
};

fn main() -> Result<(), CartError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Basic Cart Example ---");

  // 1. Storage outlives the store, so a second `open` behaves like a page reload.
  let storage = Arc::new(MemoryStorage::new());
  let catalog = Catalog::builtin()?;
  let drawer = CartDrawer::default();

  {
    let mut store = CartStore::open(storage.clone(), CartStoreOptions::default());

    // 2. Pick a size and quantity on the product page, then add.
    let tee = catalog.require(&ProductId::Numeric(1))?;
    let mut selection = ProductSelection::new(tee);
    selection.select_variant("L")?;
    selection.step_quantity(1);
    store.add_item(selection.to_line_item());

    let stickers = catalog.require(&ProductId::Numeric(6))?;
    store.add_item(ProductSelection::new(stickers).to_line_item());

    // 3. Use the drawer's stepper.
    drawer.apply(&mut store, DrawerAction::Increment(LineKey::new(6u64, None)));

    println!("{}", drawer.view(&store.snapshot()));
  }

  // 4. "Reload": the cart comes back, the drawer starts closed.
  let store = CartStore::open(storage, CartStoreOptions::default());
  info!(
    lines = store.len(),
    items = store.total_item_count(),
    drawer_open = store.is_drawer_open(),
    "Cart after reload."
  );
  Ok(())
}
