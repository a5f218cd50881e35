// src/lib.rs

//! Trolley: a persisted, type-safe shopping cart store for Rust storefronts.
//!
//! Trolley holds a shopper's selections and keeps them across sessions:
//!  - Line items keyed by (product id, variant); repeat additions merge.
//!  - Quantities floored at 1; removal is its own operation.
//!  - Totals always derived from the lines, never cached.
//!  - Every change written to client-local key-value storage (or batched and flushed).
//!  - Storage failures logged and absorbed: the cart degrades to memory-only.
//!  - A drawer view model with a shipping policy, and an injectable checkout handler.

pub mod catalog;
pub mod checkout;
pub mod drawer;
pub mod error;
pub mod model;
pub mod pricing;
pub mod storage;
pub mod store;

// --- Re-exports for the Public API ---

pub use crate::model::{CartLineItem, LineKey, ProductId};

pub use crate::store::{
  CartEvent, CartSnapshot, CartStore, CartStoreOptions, PersistencePolicy, SharedCart, SubscriptionId,
  DEFAULT_STORAGE_KEY,
};

pub use crate::storage::{FileStorage, KeyValueStorage, MemoryStorage};

pub use crate::pricing::{format_money, CartSummary, Shipping, ShippingPolicy};

pub use crate::drawer::{CartBadge, CartDrawer, DrawerAction, DrawerBody, DrawerView, LineView};

pub use crate::catalog::{Catalog, Product, ProductSelection};

pub use crate::checkout::{submit_checkout, CheckoutHandler, CheckoutOutcome, CheckoutRequest, UnconfiguredCheckout};

pub use crate::error::{CartError, CartResult};

/*
    Typical wiring:
    1. Pick a storage backend (`FileStorage` for a desktop/CLI client, `MemoryStorage` in tests)
       and wrap it in an `Arc`.
    2. `CartStore::open(storage, CartStoreOptions::default())` once at startup; wrap the
       store in a `SharedCart` and hand clones to whatever needs the cart.
    3. Build lines from the catalog (`ProductSelection::to_line_item`) and `add_item` them.
    4. Render with `CartDrawer::view(&store.snapshot())`; route the panel's controls
       through `CartDrawer::apply`.
    5. For checkout, build a request with `CartDrawer::checkout_request` while holding the
       lock, release it, then `submit_checkout(&handler, request).await`.
*/
