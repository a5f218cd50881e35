// trolley/src/store/mod.rs

//! The Cart Store: line items, mutations, derived totals and persistence.

pub mod cart;
pub mod events;
pub mod persistence;
pub mod shared;

pub use cart::CartStore;
pub use events::{CartEvent, CartSnapshot, SubscriptionId};
pub use persistence::{CartStoreOptions, PersistencePolicy, DEFAULT_STORAGE_KEY};
pub use shared::SharedCart;
