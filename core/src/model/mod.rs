// trolley/src/model/mod.rs

//! Data structures describing what sits in a cart.

pub mod line_item;
pub mod product_id;

pub use line_item::{CartLineItem, LineKey};
pub use product_id::ProductId;
