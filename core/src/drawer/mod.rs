// trolley/src/drawer/mod.rs

//! The cart drawer: a slide-in panel over the store.
//!
//! This module is a view model. [`CartDrawer::view`] turns a [`CartSnapshot`]
//! into plain data any renderer can draw, and [`CartDrawer::apply`] maps the
//! panel's controls back onto store mutations.

pub mod action;
pub mod view;

pub use action::DrawerAction;
pub use view::{CartBadge, DrawerBody, DrawerView, LineView, Link, SummaryView};

use crate::checkout::CheckoutRequest;
use crate::error::{CartError, CartResult};
use crate::pricing::{CartSummary, ShippingPolicy};
use crate::store::CartSnapshot;

pub const DEFAULT_SHOP_HREF: &str = "/merch";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartDrawer {
  policy: ShippingPolicy,
  shop_href: String,
}

impl Default for CartDrawer {
  fn default() -> Self {
    Self::new(ShippingPolicy::default())
  }
}

impl CartDrawer {
  pub fn new(policy: ShippingPolicy) -> Self {
    Self {
      policy,
      shop_href: DEFAULT_SHOP_HREF.to_string(),
    }
  }

  /// Where the empty state's "Continue Shopping" link points.
  pub fn with_shop_href(mut self, href: impl Into<String>) -> Self {
    self.shop_href = href.into();
    self
  }

  pub fn policy(&self) -> &ShippingPolicy {
    &self.policy
  }

  pub fn summary(&self, snapshot: &CartSnapshot<'_>) -> CartSummary {
    CartSummary::of(snapshot.items, &self.policy)
  }

  /// Detaches what the checkout control needs from the store.
  pub fn checkout_request(&self, snapshot: &CartSnapshot<'_>) -> CartResult<CheckoutRequest> {
    if snapshot.is_empty() {
      return Err(CartError::EmptyCart);
    }
    Ok(CheckoutRequest {
      items: snapshot.items.to_vec(),
      summary: self.summary(snapshot),
    })
  }
}
