// trolley/src/checkout.rs

//! Checkout integration point.
//!
//! The cart has no checkout behavior of its own. Integrators implement
//! [`CheckoutHandler`] (a payment pipeline, a redirect to a hosted checkout, an
//! order API call) and hand it to the drawer's checkout control. Until then,
//! [`UnconfiguredCheckout`] answers `NotConfigured`.

use async_trait::async_trait;
use serde::Serialize;
use tracing::{event, instrument, Level};

use crate::error::{CartError, CartResult};
use crate::model::CartLineItem;
use crate::pricing::CartSummary;

/// Everything a checkout needs, detached from the store so no lock is held while it runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutRequest {
  pub items: Vec<CartLineItem>,
  pub summary: CartSummary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
  /// No checkout backend is wired in.
  NotConfigured,
  /// The order was handed off; `reference` identifies it to the backend.
  Accepted { reference: String },
  /// The backend refused the order.
  Declined { reason: String },
}

#[async_trait]
pub trait CheckoutHandler: Send + Sync {
  async fn checkout(&self, request: CheckoutRequest) -> anyhow::Result<CheckoutOutcome>;
}

/// Default handler: logs the attempt and reports that checkout is not wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredCheckout;

#[async_trait]
impl CheckoutHandler for UnconfiguredCheckout {
  async fn checkout(&self, request: CheckoutRequest) -> anyhow::Result<CheckoutOutcome> {
    event!(
      Level::INFO,
      lines = request.items.len(),
      total = %request.summary.total,
      "Checkout requested but no checkout handler is configured."
    );
    Ok(CheckoutOutcome::NotConfigured)
  }
}

/// Runs `handler`. Handler failures surface as `CartError::Checkout`; the cart is never touched.
#[instrument(
  name = "checkout::submit",
  skip_all,
  fields(lines = request.items.len(), total = %request.summary.total),
  err(Display)
)]
pub async fn submit_checkout(handler: &dyn CheckoutHandler, request: CheckoutRequest) -> CartResult<CheckoutOutcome> {
  let outcome = handler.checkout(request).await.map_err(CartError::from)?;
  event!(Level::DEBUG, ?outcome, "Checkout handler returned.");
  Ok(outcome)
}
