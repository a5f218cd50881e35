// trolley/src/pricing.rs

//! Shipping policy and order summary.
//!
//! Pricing is a business rule layered over the cart, not part of a line's
//! identity, so the store itself knows nothing about shipping.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::model::CartLineItem;

/// Free shipping strictly above `free_over`, otherwise a flat fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShippingPolicy {
  pub free_over: Decimal,
  pub flat_fee: Decimal,
}

impl Default for ShippingPolicy {
  fn default() -> Self {
    Self {
      free_over: Decimal::new(75, 0),
      flat_fee: Decimal::new(599, 2),
    }
  }
}

impl ShippingPolicy {
  pub fn new(free_over: Decimal, flat_fee: Decimal) -> Self {
    Self { free_over, flat_fee }
  }

  pub fn shipping_for(&self, subtotal: Decimal) -> Shipping {
    if subtotal > self.free_over {
      Shipping::Free
    } else {
      Shipping::Flat(self.flat_fee)
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "amount", rename_all = "lowercase")]
pub enum Shipping {
  Free,
  Flat(Decimal),
}

impl Shipping {
  pub fn amount(&self) -> Decimal {
    match self {
      Shipping::Free => Decimal::ZERO,
      Shipping::Flat(fee) => *fee,
    }
  }

  pub fn is_free(&self) -> bool {
    matches!(self, Shipping::Free)
  }
}

/// Totals derived from a list of lines. Always computed, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartSummary {
  pub item_count: u64,
  pub subtotal: Decimal,
  pub shipping: Shipping,
  pub total: Decimal,
}

impl CartSummary {
  pub fn of(items: &[CartLineItem], policy: &ShippingPolicy) -> Self {
    let item_count = items.iter().map(|i| u64::from(i.quantity)).sum();
    let subtotal = subtotal_of(items);
    let shipping = policy.shipping_for(subtotal);
    Self {
      item_count,
      subtotal,
      shipping,
      total: subtotal.saturating_add(shipping.amount()),
    }
  }
}

/// Σ line totals. Saturates instead of panicking on overflow.
pub fn subtotal_of(items: &[CartLineItem]) -> Decimal {
  items
    .iter()
    .map(CartLineItem::line_total)
    .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// `$12.34`: two decimals, half-cents rounded away from zero.
pub fn format_money(amount: Decimal) -> String {
  let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
  format!("${:.2}", rounded)
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  #[test]
  fn threshold_is_exclusive() {
    let policy = ShippingPolicy::default();
    assert_eq!(policy.shipping_for(dec!(74.99)), Shipping::Flat(dec!(5.99)));
    assert_eq!(policy.shipping_for(dec!(75.00)), Shipping::Flat(dec!(5.99)));
    assert_eq!(policy.shipping_for(dec!(75.01)), Shipping::Free);
  }

  #[test]
  fn total_is_subtotal_plus_shipping() {
    let items = vec![
      CartLineItem::new(1u64, "T-Shirt", dec!(24.99), "/merch/tshirt.jpg", 2),
      CartLineItem::new(6u64, "Stickers", dec!(9.99), "/merch/stickers.jpg", 1),
    ];
    let summary = CartSummary::of(&items, &ShippingPolicy::default());
    assert_eq!(summary.item_count, 3);
    assert_eq!(summary.subtotal, dec!(59.97));
    assert_eq!(summary.total, dec!(65.96));

    let more = vec![CartLineItem::new(4u64, "Raspberry Pi 4 Kit", dec!(69.99), "/merch/raspberry-pi.jpg", 2)];
    let summary = CartSummary::of(&more, &ShippingPolicy::default());
    assert!(summary.shipping.is_free());
    assert_eq!(summary.total, summary.subtotal);
  }

  #[test]
  fn money_formatting() {
    assert_eq!(format_money(dec!(5.99)), "$5.99");
    assert_eq!(format_money(dec!(75)), "$75.00");
    assert_eq!(format_money(dec!(0.125)), "$0.13");
    assert_eq!(format_money(Decimal::ZERO), "$0.00");
  }
}
