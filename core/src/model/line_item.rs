// trolley/src/model/line_item.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ProductId;

/// Identity of a line: two additions with the same key merge into one row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
  pub product_id: ProductId,
  pub variant: Option<String>,
}

impl LineKey {
  pub fn new(product_id: impl Into<ProductId>, variant: Option<&str>) -> Self {
    Self {
      product_id: product_id.into(),
      variant: variant.map(str::to_string),
    }
  }

  pub fn variant(&self) -> Option<&str> {
    self.variant.as_deref()
  }
}

impl fmt::Display for LineKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.variant {
      Some(v) => write!(f, "{}-{}", self.product_id, v),
      None => write!(f, "{}", self.product_id),
    }
  }
}

/// One row of the cart.
///
/// `title`, `unit_price` and `image_ref` are copied from the catalog when the
/// line is added and are never re-fetched. The serialized field names (`id`,
/// `price`, `image`) are the persisted layout read back on hydration. `price`
/// is written as a bare JSON number carrying every digit of the decimal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
  #[serde(rename = "id")]
  pub product_id: ProductId,
  pub title: String,
  #[serde(rename = "price", with = "rust_decimal::serde::arbitrary_precision")]
  pub unit_price: Decimal,
  #[serde(rename = "image")]
  pub image_ref: String,
  pub quantity: u32,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub variant: Option<String>,
}

impl CartLineItem {
  pub fn new(
    product_id: impl Into<ProductId>,
    title: impl Into<String>,
    unit_price: Decimal,
    image_ref: impl Into<String>,
    quantity: u32,
  ) -> Self {
    Self {
      product_id: product_id.into(),
      title: title.into(),
      unit_price,
      image_ref: image_ref.into(),
      quantity,
      variant: None,
    }
  }

  pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
    self.variant = Some(variant.into());
    self
  }

  pub fn key(&self) -> LineKey {
    LineKey {
      product_id: self.product_id.clone(),
      variant: self.variant.clone(),
    }
  }

  pub fn matches(&self, product_id: &ProductId, variant: Option<&str>) -> bool {
    &self.product_id == product_id && self.variant.as_deref() == variant
  }

  /// `unit_price × quantity`, saturating at the bounds of `Decimal`.
  pub fn line_total(&self) -> Decimal {
    self.unit_price.saturating_mul(Decimal::from(self.quantity))
  }
}
