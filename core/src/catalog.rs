// trolley/src/catalog.rs

//! The product catalog the cart copies line data from.
//!
//! The cart only ever reads `id`, `title`, `price` and `image` from a product;
//! the rest is here for listing pages and the product page's add-to-cart form.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{event, Level};

use crate::error::{CartError, CartResult};
use crate::model::{CartLineItem, ProductId};

const BUILTIN_CATALOG: &str = include_str!("../data/merch.json");

/// Quantity cap for the add-to-cart stepper when a product has no stock figure.
pub const DEFAULT_MAX_QUANTITY: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
  pub id: ProductId,
  pub title: String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub long_description: Option<String>,
  #[serde(with = "rust_decimal::serde::arbitrary_precision")]
  pub price: Decimal,
  pub image: String,
  pub category: String,
  #[serde(default)]
  pub featured: bool,
  #[serde(default)]
  pub tags: Vec<String>,
  #[serde(default)]
  pub variants: Vec<String>,
  #[serde(default)]
  pub stock: Option<u32>,
  #[serde(default)]
  pub related_products: Vec<ProductId>,
}

impl Product {
  pub fn has_variant(&self, variant: &str) -> bool {
    self.variants.iter().any(|v| v == variant)
  }

  /// Copies the catalog fields a cart line needs. Later catalog edits do not reach the line.
  pub fn line_item(&self, variant: Option<String>, quantity: u32) -> CartLineItem {
    CartLineItem {
      product_id: self.id.clone(),
      title: self.title.clone(),
      unit_price: self.price,
      image_ref: self.image.clone(),
      quantity,
      variant,
    }
  }

  pub fn max_quantity(&self) -> u32 {
    self.stock.unwrap_or(DEFAULT_MAX_QUANTITY).max(1)
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
  products: Vec<Product>,
}

impl Catalog {
  pub fn new(products: Vec<Product>) -> Self {
    Self { products }
  }

  /// The club's merch line, embedded in the crate.
  pub fn builtin() -> CartResult<Self> {
    Self::from_json(BUILTIN_CATALOG)
  }

  pub fn from_json(json: &str) -> CartResult<Self> {
    let products: Vec<Product> = serde_json::from_str(json)?;
    event!(Level::DEBUG, products = products.len(), "Catalog parsed.");
    Ok(Self::new(products))
  }

  pub fn from_path(path: impl AsRef<Path>) -> CartResult<Self> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| CartError::Storage {
      key: path.display().to_string(),
      source,
    })?;
    Self::from_json(&json)
  }

  pub fn products(&self) -> &[Product] {
    &self.products
  }

  pub fn get(&self, id: &ProductId) -> Option<&Product> {
    self.products.iter().find(|p| &p.id == id)
  }

  pub fn require(&self, id: &ProductId) -> CartResult<&Product> {
    self.get(id).ok_or_else(|| CartError::UnknownProduct(id.clone()))
  }

  pub fn featured(&self) -> impl Iterator<Item = &Product> {
    self.products.iter().filter(|p| p.featured)
  }

  /// Case-insensitive category match.
  pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Product> + 'a {
    self
      .products
      .iter()
      .filter(move |p| p.category.eq_ignore_ascii_case(category))
  }

  /// Distinct categories in first-seen order.
  pub fn categories(&self) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for p in &self.products {
      if !seen.contains(&p.category.as_str()) {
        seen.push(&p.category);
      }
    }
    seen
  }

  /// Related products that exist in this catalog. Dangling references are skipped.
  pub fn related(&self, id: &ProductId) -> Vec<&Product> {
    self
      .get(id)
      .map(|p| p.related_products.iter().filter_map(|r| self.get(r)).collect())
      .unwrap_or_default()
  }
}

/// The product page's add-to-cart form.
///
/// The size defaults to the first listed variant and the quantity stepper is
/// bounded to `1..=stock`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSelection<'a> {
  product: &'a Product,
  variant: Option<String>,
  quantity: u32,
}

impl<'a> ProductSelection<'a> {
  pub fn new(product: &'a Product) -> Self {
    Self {
      product,
      variant: product.variants.first().cloned(),
      quantity: 1,
    }
  }

  pub fn product(&self) -> &Product {
    self.product
  }

  pub fn variant(&self) -> Option<&str> {
    self.variant.as_deref()
  }

  pub fn quantity(&self) -> u32 {
    self.quantity
  }

  pub fn select_variant(&mut self, variant: &str) -> CartResult<()> {
    if !self.product.has_variant(variant) {
      return Err(CartError::UnknownVariant {
        product_id: self.product.id.clone(),
        variant: variant.to_string(),
      });
    }
    self.variant = Some(variant.to_string());
    Ok(())
  }

  /// Steps the quantity by `delta`; steps that would leave `1..=max` are ignored.
  pub fn step_quantity(&mut self, delta: i64) -> bool {
    let next = i64::from(self.quantity) + delta;
    if next >= 1 && next <= i64::from(self.product.max_quantity()) {
      self.quantity = next as u32;
      true
    } else {
      false
    }
  }

  /// Sets the quantity, clamped into `1..=max`.
  pub fn set_quantity(&mut self, quantity: u32) {
    self.quantity = quantity.clamp(1, self.product.max_quantity());
  }

  pub fn to_line_item(&self) -> CartLineItem {
    self.product.line_item(self.variant.clone(), self.quantity)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  #[test]
  fn builtin_catalog_parses() {
    let catalog = Catalog::builtin().unwrap();
    assert_eq!(catalog.products().len(), 6);
    let tee = catalog.get(&ProductId::Numeric(1)).unwrap();
    assert_eq!(tee.price, dec!(24.99));
    assert_eq!(tee.variants.len(), 5);
    assert_eq!(catalog.categories(), vec!["Clothing", "Electronics", "Accessories"]);
    assert_eq!(catalog.featured().count(), 2);
  }

  #[test]
  fn related_skips_dangling_ids() {
    let json = r#"[
      {"id":"a","title":"A","price":1,"image":"a.png","category":"X","relatedProducts":["b","zzz"]},
      {"id":"b","title":"B","price":2.5,"image":"b.png","category":"x"}
    ]"#;
    let catalog = Catalog::from_json(json).unwrap();
    let related = catalog.related(&ProductId::from("a"));
    assert_eq!(related.len(), 1);
    assert_eq!(related[0].title, "B");
    assert_eq!(catalog.in_category("X").count(), 2);
    assert!(catalog.related(&ProductId::from("nope")).is_empty());
  }

  #[test]
  fn selection_defaults_and_bounds() {
    let catalog = Catalog::builtin().unwrap();
    let pi = catalog.get(&ProductId::Numeric(4)).unwrap();
    let mut sel = ProductSelection::new(pi);
    assert_eq!(sel.variant(), None);
    assert!(!sel.step_quantity(-1));
    for _ in 0..20 {
      sel.step_quantity(1);
    }
    assert_eq!(sel.quantity(), 8);

    let tee = catalog.get(&ProductId::Numeric(1)).unwrap();
    let mut sel = ProductSelection::new(tee);
    assert_eq!(sel.variant(), Some("S"));
    sel.select_variant("XL").unwrap();
    assert!(matches!(sel.select_variant("XS"), Err(CartError::UnknownVariant { .. })));
    assert_eq!(sel.variant(), Some("XL"));
    sel.set_quantity(0);
    assert_eq!(sel.quantity(), 1);
    let line = sel.to_line_item();
    assert_eq!(line.variant.as_deref(), Some("XL"));
    assert_eq!(line.unit_price, dec!(24.99));
    assert_eq!(line.image_ref, "/merch/tshirt.jpg");
  }

  #[test]
  fn unknown_stock_caps_at_default() {
    let json = r#"[{"id":9,"title":"Mug","price":8,"image":"m.png","category":"Home"}]"#;
    let catalog = Catalog::from_json(json).unwrap();
    assert_eq!(catalog.get(&ProductId::Numeric(9)).unwrap().max_quantity(), DEFAULT_MAX_QUANTITY);
  }
}
