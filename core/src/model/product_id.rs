// trolley/src/model/product_id.rs

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Catalog key of a product.
///
/// Catalogs key products either by integer or by string; both shapes are
/// kept as-is so that the persisted cart matches the catalog it was built from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
  Numeric(u64),
  Text(String),
}

impl fmt::Display for ProductId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ProductId::Numeric(n) => f.pad(&n.to_string()),
      ProductId::Text(s) => f.pad(s),
    }
  }
}

impl FromStr for ProductId {
  type Err = Infallible;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Ok(match s.parse::<u64>() {
      Ok(n) => ProductId::Numeric(n),
      Err(_) => ProductId::Text(s.to_string()),
    })
  }
}

impl From<u64> for ProductId {
  fn from(n: u64) -> Self {
    ProductId::Numeric(n)
  }
}

impl From<&str> for ProductId {
  fn from(s: &str) -> Self {
    ProductId::Text(s.to_string())
  }
}

impl From<String> for ProductId {
  fn from(s: String) -> Self {
    ProductId::Text(s)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_integers_as_numeric_and_everything_else_as_text() {
    assert_eq!("42".parse::<ProductId>().unwrap(), ProductId::Numeric(42));
    assert_eq!("tee-01".parse::<ProductId>().unwrap(), ProductId::Text("tee-01".into()));
    assert_eq!("-3".parse::<ProductId>().unwrap(), ProductId::Text("-3".into()));
  }

  #[test]
  fn json_shape_is_a_bare_number_or_string() {
    assert_eq!(serde_json::to_string(&ProductId::Numeric(7)).unwrap(), "7");
    assert_eq!(serde_json::to_string(&ProductId::from("sku-7")).unwrap(), "\"sku-7\"");
    let back: ProductId = serde_json::from_str("\"sku-7\"").unwrap();
    assert_eq!(back, ProductId::from("sku-7"));
  }

  #[test]
  fn numeric_and_text_ids_never_compare_equal() {
    assert_ne!(ProductId::Numeric(1), ProductId::from("1"));
  }
}
