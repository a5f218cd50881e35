// demos/storefront/src/cli.rs

//! Command-line interface definitions.

use clap::{Parser, Subcommand};

/// Storefront - browse the club merch store and manage your cart from the terminal.
#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(version, about, long_about = None)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// List products in the catalog
  Catalog(CatalogArgs),

  /// Show one product and its related products
  Product(ProductArg),

  /// Add a product to the cart (opens the drawer)
  Add(AddArgs),

  /// Remove a line from the cart
  Remove(LineArgs),

  /// Set the quantity of a line (values below 1 become 1)
  Quantity(QuantityArgs),

  /// Empty the cart
  Clear,

  /// Show the cart drawer
  Show,

  /// Show the header cart badge
  Badge,

  /// Press the checkout button
  Checkout,
}

#[derive(Parser, Debug)]
pub struct CatalogArgs {
  /// Only products in this category
  #[arg(long)]
  pub category: Option<String>,

  /// Only featured products
  #[arg(long)]
  pub featured: bool,
}

#[derive(Parser, Debug)]
pub struct ProductArg {
  /// Product id
  pub id: String,
}

#[derive(Parser, Debug)]
pub struct AddArgs {
  /// Product id
  pub id: String,

  /// Size or other variant (defaults to the product's first variant)
  #[arg(long)]
  pub variant: Option<String>,

  /// How many to add (bounded by stock)
  #[arg(long, default_value_t = 1)]
  pub quantity: u32,
}

#[derive(Parser, Debug)]
pub struct LineArgs {
  /// Product id
  pub id: String,

  /// Variant of the line
  #[arg(long)]
  pub variant: Option<String>,
}

#[derive(Parser, Debug)]
pub struct QuantityArgs {
  /// Product id
  pub id: String,

  /// New quantity
  #[arg(allow_negative_numbers = true)]
  pub quantity: i64,

  /// Variant of the line
  #[arg(long)]
  pub variant: Option<String>,
}
