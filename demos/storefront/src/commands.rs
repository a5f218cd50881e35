// demos/storefront/src/commands.rs

//! One handler per subcommand. Each returns the text to print.

use std::fmt::Write as _;
use tracing::{info, instrument, warn};
use trolley::{
  format_money, submit_checkout, CartBadge, CheckoutHandler, CheckoutOutcome, DrawerAction, Product, ProductId,
  ProductSelection,
};

use crate::cli::{AddArgs, CatalogArgs, Commands, LineArgs, QuantityArgs};
use crate::errors::Result as AppResult;
use crate::state::AppState;

pub async fn dispatch(state: &AppState, command: Commands, checkout: &dyn CheckoutHandler) -> AppResult<String> {
  match command {
    Commands::Catalog(args) => Ok(list_catalog(state, &args)),
    Commands::Product(arg) => show_product(state, &arg.id),
    Commands::Add(args) => add_to_cart(state, &args),
    Commands::Remove(args) => Ok(remove_from_cart(state, &args)),
    Commands::Quantity(args) => Ok(set_quantity(state, &args)),
    Commands::Clear => Ok(clear_cart(state)),
    Commands::Show => Ok(show_drawer(state)),
    Commands::Badge => Ok(CartBadge::from_snapshot(&state.cart.read().snapshot()).to_string()),
    Commands::Checkout => checkout_cart(state, checkout).await,
  }
}

fn parse_id(raw: &str) -> ProductId {
  match raw.parse::<ProductId>() {
    Ok(id) => id,
    Err(never) => match never {},
  }
}

fn product_row(out: &mut String, product: &Product) {
  let _ = write!(out, "{:>4}  {:<28} {:>8}  {}", product.id, product.title, format_money(product.price), product.category);
  if product.featured {
    out.push_str("  *featured*");
  }
  if !product.variants.is_empty() {
    let _ = write!(out, "  sizes: {}", product.variants.join("/"));
  }
  out.push('\n');
}

pub fn list_catalog(state: &AppState, args: &CatalogArgs) -> String {
  let mut out = String::new();
  let products = state.catalog.products().iter().filter(|p| {
    args
      .category
      .as_deref()
      .map_or(true, |c| p.category.eq_ignore_ascii_case(c))
      && (!args.featured || p.featured)
  });
  let mut shown = 0;
  for product in products {
    product_row(&mut out, product);
    shown += 1;
  }
  if shown == 0 {
    out.push_str("No products match.\n");
  }
  out
}

pub fn show_product(state: &AppState, raw_id: &str) -> AppResult<String> {
  let product = state.catalog.require(&parse_id(raw_id))?;
  let mut out = String::new();
  let _ = writeln!(out, "{} ({})", product.title, format_money(product.price));
  let _ = writeln!(out, "{}", product.long_description.as_deref().unwrap_or(&product.description));
  if !product.variants.is_empty() {
    let _ = writeln!(out, "Sizes: {}", product.variants.join(", "));
  }
  let _ = writeln!(out, "In stock: {}", product.max_quantity());
  let related = state.catalog.related(&product.id);
  if !related.is_empty() {
    out.push_str("You might also like:\n");
    for p in related {
      product_row(&mut out, p);
    }
  }
  Ok(out)
}

#[instrument(name = "command::add", skip(state), fields(id = %args.id))]
pub fn add_to_cart(state: &AppState, args: &AddArgs) -> AppResult<String> {
  let product = state.catalog.require(&parse_id(&args.id))?;
  let mut selection = ProductSelection::new(product);
  if let Some(variant) = &args.variant {
    selection.select_variant(variant)?;
  }
  selection.set_quantity(args.quantity);
  if selection.quantity() != args.quantity {
    warn!(requested = args.quantity, allowed = selection.quantity(), "Quantity adjusted to stock limits.");
  }

  let line = selection.to_line_item();
  info!(key = %line.key(), quantity = line.quantity, "Adding to cart.");
  let mut cart = state.cart.write();
  cart.add_item(line);
  Ok(state.drawer.view(&cart.snapshot()).to_string())
}

pub fn remove_from_cart(state: &AppState, args: &LineArgs) -> String {
  let id = parse_id(&args.id);
  let mut cart = state.cart.write();
  let before = cart.len();
  cart.remove_item(&id, args.variant.as_deref());
  if cart.len() == before {
    format!("Nothing to remove for {}.\n", trolley::LineKey::new(id, args.variant.as_deref()))
  } else {
    state.drawer.view(&cart.snapshot()).to_string()
  }
}

pub fn set_quantity(state: &AppState, args: &QuantityArgs) -> String {
  let id = parse_id(&args.id);
  let mut cart = state.cart.write();
  if cart.get(&id, args.variant.as_deref()).is_none() {
    return format!("No line for {} in the cart.\n", trolley::LineKey::new(id, args.variant.as_deref()));
  }
  cart.update_quantity(&id, args.variant.as_deref(), args.quantity);
  cart.open_drawer();
  state.drawer.view(&cart.snapshot()).to_string()
}

pub fn clear_cart(state: &AppState) -> String {
  let mut cart = state.cart.write();
  state.drawer.apply(&mut cart, DrawerAction::Clear);
  "Cart cleared.\n".to_string()
}

pub fn show_drawer(state: &AppState) -> String {
  let mut cart = state.cart.write();
  // Showing the drawer is the badge click.
  state.drawer.apply(&mut cart, DrawerAction::Open);
  state.drawer.view(&cart.snapshot()).to_string()
}

pub async fn checkout_cart(state: &AppState, handler: &dyn CheckoutHandler) -> AppResult<String> {
  // The lock is released before the handler runs.
  let request = {
    let cart = state.cart.read();
    state.drawer.checkout_request(&cart.snapshot())?
  };
  let total = request.summary.total;
  let message = match submit_checkout(handler, request).await? {
    CheckoutOutcome::NotConfigured => format!(
      "Checkout is not available yet. Your cart ({}) has been kept.\n",
      format_money(total)
    ),
    CheckoutOutcome::Accepted { reference } => format!("Order {} placed for {}.\n", reference, format_money(total)),
    CheckoutOutcome::Declined { reason } => format!("Checkout declined: {}\n", reason),
  };
  Ok(message)
}
