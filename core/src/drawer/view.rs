// trolley/src/drawer/view.rs

use std::fmt;

use super::CartDrawer;
use crate::model::{CartLineItem, LineKey};
use crate::pricing::{format_money, Shipping};
use crate::store::CartSnapshot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
  pub label: String,
  pub href: String,
}

/// One cart row as the drawer shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineView {
  pub key: LineKey,
  pub title: String,
  pub variant_label: Option<String>,
  pub image_ref: String,
  pub unit_price: String,
  pub quantity: u32,
  pub line_total: String,
  /// The decrement control is disabled, not clamped, at quantity 1.
  pub can_decrement: bool,
}

impl LineView {
  fn from_item(item: &CartLineItem) -> Self {
    Self {
      key: item.key(),
      title: item.title.clone(),
      variant_label: item.variant.as_ref().map(|v| format!("Size: {}", v)),
      image_ref: item.image_ref.clone(),
      unit_price: format_money(item.unit_price),
      quantity: item.quantity,
      line_total: format_money(item.line_total()),
      can_decrement: item.quantity > 1,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
  pub subtotal: String,
  pub shipping: String,
  pub total: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawerBody {
  Empty {
    heading: String,
    message: String,
    continue_shopping: Link,
  },
  Lines {
    lines: Vec<LineView>,
    summary: SummaryView,
  },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawerView {
  pub open: bool,
  pub title: String,
  pub body: DrawerBody,
}

impl DrawerView {
  pub fn is_empty(&self) -> bool {
    matches!(self.body, DrawerBody::Empty { .. })
  }

  pub fn lines(&self) -> &[LineView] {
    match &self.body {
      DrawerBody::Lines { lines, .. } => lines,
      DrawerBody::Empty { .. } => &[],
    }
  }

  pub fn summary(&self) -> Option<&SummaryView> {
    match &self.body {
      DrawerBody::Lines { summary, .. } => Some(summary),
      DrawerBody::Empty { .. } => None,
    }
  }
}

impl CartDrawer {
  pub fn view(&self, snapshot: &CartSnapshot<'_>) -> DrawerView {
    let title = format!("Your Cart ({})", snapshot.total_item_count());
    let body = if snapshot.is_empty() {
      DrawerBody::Empty {
        heading: "Your cart is empty".to_string(),
        message: "Looks like you haven't added any items to your cart yet.".to_string(),
        continue_shopping: Link {
          label: "Continue Shopping".to_string(),
          href: self.shop_href.clone(),
        },
      }
    } else {
      let summary = self.summary(snapshot);
      DrawerBody::Lines {
        lines: snapshot.items.iter().map(LineView::from_item).collect(),
        summary: SummaryView {
          subtotal: format_money(summary.subtotal),
          shipping: match summary.shipping {
            Shipping::Free => "Free".to_string(),
            Shipping::Flat(fee) => format_money(fee),
          },
          total: format_money(summary.total),
        },
      }
    };
    DrawerView {
      open: snapshot.drawer_open,
      title,
      body,
    }
  }
}

impl fmt::Display for DrawerView {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "{}", self.title)?;
    writeln!(f, "{}", "-".repeat(40))?;
    match &self.body {
      DrawerBody::Empty {
        heading,
        message,
        continue_shopping,
      } => {
        writeln!(f, "{}", heading)?;
        writeln!(f, "{}", message)?;
        writeln!(f, "[{}] -> {}", continue_shopping.label, continue_shopping.href)?;
      }
      DrawerBody::Lines { lines, summary } => {
        for line in lines {
          writeln!(f, "{}  ({})", line.title, line.key)?;
          if let Some(label) = &line.variant_label {
            writeln!(f, "  {}", label)?;
          }
          let minus = if line.can_decrement { "[-]" } else { "[ ]" };
          writeln!(
            f,
            "  {} x {} {} [+]  {}",
            line.unit_price, minus, line.quantity, line.line_total
          )?;
        }
        writeln!(f, "{}", "-".repeat(40))?;
        writeln!(f, "Subtotal: {}", summary.subtotal)?;
        writeln!(f, "Shipping: {}", summary.shipping)?;
        writeln!(f, "Total:    {}", summary.total)?;
        writeln!(f, "[Checkout]  [Clear Cart]")?;
      }
    }
    Ok(())
  }
}

/// The header cart button: a count badge, hidden when the cart is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartBadge {
  pub count: Option<u64>,
}

impl CartBadge {
  pub fn from_snapshot(snapshot: &CartSnapshot<'_>) -> Self {
    let total = snapshot.total_item_count();
    Self {
      count: (total > 0).then_some(total),
    }
  }
}

impl fmt::Display for CartBadge {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.count {
      Some(n) => write!(f, "Cart ({})", n),
      None => f.write_str("Cart"),
    }
  }
}
