// trolley/src/drawer/action.rs

use tracing::{event, Level};

use super::CartDrawer;
use crate::model::LineKey;
use crate::store::CartStore;

/// A control in the drawer (or the header cart button) being used.
///
/// Checkout is deliberately absent: it has no built-in behavior, see
/// [`crate::checkout`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawerAction {
  Open,
  Close,
  Toggle,
  Increment(LineKey),
  Decrement(LineKey),
  Remove(LineKey),
  Clear,
}

impl CartDrawer {
  /// Applies `action` to `store`. Returns `false` when the control was
  /// unavailable (decrement at quantity 1, or a row that no longer exists).
  pub fn apply(&self, store: &mut CartStore, action: DrawerAction) -> bool {
    event!(Level::TRACE, ?action, "Drawer action.");
    match action {
      DrawerAction::Open => store.open_drawer(),
      DrawerAction::Close => store.close_drawer(),
      DrawerAction::Toggle => store.toggle_drawer(),
      DrawerAction::Increment(key) => {
        let Some(current) = store.get_by_key(&key).map(|l| l.quantity) else {
          return false;
        };
        store.update_quantity(&key.product_id, key.variant(), i64::from(current) + 1);
      }
      DrawerAction::Decrement(key) => {
        let Some(current) = store.get_by_key(&key).map(|l| l.quantity) else {
          return false;
        };
        if current <= 1 {
          return false;
        }
        store.update_quantity(&key.product_id, key.variant(), i64::from(current) - 1);
      }
      DrawerAction::Remove(key) => {
        if store.get_by_key(&key).is_none() {
          return false;
        }
        store.remove_item(&key.product_id, key.variant());
      }
      DrawerAction::Clear => store.clear(),
    }
    true
  }
}
