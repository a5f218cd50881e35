// trolley/src/store/events.rs

//! Change notification for views layered over the store.

use crate::model::CartLineItem;

/// What changed. Listeners are called synchronously after the change is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartEvent {
  /// The line items changed (added, merged, removed, re-quantified, cleared).
  ItemsChanged,
  /// The drawer was opened or closed.
  DrawerChanged { open: bool },
}

/// Borrowed view of the store state handed to listeners and renderers.
#[derive(Debug, Clone, Copy)]
pub struct CartSnapshot<'a> {
  pub items: &'a [CartLineItem],
  pub drawer_open: bool,
}

impl CartSnapshot<'_> {
  pub fn total_item_count(&self) -> u64 {
    self.items.iter().map(|i| u64::from(i.quantity)).sum()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }
}

pub type Listener = Box<dyn Fn(&CartEvent, &CartSnapshot<'_>) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub(crate) struct Listeners {
  next_id: u64,
  entries: Vec<(SubscriptionId, Listener)>,
}

impl Listeners {
  pub(crate) fn add(&mut self, listener: Listener) -> SubscriptionId {
    let id = SubscriptionId(self.next_id);
    self.next_id += 1;
    self.entries.push((id, listener));
    id
  }

  pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
    let before = self.entries.len();
    self.entries.retain(|(existing, _)| *existing != id);
    self.entries.len() != before
  }

  pub(crate) fn notify(&self, event: &CartEvent, snapshot: &CartSnapshot<'_>) {
    for (_, listener) in &self.entries {
      listener(event, snapshot);
    }
  }

  pub(crate) fn len(&self) -> usize {
    self.entries.len()
  }
}

impl std::fmt::Debug for Listeners {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Listeners").field("count", &self.entries.len()).finish()
  }
}
