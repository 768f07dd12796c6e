use std::sync::Arc;

use serde::Serialize;

use crate::domain::cart::CartSnapshot;
use crate::domain::product::ProductId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CartChange {
    LineAdded { product_id: ProductId },
    QuantityIncremented { product_id: ProductId, quantity: u32 },
    LineRemoved { index: usize, product_id: ProductId },
}

/// Published after every successful mutation. The snapshot is owned by the
/// event and never aliases the store's live state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CartEvent {
    pub change: CartChange,
    pub snapshot: CartSnapshot,
    pub count: usize,
}

pub trait CartListener: Send + Sync {
    fn on_cart_changed(&self, event: &CartEvent);
}

impl<F> CartListener for F
where
    F: Fn(&CartEvent) + Send + Sync,
{
    fn on_cart_changed(&self, event: &CartEvent) {
        self(event)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Default)]
pub(crate) struct ListenerRegistry {
    next_id: u64,
    listeners: Vec<(ListenerId, Arc<dyn CartListener>)>,
}

impl ListenerRegistry {
    pub(crate) fn register(&mut self, listener: Arc<dyn CartListener>) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(registered, _)| *registered != id);
        self.listeners.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub(crate) fn publish(&self, event: &CartEvent) {
        for (_, listener) in &self.listeners {
            listener.on_cart_changed(event);
        }
    }
}
