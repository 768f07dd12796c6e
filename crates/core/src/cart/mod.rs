pub mod events;
pub mod pricing;

use std::fmt;
use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::cart::{cart_total, CartLine, CartSnapshot};
use crate::domain::product::Product;

use self::events::{CartChange, CartEvent, CartListener, ListenerId, ListenerRegistry};

/// In-memory cart for one shopping session.
///
/// Lines are kept in first-added order with at most one line per product id.
/// All mutation goes through [`CartStore::add_to_cart`] and
/// [`CartStore::remove_from_cart`]; readers get owned snapshots.
#[derive(Default)]
pub struct CartStore {
    lines: Vec<CartLine>,
    listeners: ListenerRegistry,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<L>(&mut self, listener: L) -> ListenerId
    where
        L: CartListener + 'static,
    {
        self.listeners.register(Arc::new(listener))
    }

    pub fn subscribe_shared(&mut self, listener: Arc<dyn CartListener>) -> ListenerId {
        self.listeners.register(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Adds one unit of `product`, appending a new line on first add. A line
    /// already at `u32::MAX` is left as is and nothing is published.
    pub fn add_to_cart(&mut self, product: &Arc<Product>) -> CartLine {
        let (line, change) =
            match self.lines.iter_mut().find(|line| line.product_id() == product.id) {
                Some(existing) if existing.quantity == u32::MAX => {
                    debug!(
                        event_name = "cart.line.saturated",
                        product_id = %product.id,
                        "cart line quantity is at its maximum"
                    );
                    return existing.clone();
                }
                Some(existing) => {
                    existing.quantity += 1;
                    let change = CartChange::QuantityIncremented {
                        product_id: product.id,
                        quantity: existing.quantity,
                    };
                    (existing.clone(), change)
                }
                None => {
                    let line = CartLine::new(Arc::clone(product));
                    self.lines.push(line.clone());
                    (line, CartChange::LineAdded { product_id: product.id })
                }
            };

        debug!(
            event_name = "cart.line.added",
            product_id = %product.id,
            quantity = line.quantity,
            line_count = self.lines.len(),
            "product added to cart"
        );
        self.publish(change);
        line
    }

    /// Removes the line at `index`. Out-of-range indices leave the cart
    /// untouched and publish nothing.
    pub fn remove_from_cart(&mut self, index: usize) -> Option<CartLine> {
        if index >= self.lines.len() {
            debug!(
                event_name = "cart.line.remove_ignored",
                index,
                line_count = self.lines.len(),
                "remove index out of range"
            );
            return None;
        }

        let removed = self.lines.remove(index);
        debug!(
            event_name = "cart.line.removed",
            index,
            product_id = %removed.product_id(),
            line_count = self.lines.len(),
            "cart line removed"
        );
        self.publish(CartChange::LineRemoved { index, product_id: removed.product_id() });
        Some(removed)
    }

    pub fn get_total(&self) -> Decimal {
        cart_total(&self.lines)
    }

    /// Number of lines. Adding the same product twice does not change it.
    pub fn get_count(&self) -> usize {
        self.lines.len()
    }

    pub fn quantity_total(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn items(&self) -> CartSnapshot {
        CartSnapshot::new(self.lines.clone())
    }

    fn publish(&self, change: CartChange) {
        if self.listeners.is_empty() {
            return;
        }

        let event = CartEvent { change, snapshot: self.items(), count: self.lines.len() };
        self.listeners.publish(&event);
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &self.lines)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
