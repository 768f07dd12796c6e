use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::product::{Product, ProductId};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CartLine {
    pub product: Arc<Product>,
    pub quantity: u32,
}

impl CartLine {
    pub fn new(product: Arc<Product>) -> Self {
        Self { product, quantity: 1 }
    }

    pub fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Saturates at `Decimal::MAX` for products that bypassed validation.
    pub fn line_total(&self) -> Decimal {
        self.product.price.saturating_mul(Decimal::from(self.quantity))
    }
}

/// Owned copy of the cart lines at one point in time.
///
/// Products stay shared behind `Arc`; quantities and ordering are copied, so a
/// holder never observes later cart mutation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CartSnapshot {
    lines: Vec<CartLine>,
}

impl CartSnapshot {
    pub fn new(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines, not the sum of quantities.
    pub fn count(&self) -> usize {
        self.lines.len()
    }

    pub fn quantity_total(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn total(&self) -> Decimal {
        cart_total(&self.lines)
    }

    pub fn line_for(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id() == product_id)
    }
}

pub fn cart_total(lines: &[CartLine]) -> Decimal {
    lines.iter().map(CartLine::line_total).fold(Decimal::ZERO, Decimal::saturating_add)
}
