use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::cart::CartSnapshot;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingTraceStep {
    pub stage: String,
    pub detail: String,
    pub amount: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartPricing {
    pub currency: String,
    pub line_count: usize,
    pub unit_count: u64,
    pub subtotal: Decimal,
    pub total: Decimal,
    pub steps: Vec<PricingTraceStep>,
}

pub trait PricingEngine: Send + Sync {
    fn price(&self, snapshot: &CartSnapshot, currency: &str) -> CartPricing;
}

/// Sums `price * quantity` per line with no discounts or tax.
#[derive(Default)]
pub struct ListPricingEngine;

impl PricingEngine for ListPricingEngine {
    fn price(&self, snapshot: &CartSnapshot, currency: &str) -> CartPricing {
        price_cart(snapshot, currency)
    }
}

pub fn price_cart(snapshot: &CartSnapshot, currency: &str) -> CartPricing {
    let mut steps = snapshot
        .lines()
        .iter()
        .map(|line| PricingTraceStep {
            stage: "line".to_string(),
            detail: format!(
                "{} ({}) {} x {}",
                line.product.name, line.product.id, line.product.price, line.quantity
            ),
            amount: line.line_total(),
        })
        .collect::<Vec<_>>();

    let subtotal = snapshot.total();
    steps.push(PricingTraceStep {
        stage: "subtotal".to_string(),
        detail: "sum(price * quantity)".to_string(),
        amount: subtotal,
    });

    CartPricing {
        currency: currency.to_string(),
        line_count: snapshot.count(),
        unit_count: snapshot.quantity_total(),
        subtotal,
        total: subtotal,
        steps,
    }
}
