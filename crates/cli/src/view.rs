//! Text rendering for the storefront views.
//!
//! The wording keeps the conventions browser tests were written against:
//! the cart badge carries the line count, each cart line shows `x {quantity}`,
//! the total is a plain two-place decimal and the empty cart message
//! contains "empty".

use std::sync::Arc;

use rust_decimal::{Decimal, RoundingStrategy};
use storefront_core::{CartPricing, CartSnapshot, Product};

pub const ADD_BUTTON: &str = "[Add to Cart]";
pub const ADDED_BUTTON: &str = "[✓ Added to Cart]";
pub const EMPTY_CART: &str = "Your cart is empty. Continue shopping to add products.";

/// Rounds half away from zero to two places before formatting.
pub fn money(amount: Decimal, currency: &str) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2} {currency}")
}

pub fn cart_badge(count: usize) -> String {
    format!("🛒 Cart ({count})")
}

pub fn product_card(product: &Product, currency: &str) -> String {
    format!(
        "#{} {} {}  {}",
        product.id,
        product.image,
        product.name,
        money(product.price, currency)
    )
}

pub fn product_list(products: &[Arc<Product>], badge_count: usize, currency: &str) -> String {
    let mut lines = vec![cart_badge(badge_count), format!("Products ({}):", products.len())];
    lines.extend(products.iter().map(|product| format!("  {}", product_card(product, currency))));
    lines.join("\n")
}

pub fn search_results(query: Option<&str>, results: &[Arc<Product>], currency: &str) -> String {
    let heading = match query {
        Some(query) if !query.is_empty() => format!("Results for \"{query}\" ({}):", results.len()),
        _ => format!("All products ({}):", results.len()),
    };

    if results.is_empty() {
        return format!("{heading}\n  No products found.");
    }

    let mut lines = vec![heading];
    lines.extend(results.iter().map(|product| format!("  {}", product_card(product, currency))));
    lines.join("\n")
}

pub fn product_detail(product: &Product, added: bool, currency: &str) -> String {
    let button = if added { ADDED_BUTTON } else { ADD_BUTTON };
    [
        format!("{} {}", product.image, product.name),
        money(product.price, currency),
        product.description.clone(),
        button.to_string(),
    ]
    .join("\n")
}

pub fn cart_page(snapshot: &CartSnapshot, currency: &str) -> String {
    let mut lines = vec![format!("Shopping Cart ({})", snapshot.count())];

    if snapshot.is_empty() {
        lines.push(format!("  {EMPTY_CART}"));
    } else {
        lines.extend(snapshot.lines().iter().enumerate().map(|(index, line)| {
            format!(
                "  {index}. {} {}  {} x {}  = {}",
                line.product.image,
                line.product.name,
                money(line.product.price, currency),
                line.quantity,
                money(line.line_total(), currency)
            )
        }));
    }

    lines.push(total_line(snapshot.total(), currency));
    lines.join("\n")
}

pub fn total_line(total: Decimal, currency: &str) -> String {
    format!("Total: {}", money(total, currency))
}

pub fn pricing_summary(pricing: &CartPricing) -> String {
    let mut lines = pricing
        .steps
        .iter()
        .filter(|step| step.stage == "line")
        .map(|step| format!("  {}  = {}", step.detail, money(step.amount, &pricing.currency)))
        .collect::<Vec<_>>();
    lines.push(format!("{} line(s), {} unit(s)", pricing.line_count, pricing.unit_count));
    lines.push(total_line(pricing.total, &pricing.currency));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rust_decimal::Decimal;
    use storefront_core::{price_cart, CartStore, Catalog, ProductId};

    use super::{
        cart_badge, cart_page, money, pricing_summary, product_detail, total_line, ADDED_BUTTON,
    };

    #[test]
    fn money_always_renders_two_places() {
        assert_eq!(money(Decimal::new(80, 0), "USD"), "80.00 USD");
        assert_eq!(money(Decimal::new(35997, 2), "USD"), "359.97 USD");
    }

    #[test]
    fn money_rounds_extra_places_half_away_from_zero() {
        assert_eq!(money(Decimal::new(10999, 3), "USD"), "11.00 USD");
        assert_eq!(money(Decimal::new(5, 3), "USD"), "0.01 USD");
        assert_eq!(money(Decimal::new(4, 3), "USD"), "0.00 USD");
        assert_eq!(money(Decimal::new(-1005, 3), "EUR"), "-1.01 EUR");
    }

    #[test]
    fn badge_contains_line_count() {
        assert!(cart_badge(2).contains('2'));
    }

    #[test]
    fn cart_page_shows_quantities_and_parseable_total() {
        let catalog = Catalog::demo();
        let mut cart = CartStore::new();
        for id in [1, 1, 2] {
            cart.add_to_cart(catalog.get_by_id(ProductId(id)).expect("demo product"));
        }

        let page = cart_page(&cart.items(), "USD");

        assert!(page.contains("Wireless Headphones  79.99 USD x 2"));
        assert!(page.contains("Smart Watch  199.99 USD x 1"));
        assert!(page.ends_with(&total_line(Decimal::new(35997, 2), "USD")));
    }

    #[test]
    fn pricing_summary_ends_with_total() {
        let catalog = Catalog::demo();
        let mut cart = CartStore::new();
        for id in [3, 3] {
            cart.add_to_cart(catalog.get_by_id(ProductId(id)).expect("demo product"));
        }

        let summary = pricing_summary(&price_cart(&cart.items(), "USD"));

        assert!(summary.contains("Bluetooth Speaker (3) 49.99 x 2  = 99.98 USD"));
        assert!(summary.contains("1 line(s), 2 unit(s)"));
        assert!(summary.ends_with("Total: 99.98 USD"));
    }

    #[test]
    fn empty_cart_page_says_empty() {
        let page = cart_page(&CartStore::new().items(), "USD");
        assert!(page.contains("empty"));
        assert!(page.contains("Total: 0.00 USD"));
    }

    #[test]
    fn detail_switches_button_while_added() {
        let catalog = Catalog::demo();
        let watch = Arc::clone(catalog.get_by_id(ProductId(2)).expect("demo product"));

        assert!(product_detail(&watch, true, "USD").ends_with(ADDED_BUTTON));
        assert!(product_detail(&watch, false, "USD").ends_with("[Add to Cart]"));
    }
}
