use rust_decimal::Decimal;

use crate::domain::product::{Product, ProductId};

/// Built-in storefront products used when no catalog file is configured.
const DEMO_PRODUCTS: &[DemoProduct] = &[
    DemoProduct {
        id: 1,
        name: "Wireless Headphones",
        price_cents: 7_999,
        description: "High-quality wireless headphones with noise cancellation and 30-hour battery life. Perfect for music lovers and commuters.",
        image: "🎧",
    },
    DemoProduct {
        id: 2,
        name: "Smart Watch",
        price_cents: 19_999,
        description: "Stay connected with this feature-packed smartwatch. Track your fitness, receive notifications, and monitor your health.",
        image: "⌚",
    },
    DemoProduct {
        id: 3,
        name: "Bluetooth Speaker",
        price_cents: 4_999,
        description: "Portable Bluetooth speaker with amazing sound quality and 12-hour battery. Waterproof design for outdoor adventures.",
        image: "🔊",
    },
];

struct DemoProduct {
    id: u32,
    name: &'static str,
    price_cents: i64,
    description: &'static str,
    image: &'static str,
}

pub fn products() -> Vec<Product> {
    DEMO_PRODUCTS
        .iter()
        .map(|demo| Product {
            id: ProductId(demo.id),
            name: demo.name.to_string(),
            price: Decimal::new(demo.price_cents, 2),
            description: demo.description.to_string(),
            image: demo.image.to_string(),
        })
        .collect()
}
