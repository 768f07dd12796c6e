use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use storefront_core::config::AppConfig;
use storefront_core::{
    CartEvent, CartListener, CartStore, Catalog, ListPricingEngine, PricingEngine, ProductId,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::view;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Products,
    Search(Option<String>),
    Show(ProductId),
    Add(ProductId),
    Remove(usize),
    Cart,
    Total,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionParseError {
    #[error("empty action")]
    Empty,
    #[error("unknown action `{0}` (expected products|search|show|add|remove|cart|total|quit)")]
    Unknown(String),
    #[error("`{action}` requires a {argument} argument")]
    MissingArgument { action: &'static str, argument: &'static str },
    #[error("`{action}` expects a non-negative integer {argument}, got `{value}`")]
    InvalidNumber { action: &'static str, argument: &'static str, value: String },
}

impl FromStr for Action {
    type Err = ActionParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_ascii_lowercase().as_str() {
            "" => Err(ActionParseError::Empty),
            "products" | "home" => Ok(Self::Products),
            "search" => Ok(Self::Search((!rest.is_empty()).then(|| rest.to_string()))),
            "show" => parse_number("show", "product id", rest).map(|id| Self::Show(ProductId(id))),
            "add" => parse_number("add", "product id", rest).map(|id| Self::Add(ProductId(id))),
            "remove" => parse_number("remove", "line index", rest).map(Self::Remove),
            "cart" => Ok(Self::Cart),
            "total" => Ok(Self::Total),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(ActionParseError::Unknown(other.to_string())),
        }
    }
}

fn parse_number<T: FromStr>(
    action: &'static str,
    argument: &'static str,
    value: &str,
) -> Result<T, ActionParseError> {
    if value.is_empty() {
        return Err(ActionParseError::MissingArgument { action, argument });
    }

    value.parse::<T>().map_err(|_| ActionParseError::InvalidNumber {
        action,
        argument,
        value: value.to_string(),
    })
}

/// Tracks the cart line count for the header badge from published cart events.
#[derive(Debug, Default)]
pub struct CartBadge {
    count: AtomicUsize,
}

impl CartBadge {
    pub fn count(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }
}

impl CartListener for CartBadge {
    fn on_cart_changed(&self, event: &CartEvent) {
        self.count.store(event.count, Ordering::Relaxed);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct AddedIndicator {
    product_id: ProductId,
    until: Instant,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepKind {
    Applied,
    NotFound,
    Ignored,
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    pub kind: StepKind,
    pub output: String,
}

impl Step {
    fn applied(output: String) -> Self {
        Self { kind: StepKind::Applied, output }
    }
}

/// One shopping session: a catalog, the session's own cart, and UI-only state.
///
/// The "added" indicator lives here rather than in the cart. Its expiry is
/// checked against the `now` passed to [`ShopSession::apply`].
pub struct ShopSession {
    catalog: Catalog,
    cart: CartStore,
    badge: Arc<CartBadge>,
    pricing: Box<dyn PricingEngine>,
    currency: String,
    added_window: Duration,
    added: Option<AddedIndicator>,
}

impl ShopSession {
    pub fn new(config: &AppConfig, catalog: Catalog) -> Self {
        let badge = Arc::new(CartBadge::default());
        let mut cart = CartStore::new();
        cart.subscribe_shared(badge.clone());

        info!(
            event_name = "shop.session.started",
            product_count = catalog.len(),
            currency = %config.catalog.currency,
            "shopping session started"
        );

        Self {
            catalog,
            cart,
            badge,
            pricing: Box::new(ListPricingEngine),
            currency: config.catalog.currency.clone(),
            added_window: Duration::from_millis(config.session.added_indicator_ms),
            added: None,
        }
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn badge_count(&self) -> usize {
        self.badge.count()
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn is_added(&self, product_id: ProductId, now: Instant) -> bool {
        self.added.is_some_and(|added| added.product_id == product_id && now < added.until)
    }

    pub fn apply(&mut self, action: Action, now: Instant) -> Step {
        debug!(event_name = "shop.action", action = ?action, "applying shop action");

        match action {
            Action::Products => Step::applied(view::product_list(
                self.catalog.get_all(),
                self.badge_count(),
                &self.currency,
            )),
            Action::Search(query) => {
                let results = self.catalog.search(query.as_deref());
                Step::applied(view::search_results(query.as_deref(), &results, &self.currency))
            }
            Action::Show(id) => match self.catalog.get_by_id(id) {
                Some(product) => Step::applied(view::product_detail(
                    product,
                    self.is_added(id, now),
                    &self.currency,
                )),
                None => self.not_found(id),
            },
            Action::Add(id) => {
                let Some(product) = self.catalog.get_by_id(id) else {
                    return self.not_found(id);
                };
                let product = Arc::clone(product);
                self.cart.add_to_cart(&product);
                self.added = Some(AddedIndicator { product_id: id, until: now + self.added_window });

                Step::applied(format!(
                    "{}\n{}",
                    view::cart_badge(self.badge_count()),
                    view::product_detail(&product, true, &self.currency)
                ))
            }
            Action::Remove(index) => match self.cart.remove_from_cart(index) {
                Some(_) => Step::applied(view::cart_page(&self.cart.items(), &self.currency)),
                None => Step {
                    kind: StepKind::Ignored,
                    output: format!(
                        "no cart line at position {index}\n{}",
                        view::cart_page(&self.cart.items(), &self.currency)
                    ),
                },
            },
            Action::Cart => Step::applied(view::cart_page(&self.cart.items(), &self.currency)),
            Action::Total => {
                let pricing = self.pricing.price(&self.cart.items(), &self.currency);
                Step::applied(view::pricing_summary(&pricing))
            }
            Action::Quit => Step { kind: StepKind::Quit, output: "bye".to_string() },
        }
    }

    fn not_found(&self, id: ProductId) -> Step {
        Step {
            kind: StepKind::NotFound,
            output: format!(
                "product {id} was not found; back to the catalog\n{}",
                view::product_list(self.catalog.get_all(), self.badge_count(), &self.currency)
            ),
        }
    }
}
