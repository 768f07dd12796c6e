pub mod cart;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;

pub use cart::events::{CartChange, CartEvent, CartListener, ListenerId};
pub use cart::pricing::{price_cart, CartPricing, ListPricingEngine, PricingEngine};
pub use cart::CartStore;
pub use catalog::{load_catalog, Catalog, CatalogError};
pub use domain::cart::{CartLine, CartSnapshot};
pub use domain::product::{Product, ProductId};
pub use errors::{ApplicationError, DomainError};
