pub mod demo;
pub mod loader;

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::product::{Product, ProductId};
use crate::errors::DomainError;

pub use loader::{load_catalog, CatalogError};

/// Read-only product list, built once at startup.
///
/// Products are handed out as `Arc<Product>` so carts share them instead of
/// copying product data.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    products: Vec<Arc<Product>>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Result<Self, DomainError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            product.validate()?;
            if !seen.insert(product.id) {
                return Err(DomainError::DuplicateProductId(product.id));
            }
        }

        Ok(Self { products: products.into_iter().map(Arc::new).collect() })
    }

    pub fn demo() -> Self {
        Self { products: demo::products().into_iter().map(Arc::new).collect() }
    }

    pub fn get_all(&self) -> &[Arc<Product>] {
        &self.products
    }

    pub fn get_by_id(&self, id: ProductId) -> Option<&Arc<Product>> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Case-insensitive substring match on name or description.
    ///
    /// An absent or empty query returns the whole catalog. The query is not
    /// trimmed, so `" "` only matches products containing a space.
    pub fn search(&self, query: Option<&str>) -> Vec<Arc<Product>> {
        let query = match query {
            Some(query) if !query.is_empty() => query.to_lowercase(),
            _ => return self.products.clone(),
        };

        self.products.iter().filter(|product| product.matches(&query)).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
