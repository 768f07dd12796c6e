use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::catalog::Catalog;
use crate::config::CatalogConfig;
use crate::domain::product::Product;
use crate::errors::DomainError;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog file was not found: `{0}`")]
    MissingFile(PathBuf),
    #[error("could not read catalog file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse catalog file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("catalog file `{path}` is invalid: {source}")]
    Invalid { path: PathBuf, source: DomainError },
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    products: Vec<Product>,
}

impl Catalog {
    /// Loads a TOML catalog with one `[[products]]` table per product.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        if !path.exists() {
            return Err(CatalogError::MissingFile(path.to_path_buf()));
        }

        let raw = fs::read_to_string(path)
            .map_err(|source| CatalogError::ReadFile { path: path.to_path_buf(), source })?;
        let file = toml::from_str::<CatalogFile>(&raw)
            .map_err(|source| CatalogError::ParseFile { path: path.to_path_buf(), source })?;

        Catalog::new(file.products)
            .map_err(|source| CatalogError::Invalid { path: path.to_path_buf(), source })
    }
}

pub fn load_catalog(config: &CatalogConfig) -> Result<Catalog, CatalogError> {
    let (catalog, source) = match &config.path {
        Some(path) => (Catalog::from_path(path)?, path.display().to_string()),
        None => (Catalog::demo(), "builtin".to_string()),
    };

    info!(
        event_name = "catalog.loaded",
        catalog_source = %source,
        product_count = catalog.len(),
        "product catalog loaded"
    );
    Ok(catalog)
}
