use thiserror::Error;

use crate::{catalog::CatalogError, config::ConfigError, domain::product::ProductId};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid product {id}: {reason}")]
    InvalidProduct { id: ProductId, reason: String },
    #[error("duplicate product id {0} in catalog")]
    DuplicateProductId(ProductId),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("catalog failure: {0}")]
    Catalog(String),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

impl ApplicationError {
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Domain(_) => "catalog_validation",
            Self::Catalog(_) => "catalog_load",
            Self::Configuration(_) => "config_validation",
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Domain(_) | Self::Catalog(_) => {
                "The product catalog could not be loaded. Check the catalog file and try again."
            }
            Self::Configuration(_) => {
                "The configuration is invalid. Run `storefront config` to inspect it."
            }
        }
    }
}

impl From<CatalogError> for ApplicationError {
    fn from(value: CatalogError) -> Self {
        match value {
            CatalogError::Invalid { source, .. } => Self::Domain(source),
            other => Self::Catalog(other.to_string()),
        }
    }
}

impl From<ConfigError> for ApplicationError {
    fn from(value: ConfigError) -> Self {
        Self::Configuration(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::catalog::CatalogError;
    use crate::config::ConfigError;
    use crate::domain::product::ProductId;
    use crate::errors::{ApplicationError, DomainError};

    #[test]
    fn invalid_catalog_file_maps_to_domain_error() {
        let error = ApplicationError::from(CatalogError::Invalid {
            path: PathBuf::from("catalog.toml"),
            source: DomainError::DuplicateProductId(ProductId(2)),
        });

        assert_eq!(error, ApplicationError::Domain(DomainError::DuplicateProductId(ProductId(2))));
        assert_eq!(error.error_class(), "catalog_validation");
    }

    #[test]
    fn missing_catalog_file_maps_to_catalog_load() {
        let error =
            ApplicationError::from(CatalogError::MissingFile(PathBuf::from("missing.toml")));

        assert_eq!(error.error_class(), "catalog_load");
        assert!(error.to_string().contains("missing.toml"));
    }

    #[test]
    fn configuration_error_has_user_safe_message() {
        let error = ApplicationError::from(ConfigError::Validation(
            "catalog.currency must be a three letter code".to_owned(),
        ));

        assert_eq!(error.error_class(), "config_validation");
        assert_eq!(
            error.user_message(),
            "The configuration is invalid. Run `storefront config` to inspect it."
        );
    }
}
