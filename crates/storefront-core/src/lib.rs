pub mod app_config;
pub mod articles;
pub mod catalog;
pub mod config;
pub mod filter;
pub mod products;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use articles::{newest_first, Article};
pub use catalog::{derive_catalog_view, derive_view, CatalogView};
pub use config::{load_app_config, load_app_config_from_env};
pub use filter::{FilterError, FilterSpec, PriceRange, SortKey};
pub use products::{CatalogSnapshot, Product, ProductImage};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
