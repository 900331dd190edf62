pub mod client;
pub mod error;
pub mod normalize;
pub mod pagination;
pub mod provider;
mod queries;
pub mod sanitize;
pub mod types;

pub use client::{storefront_endpoint, StorefrontClient};
pub use error::ProviderError;
pub use normalize::{
    excerpt_fallback, normalize_article, normalize_articles, normalize_product, normalize_products,
};
pub use provider::ContentProvider;
pub use sanitize::{DefaultSanitizer, Sanitizer};
pub use types::{RawArticle, RawProduct};
