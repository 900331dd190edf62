//! Capability contract for the remote content provider.
//!
//! Controllers depend on [`ContentProvider`], never on a concrete client, so
//! tests can substitute an in-memory provider and the transport stays
//! swappable.

use std::future::Future;

use crate::error::ProviderError;
use crate::types::{RawArticle, RawProduct};

/// Read-only access to a storefront's products and articles.
///
/// Implementations return provider-native records. Normalization happens in
/// [`crate::normalize`].
pub trait ContentProvider: Send + Sync {
    /// Fetches up to `limit` products from the collection with handle
    /// `collection_handle`, in the collection's own order.
    ///
    /// An unknown collection yields an empty list.
    fn fetch_products_by_collection(
        &self,
        collection_handle: &str,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<RawProduct>, ProviderError>> + Send;

    /// Fetches up to `limit` of the most recently published articles across
    /// all blogs.
    fn fetch_articles(
        &self,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<RawArticle>, ProviderError>> + Send;

    /// Looks up one article. `Ok(None)` means the provider answered and has no
    /// such blog or article.
    fn fetch_article_by_handle(
        &self,
        blog_handle: &str,
        article_handle: &str,
    ) -> impl Future<Output = Result<Option<RawArticle>, ProviderError>> + Send;
}
