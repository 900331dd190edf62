//! `ContentProvider` implementation for `StorefrontClient`.

use serde_json::json;

use crate::error::ProviderError;
use crate::pagination::{next_cursor, page_size};
use crate::provider::ContentProvider;
use crate::queries;
use crate::types::{
    ArticlesData, BlogArticleData, CollectionProductsData, RawArticle, RawBlogRef, RawProduct,
};

use super::{StorefrontClient, MAX_PAGES};

impl StorefrontClient {
    /// Fetches up to `limit` products from a collection, following cursors
    /// until the limit is reached or the connection is exhausted.
    ///
    /// All-or-nothing: a failure on any page discards earlier pages.
    ///
    /// # Errors
    ///
    /// Propagates any error from the underlying request. Returns
    /// [`ProviderError::PaginationLimit`] past [`MAX_PAGES`].
    pub async fn collection_products(
        &self,
        collection_handle: &str,
        limit: u32,
    ) -> Result<Vec<RawProduct>, ProviderError> {
        const OPERATION: &str = "CollectionProducts";

        let mut products: Vec<RawProduct> = Vec::new();
        let mut cursor: Option<String> = None;
        let mut page_count = 0usize;

        while remaining(limit, products.len()) > 0 {
            page_count += 1;
            if page_count > MAX_PAGES {
                return Err(ProviderError::PaginationLimit {
                    operation: OPERATION,
                    max_pages: MAX_PAGES,
                });
            }

            let variables = json!({
                "handle": collection_handle,
                "first": page_size(remaining(limit, products.len())),
                "after": cursor,
            });
            let data: CollectionProductsData = self
                .execute(OPERATION, queries::COLLECTION_PRODUCTS, variables)
                .await?;

            let Some(collection) = data.collection else {
                tracing::debug!(collection = collection_handle, "collection not found");
                break;
            };
            let page_info = collection.products.page_info.clone();
            products.extend(collection.products.into_nodes());

            cursor = next_cursor(&page_info);
            if cursor.is_none() {
                break;
            }
        }

        products.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        tracing::debug!(
            collection = collection_handle,
            count = products.len(),
            pages = page_count,
            "fetched collection products"
        );
        Ok(products)
    }

    /// Fetches up to `limit` articles across all blogs, newest first.
    ///
    /// # Errors
    ///
    /// Propagates any error from the underlying request. Returns
    /// [`ProviderError::PaginationLimit`] past [`MAX_PAGES`].
    pub async fn recent_articles(&self, limit: u32) -> Result<Vec<RawArticle>, ProviderError> {
        const OPERATION: &str = "Articles";

        let query = queries::articles();
        let mut articles: Vec<RawArticle> = Vec::new();
        let mut cursor: Option<String> = None;
        let mut page_count = 0usize;

        while remaining(limit, articles.len()) > 0 {
            page_count += 1;
            if page_count > MAX_PAGES {
                return Err(ProviderError::PaginationLimit {
                    operation: OPERATION,
                    max_pages: MAX_PAGES,
                });
            }

            let variables = json!({
                "first": page_size(remaining(limit, articles.len())),
                "after": cursor,
            });
            let data: ArticlesData = self.execute(OPERATION, &query, variables).await?;
            let page_info = data.articles.page_info.clone();
            articles.extend(data.articles.into_nodes());

            cursor = next_cursor(&page_info);
            if cursor.is_none() {
                break;
            }
        }

        articles.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        tracing::debug!(count = articles.len(), pages = page_count, "fetched articles");
        Ok(articles)
    }

    /// Looks up one article by blog and article handle.
    ///
    /// The returned record always carries its blog reference, filled from the
    /// parent blog when the article itself omits it.
    ///
    /// # Errors
    ///
    /// Propagates any error from the underlying request.
    pub async fn article_by_handle(
        &self,
        blog_handle: &str,
        article_handle: &str,
    ) -> Result<Option<RawArticle>, ProviderError> {
        const OPERATION: &str = "ArticleByHandle";

        let variables = json!({
            "blogHandle": blog_handle,
            "articleHandle": article_handle,
        });
        let data: BlogArticleData = self
            .execute(OPERATION, &queries::article_by_handle(), variables)
            .await?;

        let Some(blog) = data.blog else {
            tracing::debug!(blog = blog_handle, "blog not found");
            return Ok(None);
        };
        let Some(mut article) = blog.article_by_handle else {
            tracing::debug!(
                blog = blog_handle,
                article = article_handle,
                "article not found"
            );
            return Ok(None);
        };

        let parent = article.blog.get_or_insert_with(RawBlogRef::default);
        if parent.handle.as_deref().is_none_or(str::is_empty) {
            parent.handle = Some(blog.handle);
        }
        if parent.title.is_none() {
            parent.title = blog.title;
        }
        Ok(Some(article))
    }
}

/// Items still wanted after `collected` have been gathered.
fn remaining(limit: u32, collected: usize) -> u32 {
    let collected = u32::try_from(collected).unwrap_or(u32::MAX);
    limit.saturating_sub(collected)
}

impl ContentProvider for StorefrontClient {
    async fn fetch_products_by_collection(
        &self,
        collection_handle: &str,
        limit: u32,
    ) -> Result<Vec<RawProduct>, ProviderError> {
        self.collection_products(collection_handle, limit).await
    }

    async fn fetch_articles(&self, limit: u32) -> Result<Vec<RawArticle>, ProviderError> {
        self.recent_articles(limit).await
    }

    async fn fetch_article_by_handle(
        &self,
        blog_handle: &str,
        article_handle: &str,
    ) -> Result<Option<RawArticle>, ProviderError> {
        self.article_by_handle(blog_handle, article_handle).await
    }
}
