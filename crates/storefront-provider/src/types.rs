//! Storefront GraphQL response types.
//!
//! ## Shape notes
//!
//! ### Connections
//! Every list comes back as a Relay-style connection:
//! `{ "edges": [{ "node": { ... } }], "pageInfo": { "hasNextPage": true, "endCursor": "..." } }`.
//! Nested connections (variants, images) are requested without `pageInfo`, so
//! `page_info` defaults when absent. Callers use [`Connection::into_nodes`] and
//! never see edges.
//!
//! ### Money
//! `amount` is a decimal **string** (`"12.99"`), not a JSON number. Parsing is
//! left to normalization so a bad amount fails one record, not the whole page.
//!
//! ### Nullable everything
//! Draft or half-configured items may omit fields the storefront usually
//! returns (`title`, `priceRange`, `variants`). Every field here is optional or
//! defaulted; the normalizer decides which absences are fatal.
//!
//! ### Articles looked up by handle
//! `blog(handle:) { articleByHandle(handle:) { ... } }` nests the article under
//! its blog, so the article's own `blog` field may be absent. The client fills
//! it from the parent before handing the record out.

use serde::Deserialize;

/// GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphqlResponse<T> {
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

/// A Relay-style connection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
    #[serde(default)]
    pub page_info: PageInfo,
}

impl<T> Connection<T> {
    /// Drops the edge wrappers and returns the nodes in order.
    #[must_use]
    pub fn into_nodes(self) -> Vec<T> {
        self.edges.into_iter().map(|edge| edge.node).collect()
    }
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self {
            edges: Vec::new(),
            page_info: PageInfo::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

/// `data` of the collection-products query.
#[derive(Debug, Deserialize)]
pub struct CollectionProductsData {
    /// `null` when no collection has the requested handle.
    pub collection: Option<CollectionNode>,
}

#[derive(Debug, Deserialize)]
pub struct CollectionNode {
    pub products: Connection<RawProduct>,
}

/// A product as the storefront returns it.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    /// Global ID, e.g. `"gid://shopify/Product/7982365"`.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub price_range: Option<RawPriceRange>,
    #[serde(default)]
    pub featured_image: Option<RawImage>,
    #[serde(default)]
    pub images: Connection<RawImage>,
    /// Draft products can come back with zero variants.
    #[serde(default)]
    pub variants: Connection<RawVariant>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPriceRange {
    #[serde(default)]
    pub min_variant_price: Option<RawMoney>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVariant {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub available_for_sale: Option<bool>,
    #[serde(default)]
    pub price: Option<RawMoney>,
}

/// A money value. `amount` is a decimal string such as `"12.99"`.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMoney {
    pub amount: String,
    #[serde(default)]
    pub currency_code: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawImage {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub alt_text: Option<String>,
}

// ---------------------------------------------------------------------------
// Articles
// ---------------------------------------------------------------------------

/// `data` of the article-list query.
#[derive(Debug, Deserialize)]
pub struct ArticlesData {
    pub articles: Connection<RawArticle>,
}

/// `data` of the article-by-handle query.
#[derive(Debug, Deserialize)]
pub struct BlogArticleData {
    /// `null` when no blog has the requested handle.
    pub blog: Option<BlogNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogNode {
    pub handle: String,
    #[serde(default)]
    pub title: Option<String>,
    /// `null` when the blog has no article with the requested handle.
    #[serde(default)]
    pub article_by_handle: Option<RawArticle>,
}

/// An article as the storefront returns it.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArticle {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub handle: Option<String>,
    /// ISO 8601 timestamp, e.g. `"2025-03-04T09:30:00Z"`.
    #[serde(default)]
    pub published_at: Option<String>,
    /// Editor-written plain-text excerpt. Often `null` or `""`.
    #[serde(default)]
    pub excerpt: Option<String>,
    /// Unsanitized article body.
    #[serde(default)]
    pub content_html: Option<String>,
    #[serde(default, rename = "authorV2")]
    pub author: Option<RawAuthor>,
    #[serde(default)]
    pub image: Option<RawImage>,
    #[serde(default)]
    pub blog: Option<RawBlogRef>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawAuthor {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawBlogRef {
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}
