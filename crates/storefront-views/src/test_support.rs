//! In-memory `ContentProvider` for controller tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use storefront_provider::types::{
    Connection, Edge, PageInfo, RawBlogRef, RawMoney, RawPriceRange, RawVariant,
};
use storefront_provider::{ContentProvider, ProviderError, RawArticle, RawProduct};

#[derive(Default)]
pub(crate) struct FakeProvider {
    products: Vec<RawProduct>,
    articles: Vec<RawArticle>,
    by_handle: HashMap<(String, String), RawArticle>,
    fail: bool,
    product_calls: AtomicUsize,
    article_calls: AtomicUsize,
}

impl FakeProvider {
    pub(crate) fn with_products(products: Vec<RawProduct>) -> Self {
        Self {
            products,
            ..Self::default()
        }
    }

    pub(crate) fn with_articles(articles: Vec<RawArticle>) -> Self {
        let by_handle = articles
            .iter()
            .map(|a| {
                let blog = a
                    .blog
                    .as_ref()
                    .and_then(|b| b.handle.clone())
                    .unwrap_or_default();
                ((blog, a.handle.clone().unwrap_or_default()), a.clone())
            })
            .collect();
        Self {
            articles,
            by_handle,
            ..Self::default()
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn product_calls(&self) -> usize {
        self.product_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn article_calls(&self) -> usize {
        self.article_calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), ProviderError> {
        if self.fail {
            return Err(ProviderError::UnexpectedStatus {
                status: 503,
                url: "https://fake.example/api/graphql.json".to_owned(),
            });
        }
        Ok(())
    }
}

impl ContentProvider for FakeProvider {
    async fn fetch_products_by_collection(
        &self,
        collection_handle: &str,
        limit: u32,
    ) -> Result<Vec<RawProduct>, ProviderError> {
        self.product_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        if collection_handle == "missing" {
            return Ok(Vec::new());
        }
        Ok(self
            .products
            .iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn fetch_articles(&self, limit: u32) -> Result<Vec<RawArticle>, ProviderError> {
        self.article_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self
            .articles
            .iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn fetch_article_by_handle(
        &self,
        blog_handle: &str,
        article_handle: &str,
    ) -> Result<Option<RawArticle>, ProviderError> {
        self.article_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self
            .by_handle
            .get(&(blog_handle.to_owned(), article_handle.to_owned()))
            .cloned())
    }
}

pub(crate) fn product(id: &str, title: &str, price: &str, available: bool) -> RawProduct {
    let money = RawMoney {
        amount: price.to_owned(),
        currency_code: Some("USD".to_owned()),
    };
    RawProduct {
        id: Some(format!("gid://shopify/Product/{id}")),
        title: Some(title.to_owned()),
        handle: Some(title.to_lowercase()),
        price_range: Some(RawPriceRange {
            min_variant_price: Some(money.clone()),
        }),
        featured_image: None,
        images: Connection::default(),
        variants: Connection {
            edges: vec![Edge {
                node: RawVariant {
                    id: Some(format!("gid://shopify/ProductVariant/{id}")),
                    available_for_sale: Some(available),
                    price: Some(money),
                },
            }],
            page_info: PageInfo::default(),
        },
    }
}

pub(crate) fn article(handle: &str, published_at: &str) -> RawArticle {
    RawArticle {
        id: Some(format!("gid://shopify/Article/{handle}")),
        title: Some(handle.replace('-', " ")),
        handle: Some(handle.to_owned()),
        published_at: Some(published_at.to_owned()),
        excerpt: None,
        content_html: Some(format!("<p>About {handle}</p>")),
        author: None,
        image: None,
        blog: Some(RawBlogRef {
            handle: Some("journal".to_owned()),
            title: Some("Journal".to_owned()),
        }),
    }
}
