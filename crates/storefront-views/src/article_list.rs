//! Blog index controller.

use std::sync::Arc;

use storefront_core::{newest_first, Article};
use storefront_provider::{normalize_articles, ContentProvider, ProviderError, Sanitizer};

use crate::state::{FetchOutcome, FetchRequest, FetchSlot, FetchState, FetchTicket};

/// Default number of articles on the blog index.
pub const DEFAULT_ARTICLE_LIMIT: u32 = 20;

/// Fetches the most recent articles across all blogs.
#[derive(Clone)]
pub struct ArticleListRequest {
    pub limit: u32,
    sanitizer: Arc<dyn Sanitizer>,
}

impl std::fmt::Debug for ArticleListRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArticleListRequest")
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

impl FetchRequest for ArticleListRequest {
    type Output = Vec<Article>;

    fn describe(&self) -> String {
        format!("articles:{}", self.limit)
    }

    async fn run<P: ContentProvider>(&self, provider: &P) -> Result<Vec<Article>, ProviderError> {
        let raws = provider.fetch_articles(self.limit).await?;
        let fetched = raws.len();
        let articles = normalize_articles(raws, self.sanitizer.as_ref());
        tracing::debug!(fetched, kept = articles.len(), "normalized articles");
        Ok(articles)
    }
}

/// Fetch controller for the blog index. Holds articles in provider order.
#[derive(Debug)]
pub struct ArticleListController {
    request: ArticleListRequest,
    slot: FetchSlot<Vec<Article>>,
}

impl ArticleListController {
    #[must_use]
    pub fn new(limit: u32, sanitizer: Arc<dyn Sanitizer>) -> Self {
        Self {
            request: ArticleListRequest { limit, sanitizer },
            slot: FetchSlot::default(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &FetchState<Vec<Article>> {
        self.slot.state()
    }

    pub fn mount(&mut self) -> Option<FetchTicket<ArticleListRequest>> {
        self.slot.begin(self.request.clone())
    }

    pub fn resolve(&mut self, outcome: FetchOutcome<Vec<Article>>) -> bool {
        self.slot.resolve(outcome)
    }

    pub fn unmount(&mut self) {
        self.slot.reset();
    }

    /// Mounts, fetches and resolves in one step.
    pub async fn load<P: ContentProvider>(&mut self, provider: &P) -> &FetchState<Vec<Article>> {
        if let Some(ticket) = self.mount() {
            let outcome = ticket.fetch(provider).await;
            self.resolve(outcome);
        }
        self.state()
    }

    /// Loaded articles in provider order.
    #[must_use]
    pub fn articles(&self) -> Option<&[Article]> {
        self.slot.state().loaded().map(Vec::as_slice)
    }

    /// Loaded articles, most recently published first.
    #[must_use]
    pub fn newest_first(&self) -> Option<Vec<Article>> {
        self.articles().map(newest_first)
    }
}
