//! Article page controller.

use std::sync::Arc;

use storefront_core::Article;
use storefront_provider::{normalize_article, ContentProvider, ProviderError, Sanitizer};

use crate::state::{FetchOutcome, FetchRequest, FetchSlot, FetchState, FetchTicket};

/// Looks up one article by `(blog_handle, article_handle)`.
#[derive(Clone)]
pub struct ArticleRequest {
    pub blog_handle: String,
    pub article_handle: String,
    sanitizer: Arc<dyn Sanitizer>,
}

impl std::fmt::Debug for ArticleRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArticleRequest")
            .field("blog_handle", &self.blog_handle)
            .field("article_handle", &self.article_handle)
            .finish_non_exhaustive()
    }
}

impl FetchRequest for ArticleRequest {
    /// `None` when the provider has no such article.
    type Output = Option<Article>;

    fn describe(&self) -> String {
        format!("article:{}/{}", self.blog_handle, self.article_handle)
    }

    async fn run<P: ContentProvider>(&self, provider: &P) -> Result<Option<Article>, ProviderError> {
        let Some(raw) = provider
            .fetch_article_by_handle(&self.blog_handle, &self.article_handle)
            .await?
        else {
            return Ok(None);
        };

        match normalize_article(raw, self.sanitizer.as_ref()) {
            Ok(article) => Ok(Some(article)),
            Err(e) if e.is_malformed_record() => {
                tracing::warn!(
                    blog = %self.blog_handle,
                    article = %self.article_handle,
                    error = %e,
                    "article record is malformed; treating as not found"
                );
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

/// What the article page should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleView<'a> {
    Loading,
    NotFound,
    Failed(&'a str),
    Article(&'a Article),
}

/// Fetch controller for a single article page.
///
/// `Loaded(None)` means the provider answered and has no such article. It is
/// distinct from `Failed`, which means the provider could not answer.
#[derive(Debug)]
pub struct ArticleController {
    request: ArticleRequest,
    slot: FetchSlot<Option<Article>>,
}

impl ArticleController {
    #[must_use]
    pub fn new(
        blog_handle: impl Into<String>,
        article_handle: impl Into<String>,
        sanitizer: Arc<dyn Sanitizer>,
    ) -> Self {
        Self {
            request: ArticleRequest {
                blog_handle: blog_handle.into(),
                article_handle: article_handle.into(),
                sanitizer,
            },
            slot: FetchSlot::default(),
        }
    }

    /// Current `(blog_handle, article_handle)` key.
    #[must_use]
    pub fn key(&self) -> (&str, &str) {
        (&self.request.blog_handle, &self.request.article_handle)
    }

    #[must_use]
    pub fn state(&self) -> &FetchState<Option<Article>> {
        self.slot.state()
    }

    /// Starts the fetch for the current key. Returns `None` while a fetch is
    /// in flight.
    pub fn mount(&mut self) -> Option<FetchTicket<ArticleRequest>> {
        self.slot.begin(self.request.clone())
    }

    /// Switches to another article. Any in-flight fetch for the previous key
    /// is superseded and its outcome will be discarded.
    pub fn navigate(
        &mut self,
        blog_handle: impl Into<String>,
        article_handle: impl Into<String>,
    ) -> FetchTicket<ArticleRequest> {
        self.request.blog_handle = blog_handle.into();
        self.request.article_handle = article_handle.into();
        self.slot.restart(self.request.clone())
    }

    /// Applies a finished fetch. Returns `false` for a stale outcome.
    pub fn resolve(&mut self, outcome: FetchOutcome<Option<Article>>) -> bool {
        self.slot.resolve(outcome)
    }

    pub fn unmount(&mut self) {
        self.slot.reset();
    }

    /// Mounts, fetches and resolves in one step.
    pub async fn load<P: ContentProvider>(
        &mut self,
        provider: &P,
    ) -> &FetchState<Option<Article>> {
        if let Some(ticket) = self.mount() {
            let outcome = ticket.fetch(provider).await;
            self.resolve(outcome);
        }
        self.state()
    }

    #[must_use]
    pub fn view(&self) -> ArticleView<'_> {
        match self.slot.state() {
            FetchState::Idle | FetchState::Loading => ArticleView::Loading,
            FetchState::Loaded(None) => ArticleView::NotFound,
            FetchState::Loaded(Some(article)) => ArticleView::Article(article),
            FetchState::Failed(message) => ArticleView::Failed(message),
        }
    }
}
