//! `blog` and `article` commands.

use std::fmt::Write as _;
use std::sync::Arc;

use storefront_core::Article;
use storefront_provider::{ContentProvider, Sanitizer};
use storefront_views::{ArticleController, ArticleListController, ArticleView, FetchState};

/// Fetch recent articles and print them newest first.
///
/// # Errors
///
/// Returns an error if the provider call fails.
pub(crate) async fn run_blog<P: ContentProvider>(
    provider: &P,
    sanitizer: Arc<dyn Sanitizer>,
    limit: u32,
    json: bool,
) -> anyhow::Result<()> {
    let mut controller = ArticleListController::new(limit, sanitizer);
    if let FetchState::Failed(message) = controller.load(provider).await {
        anyhow::bail!("failed to load articles: {message}");
    }
    let articles = controller.newest_first().unwrap_or_default();

    if json {
        println!("{}", serde_json::to_string_pretty(&articles)?);
    } else {
        print!("{}", render_article_list(&articles));
    }
    Ok(())
}

/// Fetch one article and print it.
///
/// # Errors
///
/// Returns an error if the article does not exist or the provider call fails.
pub(crate) async fn run_article<P: ContentProvider>(
    provider: &P,
    sanitizer: Arc<dyn Sanitizer>,
    site_name: &str,
    blog_handle: &str,
    article_handle: &str,
    json: bool,
) -> anyhow::Result<()> {
    let mut controller = ArticleController::new(blog_handle, article_handle, sanitizer);
    controller.load(provider).await;

    match controller.view() {
        ArticleView::Article(article) => {
            if json {
                println!("{}", serde_json::to_string_pretty(article)?);
            } else {
                print!("{}", render_article(article, site_name));
            }
            Ok(())
        }
        ArticleView::NotFound => {
            anyhow::bail!("article '{blog_handle}/{article_handle}' not found")
        }
        ArticleView::Failed(message) => {
            anyhow::bail!("failed to load article '{blog_handle}/{article_handle}': {message}")
        }
        ArticleView::Loading => {
            anyhow::bail!("article '{blog_handle}/{article_handle}' did not finish loading")
        }
    }
}

pub(crate) fn render_article_list(articles: &[Article]) -> String {
    if articles.is_empty() {
        return "no articles published yet\n".to_owned();
    }

    let mut out = String::new();
    let _ = writeln!(out, "{:<14}{:<16}TITLE", "DATE", "BLOG");
    for article in articles {
        let _ = writeln!(
            out,
            "{:<14}{:<16}{}",
            article.published_short(),
            article.blog_label(),
            article.title
        );
        let _ = writeln!(out, "{:<30}{}", "", article.display_excerpt);
        let _ = writeln!(
            out,
            "{:<30}/blogs/{}/{}",
            "", article.blog_handle, article.handle
        );
    }
    out
}

pub(crate) fn render_article(article: &Article, site_name: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", article.title);
    let byline = match article.author_name.as_deref() {
        Some(author) => format!("{} \u{2022} {author}", article.published_long()),
        None => article.published_long(),
    };
    let _ = writeln!(out, "{} | {byline}", article.blog_label());
    let _ = writeln!(out, "{}", article.meta_description(site_name));
    out.push('\n');
    let _ = writeln!(out, "{}", article.body_html);
    out
}
