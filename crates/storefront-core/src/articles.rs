use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::products::ProductImage;

/// A blog article, normalized for display.
///
/// `(blog_handle, handle)` identifies an article across the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    /// URL slug of the article within its blog, e.g. `"period-care-101"`.
    pub handle: String,
    pub blog_handle: String,
    pub blog_title: Option<String>,
    pub published_at: DateTime<Utc>,
    /// Explicit excerpt from the provider. `None` when the editor left it blank.
    pub excerpt: Option<String>,
    /// Excerpt shown on listing cards: the explicit excerpt, or plain text
    /// derived from the body when none was written.
    pub display_excerpt: String,
    /// Article body, already passed through a sanitizer.
    pub body_html: String,
    pub author_name: Option<String>,
    pub image: Option<ProductImage>,
}

impl Article {
    /// Publication instant as Unix milliseconds, for chronological ordering.
    #[must_use]
    pub fn published_at_millis(&self) -> i64 {
        self.published_at.timestamp_millis()
    }

    /// `"March 04, 2025"` style date used on the article page.
    #[must_use]
    pub fn published_long(&self) -> String {
        self.published_at.format("%B %d, %Y").to_string()
    }

    /// `"Mar 04, 2025"` style date used on listing cards.
    #[must_use]
    pub fn published_short(&self) -> String {
        self.published_at.format("%b %d, %Y").to_string()
    }

    /// Meta description for the article page.
    #[must_use]
    pub fn meta_description(&self, site_name: &str) -> String {
        match self.excerpt.as_deref() {
            Some(excerpt) if !excerpt.is_empty() => excerpt.to_owned(),
            _ => format!("Read {} on {site_name} Blog.", self.title),
        }
    }

    /// Alt text for the article image, falling back to the article title.
    #[must_use]
    pub fn image_alt(&self) -> &str {
        self.image
            .as_ref()
            .and_then(|img| img.alt_text.as_deref())
            .filter(|alt| !alt.is_empty())
            .unwrap_or(&self.title)
    }

    /// Label of the blog the article belongs to.
    #[must_use]
    pub fn blog_label(&self) -> &str {
        self.blog_title
            .as_deref()
            .filter(|title| !title.is_empty())
            .unwrap_or("Blog")
    }
}

/// Returns a copy of `articles` ordered newest first.
///
/// Articles published at the same instant keep their relative order.
#[must_use]
pub fn newest_first(articles: &[Article]) -> Vec<Article> {
    let mut sorted = articles.to_vec();
    sorted.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    sorted
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn make_article(handle: &str, published_at: DateTime<Utc>) -> Article {
        Article {
            id: format!("gid://shopify/Article/{handle}"),
            title: "Period Care 101".to_string(),
            handle: handle.to_string(),
            blog_handle: "news".to_string(),
            blog_title: Some("Wellness".to_string()),
            published_at,
            excerpt: None,
            display_excerpt: "Everything you need...".to_string(),
            body_html: "<p>Everything you need</p>".to_string(),
            author_name: Some("Amara".to_string()),
            image: None,
        }
    }

    fn march_fourth() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 4, 9, 30, 0).unwrap()
    }

    #[test]
    fn published_dates_format_like_the_storefront() {
        let article = make_article("a", march_fourth());
        assert_eq!(article.published_long(), "March 04, 2025");
        assert_eq!(article.published_short(), "Mar 04, 2025");
    }

    #[test]
    fn published_at_millis_is_unix_millis() {
        let article = make_article("a", march_fourth());
        assert_eq!(article.published_at_millis(), 1_741_080_600_000);
    }

    #[test]
    fn meta_description_prefers_excerpt() {
        let mut article = make_article("a", march_fourth());
        article.excerpt = Some("A short guide.".to_string());
        assert_eq!(article.meta_description("Chumz"), "A short guide.");
    }

    #[test]
    fn meta_description_falls_back_when_excerpt_empty() {
        let mut article = make_article("a", march_fourth());
        article.excerpt = Some(String::new());
        assert_eq!(
            article.meta_description("Chumz"),
            "Read Period Care 101 on Chumz Blog."
        );
    }

    #[test]
    fn blog_label_defaults_to_blog() {
        let mut article = make_article("a", march_fourth());
        assert_eq!(article.blog_label(), "Wellness");
        article.blog_title = None;
        assert_eq!(article.blog_label(), "Blog");
    }

    #[test]
    fn image_alt_falls_back_to_title() {
        let mut article = make_article("a", march_fourth());
        article.image = Some(ProductImage {
            url: "https://cdn.shopify.com/a.png".to_string(),
            alt_text: None,
        });
        assert_eq!(article.image_alt(), "Period Care 101");
    }

    #[test]
    fn newest_first_orders_by_publication_and_keeps_ties_stable() {
        let older = make_article("older", march_fourth());
        let newer = make_article("newer", Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap());
        let tie = make_article("tie", march_fourth());

        let sorted = newest_first(&[older.clone(), newer.clone(), tie.clone()]);
        let handles: Vec<&str> = sorted.iter().map(|a| a.handle.as_str()).collect();
        assert_eq!(handles, vec!["newer", "older", "tie"]);
    }
}
