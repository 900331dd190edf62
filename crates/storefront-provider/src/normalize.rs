//! Normalization from raw Storefront records to [`storefront_core::Product`]
//! and [`storefront_core::Article`].
//!
//! Single-record functions fail with [`ProviderError::MalformedRecord`]. The
//! batch functions skip such records with a warning so one bad product or
//! article never hides the rest of a page.

use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use rust_decimal::Decimal;
use storefront_core::{Article, Product, ProductImage};

use crate::error::ProviderError;
use crate::sanitize::Sanitizer;
use crate::types::{RawArticle, RawImage, RawMoney, RawProduct};

/// Characters of body text kept by [`excerpt_fallback`].
pub const EXCERPT_FALLBACK_CHARS: usize = 150;

/// Matches a tag, including an unterminated one at the end of the input.
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>?").expect("valid tag regex"));

/// Normalizes a raw [`RawProduct`] into a [`Product`].
///
/// # Errors
///
/// Returns [`ProviderError::MalformedRecord`] if the product has no `id` or
/// `title`, or if a price amount is unparseable or negative.
pub fn normalize_product(raw: RawProduct) -> Result<Product, ProviderError> {
    let id = required(raw.id, "<unknown>", "id")?;
    let title = required(raw.title, &id, "title")?;

    let variants = raw.variants.into_nodes();

    let (min_price, currency_code, in_stock) = if variants.is_empty() {
        // Draft products: nothing to buy, nothing to price.
        (Decimal::ZERO, None, false)
    } else {
        let range_price = raw.price_range.and_then(|range| range.min_variant_price);
        let (min_price, currency_code) = match range_price {
            Some(money) => {
                let amount = parse_amount(&money, &id)?;
                (amount, money.currency_code)
            }
            None => lowest_variant_price(variants.iter().filter_map(|v| v.price.as_ref()), &id)?,
        };
        let in_stock = variants
            .first()
            .and_then(|v| v.available_for_sale)
            .unwrap_or(false);
        (min_price, currency_code, in_stock)
    };

    let image = raw
        .featured_image
        .or_else(|| raw.images.into_nodes().into_iter().next())
        .and_then(image_from_raw);

    Ok(Product {
        id,
        handle: raw.handle.unwrap_or_default(),
        title,
        min_price,
        currency_code,
        in_stock,
        image,
    })
}

/// Normalizes a batch of products, skipping malformed records.
///
/// Order of the surviving products matches the input.
#[must_use]
pub fn normalize_products(raws: Vec<RawProduct>) -> Vec<Product> {
    raws.into_iter()
        .filter_map(|raw| match normalize_product(raw) {
            Ok(product) => Some(product),
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed product");
                None
            }
        })
        .collect()
}

/// Normalizes a raw [`RawArticle`] into an [`Article`].
///
/// `sanitizer` is applied to the body exactly once. The fallback excerpt is
/// derived from the sanitized body.
///
/// # Errors
///
/// Returns [`ProviderError::MalformedRecord`] if the article has no `id`,
/// `title`, `handle` or blog handle, or if `publishedAt` is not a valid
/// RFC 3339 timestamp.
pub fn normalize_article<S: Sanitizer + ?Sized>(
    raw: RawArticle,
    sanitizer: &S,
) -> Result<Article, ProviderError> {
    let id = required(raw.id, "<unknown>", "id")?;
    let title = required(raw.title, &id, "title")?;
    let handle = required(raw.handle, &id, "handle")?;

    let (blog_handle, blog_title) = match raw.blog {
        Some(blog) => (blog.handle, blog.title.filter(|t| !t.is_empty())),
        None => (None, None),
    };
    let blog_handle = required(blog_handle, &id, "blog handle")?;

    let published_raw = required(raw.published_at, &id, "publishedAt")?;
    let published_at = DateTime::parse_from_rfc3339(&published_raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| ProviderError::MalformedRecord {
            record_id: id.clone(),
            reason: format!("invalid publishedAt \"{published_raw}\": {e}"),
        })?;

    let body_html = sanitizer.sanitize(raw.content_html.as_deref().unwrap_or_default());
    let excerpt = raw.excerpt.filter(|e| !e.is_empty());
    let display_excerpt = match &excerpt {
        Some(text) => text.clone(),
        None => excerpt_fallback(&body_html),
    };

    Ok(Article {
        id,
        title,
        handle,
        blog_handle,
        blog_title,
        published_at,
        excerpt,
        display_excerpt,
        body_html,
        author_name: raw.author.and_then(|a| a.name).filter(|n| !n.is_empty()),
        image: raw.image.and_then(image_from_raw),
    })
}

/// Normalizes a batch of articles, skipping malformed records.
///
/// Order of the surviving articles matches the input.
pub fn normalize_articles<S: Sanitizer + ?Sized>(
    raws: Vec<RawArticle>,
    sanitizer: &S,
) -> Vec<Article> {
    raws.into_iter()
        .filter_map(|raw| match normalize_article(raw, sanitizer) {
            Ok(article) => Some(article),
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed article");
                None
            }
        })
        .collect()
}

/// Listing excerpt for an article without an explicit one.
///
/// Strips anything tag-shaped, keeps the first [`EXCERPT_FALLBACK_CHARS`]
/// characters and always appends `"..."`. Entities are left encoded and a
/// truncated tag fragment is stripped along with the rest of the tag.
#[must_use]
pub fn excerpt_fallback(html: &str) -> String {
    let text = TAG.replace_all(html, "");
    let mut excerpt: String = text.chars().take(EXCERPT_FALLBACK_CHARS).collect();
    excerpt.push_str("...");
    excerpt
}

fn required(value: Option<String>, record_id: &str, field: &str) -> Result<String, ProviderError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ProviderError::MalformedRecord {
            record_id: record_id.to_owned(),
            reason: format!("missing {field}"),
        })
}

fn parse_amount(money: &RawMoney, record_id: &str) -> Result<Decimal, ProviderError> {
    let amount =
        Decimal::from_str(money.amount.trim()).map_err(|e| ProviderError::MalformedRecord {
            record_id: record_id.to_owned(),
            reason: format!("unparseable price \"{}\": {e}", money.amount),
        })?;
    if amount < Decimal::ZERO {
        return Err(ProviderError::MalformedRecord {
            record_id: record_id.to_owned(),
            reason: format!("negative price {amount}"),
        });
    }
    Ok(amount)
}

fn lowest_variant_price<'a>(
    prices: impl Iterator<Item = &'a RawMoney>,
    record_id: &str,
) -> Result<(Decimal, Option<String>), ProviderError> {
    let mut lowest: Option<(Decimal, Option<String>)> = None;
    for money in prices {
        let amount = parse_amount(money, record_id)?;
        if lowest.as_ref().is_none_or(|(current, _)| amount < *current) {
            lowest = Some((amount, money.currency_code.clone()));
        }
    }
    Ok(lowest.unwrap_or((Decimal::ZERO, None)))
}

fn image_from_raw(raw: RawImage) -> Option<ProductImage> {
    let url = raw.url.filter(|u| !u.is_empty())?;
    Some(ProductImage {
        url,
        alt_text: raw.alt_text.filter(|a| !a.is_empty()),
    })
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
