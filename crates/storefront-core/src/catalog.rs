//! Catalog filter/sort engine.
//!
//! Derives the product list a shopper sees from a catalog snapshot and a
//! [`FilterSpec`]. The stages always run in the same order:
//!
//! 1. stock filter (only when `only_in_stock` is set),
//! 2. price filter against the inclusive `price_range`,
//! 3. stable sort by `sort_key`.
//!
//! Every function here is total and pure. Input slices are only borrowed and
//! each call returns a freshly allocated list.

use std::cmp::Ordering;

use serde::Serialize;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::filter::{FilterSpec, SortKey};
use crate::products::{CatalogSnapshot, Product};

/// The filtered, ordered product list for one render, together with the size
/// of the snapshot it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogView {
    pub products: Vec<Product>,
    /// Number of products in the source snapshot.
    pub total: usize,
}

impl CatalogView {
    /// `true` when filters hid at least one product from the snapshot.
    #[must_use]
    pub fn is_filtered(&self) -> bool {
        self.products.len() != self.total
    }
}

/// Applies `spec` to `products` and returns the resulting list.
///
/// An inverted price window (`min > max`) matches nothing and yields an empty
/// list.
#[must_use]
pub fn derive_view(products: &[Product], spec: &FilterSpec) -> Vec<Product> {
    let range = spec.price_range;

    let mut view: Vec<Product> = products
        .iter()
        .filter(|p| !spec.only_in_stock || p.in_stock)
        .filter(|p| range.contains(p.min_price))
        .cloned()
        .collect();

    // `sort_by` is stable, so equal keys keep their snapshot order.
    match spec.sort_key {
        SortKey::Featured => {}
        SortKey::PriceAsc => view.sort_by(|a, b| a.min_price.cmp(&b.min_price)),
        SortKey::PriceDesc => view.sort_by(|a, b| b.min_price.cmp(&a.min_price)),
        SortKey::TitleAsc => view.sort_by(|a, b| compare_titles(&a.title, &b.title)),
        SortKey::TitleDesc => view.sort_by(|a, b| compare_titles(&b.title, &a.title)),
    }

    view
}

/// Derives a [`CatalogView`] from a snapshot.
#[must_use]
pub fn derive_catalog_view(snapshot: &CatalogSnapshot, spec: &FilterSpec) -> CatalogView {
    CatalogView {
        products: derive_view(snapshot.products(), spec),
        total: snapshot.len(),
    }
}

/// Compares titles the way a shopper reads an alphabetical list.
///
/// Base letters compare first, ignoring case and accents, so `"apple"` sorts
/// before `"Banana"` and `"Éclair"` before `"Zebra"`. Ties are broken by
/// accents (unaccented first), then by case (lowercase first). Only
/// byte-identical titles compare equal.
#[must_use]
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| lowercase_nfd(a).cmp(lowercase_nfd(b)))
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn lowercase_nfd(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
