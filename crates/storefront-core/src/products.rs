use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product from a storefront collection, normalized for filtering and
/// display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Provider product ID (e.g. `"gid://shopify/Product/7982365"`). Unique
    /// within one catalog snapshot.
    pub id: String,
    /// URL slug for the product page, e.g. `"overnight-pads-12"`.
    pub handle: String,
    pub title: String,
    /// Lowest price across variants. Never negative.
    pub min_price: Decimal,
    /// ISO 4217 code of `min_price`, when the provider reports one.
    pub currency_code: Option<String>,
    /// `true` when the product can be purchased right now.
    pub in_stock: bool,
    pub image: Option<ProductImage>,
}

impl Product {
    /// Alt text for the product image, falling back to the product title when
    /// the provider left it empty.
    #[must_use]
    pub fn image_alt(&self) -> &str {
        self.image
            .as_ref()
            .and_then(|img| img.alt_text.as_deref())
            .filter(|alt| !alt.is_empty())
            .unwrap_or(&self.title)
    }
}

/// An image reference shared by products and articles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    /// Canonical CDN URL.
    pub url: String,
    pub alt_text: Option<String>,
}

/// One fetch's worth of normalized products.
///
/// The list is fixed at construction. Filtering and sorting go through
/// [`crate::catalog::derive_catalog_view`], which borrows the snapshot and
/// returns a fresh list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogSnapshot {
    products: Vec<Product>,
}

impl CatalogSnapshot {
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
