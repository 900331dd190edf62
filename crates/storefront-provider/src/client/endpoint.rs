//! Endpoint and domain helpers for the Storefront client.

use reqwest::Url;

use crate::error::ProviderError;

/// Builds the Storefront GraphQL endpoint for a shop.
///
/// Accepts a bare domain (`"chumz.myshopify.com"`) or any URL on the shop
/// (`"https://chumz.com/collections/all"`). Only the origin is kept, and
/// `https` is assumed when no scheme is given.
///
/// # Errors
///
/// Returns [`ProviderError::InvalidShopDomain`] if no host can be parsed.
pub fn storefront_endpoint(shop_domain: &str, api_version: &str) -> Result<Url, ProviderError> {
    let trimmed = shop_domain.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ProviderError::InvalidShopDomain {
            shop_domain: shop_domain.to_owned(),
            reason: "domain is empty".to_owned(),
        });
    }

    let with_scheme = if trimmed.contains("://") {
        trimmed.to_owned()
    } else {
        format!("https://{trimmed}")
    };

    let parsed = Url::parse(&with_scheme).map_err(|e| ProviderError::InvalidShopDomain {
        shop_domain: shop_domain.to_owned(),
        reason: e.to_string(),
    })?;
    if parsed.host_str().is_none() {
        return Err(ProviderError::InvalidShopDomain {
            shop_domain: shop_domain.to_owned(),
            reason: "no host".to_owned(),
        });
    }

    let origin = parsed.origin().ascii_serialization();
    let endpoint = format!("{origin}/api/{api_version}/graphql.json");
    Url::parse(&endpoint).map_err(|e| ProviderError::InvalidShopDomain {
        shop_domain: shop_domain.to_owned(),
        reason: format!("endpoint \"{endpoint}\" is not a valid URL: {e}"),
    })
}

/// Extracts the hostname from an endpoint for use in error messages.
pub(super) fn extract_domain(endpoint: &Url) -> String {
    endpoint
        .host_str()
        .map_or_else(|| endpoint.to_string(), str::to_owned)
}
