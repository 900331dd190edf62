//! HTTP client for the Storefront GraphQL API.

mod endpoint;
mod fetch;

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::json;

use storefront_core::AppConfig;

use crate::error::ProviderError;
use crate::types::GraphqlResponse;

pub use endpoint::storefront_endpoint;

/// Maximum number of pages to fetch for one call before returning an error.
/// Guards against a provider that keeps reporting `hasNextPage` with empty
/// pages.
pub(super) const MAX_PAGES: usize = 40;

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Storefront-Access-Token";

/// Client for a shop's Storefront GraphQL endpoint.
///
/// Non-2xx statuses, `429`s and GraphQL `errors` arrays surface as typed
/// [`ProviderError`]s. Nothing is retried here: a failed call is reported to
/// the caller once.
pub struct StorefrontClient {
    client: Client,
    endpoint: Url,
    access_token: String,
}

impl StorefrontClient {
    /// Creates a client for `shop_domain` on the given API version.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::InvalidShopDomain`] for an unusable domain, or
    /// [`ProviderError::Http`] if the underlying `reqwest::Client` cannot be
    /// constructed.
    pub fn new(
        shop_domain: &str,
        api_version: &str,
        access_token: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ProviderError> {
        let endpoint = storefront_endpoint(shop_domain, api_version)?;
        Self::build(endpoint, access_token, timeout_secs, user_agent)
    }

    /// Creates a client from application config.
    ///
    /// # Errors
    ///
    /// See [`StorefrontClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ProviderError> {
        Self::new(
            &config.shop_domain,
            &config.api_version,
            &config.storefront_access_token,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client that posts to an explicit endpoint URL (for testing
    /// with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::InvalidShopDomain`] if `endpoint` is not a
    /// valid URL, or [`ProviderError::Http`] if the client cannot be built.
    pub fn with_endpoint(
        endpoint: &str,
        access_token: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ProviderError> {
        let endpoint = Url::parse(endpoint).map_err(|e| ProviderError::InvalidShopDomain {
            shop_domain: endpoint.to_owned(),
            reason: e.to_string(),
        })?;
        Self::build(endpoint, access_token, timeout_secs, user_agent)
    }

    fn build(
        endpoint: Url,
        access_token: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            endpoint,
            access_token: access_token.to_owned(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Posts one GraphQL operation and returns its `data`.
    ///
    /// `Ok(None)` is never returned for a well-formed response: a response
    /// with neither `data` nor `errors` is reported as
    /// [`ProviderError::Graphql`].
    ///
    /// # Errors
    ///
    /// - [`ProviderError::RateLimited`] for HTTP 429.
    /// - [`ProviderError::Unauthorized`] for HTTP 401/403.
    /// - [`ProviderError::UnexpectedStatus`] for any other non-2xx status.
    /// - [`ProviderError::Http`] on network or TLS failure.
    /// - [`ProviderError::Deserialize`] when the body does not match `T`.
    /// - [`ProviderError::Graphql`] when the response carries `errors`.
    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, ProviderError> {
        let url = self.endpoint.to_string();
        let body = json!({
            "operationName": operation,
            "query": query,
            "variables": variables,
        });

        tracing::debug!(operation, url = %url, "posting storefront query");

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(ProviderError::RateLimited {
                domain: endpoint::extract_domain(&self.endpoint),
                retry_after_secs,
            });
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(ProviderError::Unauthorized {
                status: status.as_u16(),
                url,
            });
        }

        if !status.is_success() {
            return Err(ProviderError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let text = response.text().await?;
        let parsed = serde_json::from_str::<GraphqlResponse<T>>(&text).map_err(|e| {
            ProviderError::Deserialize {
                context: format!("{operation} response from {url}"),
                source: e,
            }
        })?;

        if !parsed.errors.is_empty() {
            return Err(ProviderError::Graphql {
                operation,
                messages: parsed.errors.into_iter().map(|e| e.message).collect(),
            });
        }

        parsed.data.ok_or_else(|| ProviderError::Graphql {
            operation,
            messages: vec!["response contained no data".to_owned()],
        })
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
