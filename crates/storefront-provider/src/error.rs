use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by {domain} (retry after {retry_after_secs}s)")]
    RateLimited {
        domain: String,
        retry_after_secs: u64,
    },

    #[error("storefront rejected the access token (HTTP {status}) for {url}")]
    Unauthorized { status: u16, url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("GraphQL errors in {operation}: {}", messages.join("; "))]
    Graphql {
        operation: &'static str,
        messages: Vec<String>,
    },

    #[error("pagination limit reached for {operation}: exceeded {max_pages} pages")]
    PaginationLimit {
        operation: &'static str,
        max_pages: usize,
    },

    #[error("invalid shop domain \"{shop_domain}\": {reason}")]
    InvalidShopDomain { shop_domain: String, reason: String },

    #[error("malformed record {record_id}: {reason}")]
    MalformedRecord { record_id: String, reason: String },
}

impl ProviderError {
    /// `true` for failures of a single record, as opposed to failures of the
    /// provider call itself.
    #[must_use]
    pub fn is_malformed_record(&self) -> bool {
        matches!(self, ProviderError::MalformedRecord { .. })
    }
}
