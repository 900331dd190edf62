use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    /// Storefront domain, e.g. `"chumz.myshopify.com"`.
    pub shop_domain: String,
    pub storefront_access_token: String,
    /// Storefront API version segment, e.g. `"2025-01"`.
    pub api_version: String,
    pub log_level: String,
    pub bind_addr: SocketAddr,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Brand name used in page metadata ("Read ... on {site_name} Blog.").
    pub site_name: String,
    pub default_collection: String,
    pub product_limit: u32,
    pub article_limit: u32,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("shop_domain", &self.shop_domain)
            .field("storefront_access_token", &"[redacted]")
            .field("api_version", &self.api_version)
            .field("log_level", &self.log_level)
            .field("bind_addr", &self.bind_addr)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("site_name", &self.site_name)
            .field("default_collection", &self.default_collection)
            .field("product_limit", &self.product_limit)
            .field("article_limit", &self.article_limit)
            .finish()
    }
}
