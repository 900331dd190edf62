mod articles;
mod products;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use storefront_core::AppConfig;
use storefront_provider::{Sanitizer, StorefrontClient};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId};

/// Largest page a caller may request from the view endpoints.
const MAX_LIMIT: u32 = 250;

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<StorefrontClient>,
    pub sanitizer: Arc<dyn Sanitizer>,
    pub settings: Arc<ViewSettings>,
}

/// Defaults the view endpoints apply when a query leaves them out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSettings {
    pub site_name: String,
    pub default_collection: String,
    pub product_limit: u32,
    pub article_limit: u32,
}

impl ViewSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            site_name: config.site_name.clone(),
            default_collection: config.default_collection.clone(),
            product_limit: config.product_limit,
            article_limit: config.article_limit,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub(super) fn new(request_id: String, data: T) -> Self {
        Self {
            data,
            meta: ResponseMeta::new(request_id),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" => StatusCode::BAD_REQUEST,
            "upstream_error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) fn normalize_limit(limit: Option<u32>, default: u32) -> u32 {
    limit.unwrap_or(default).clamp(1, MAX_LIMIT)
}

/// Parses a raw `limit` query parameter. Clamping is left to
/// [`normalize_limit`].
pub(super) fn parse_limit(raw: Option<&str>) -> Result<Option<u32>, String> {
    raw.map(|value| {
        value
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("limit must be a non-negative integer, got \"{value}\""))
    })
    .transpose()
}

/// Maps a failed controller fetch to a `502`. The provider message is logged
/// by the controller; the client only sees a generic message.
pub(super) fn upstream_error(request_id: String, what: &str) -> ApiError {
    ApiError::new(
        request_id,
        "upstream_error",
        format!("storefront provider failed to return {what}"),
    )
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/products", get(products::list_products))
        .route("/api/v1/articles", get(articles::list_articles))
        .route(
            "/api/v1/articles/{blog}/{article}",
            get(articles::get_article),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    Json(ApiResponse::new(req_id.0, HealthData { status: "ok" }))
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
