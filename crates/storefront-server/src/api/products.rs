use axum::{
    extract::{Query, State},
    Extension, Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use storefront_core::{FilterSpec, PriceRange, Product, SortKey};
use storefront_views::{CatalogController, FetchState};

use crate::middleware::RequestId;

use super::{normalize_limit, parse_limit, upstream_error, ApiError, ApiResponse, AppState};

#[derive(Debug, Serialize)]
pub(super) struct CatalogPayload {
    collection: String,
    products: Vec<ProductItem>,
    /// Products in the fetched snapshot, before filtering.
    total: usize,
    filtered: bool,
    filter: FilterSpec,
}

#[derive(Debug, Serialize)]
pub(super) struct ProductItem {
    #[serde(flatten)]
    product: Product,
    image_alt: String,
}

impl From<Product> for ProductItem {
    fn from(product: Product) -> Self {
        let image_alt = product.image_alt().to_owned();
        Self { product, image_alt }
    }
}

/// Query parameters arrive as strings so bad input maps to a `bad_request`
/// envelope rather than a bare extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ProductQuery {
    pub collection: Option<String>,
    pub limit: Option<String>,
    pub sort: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub in_stock: Option<String>,
}

/// Builds a `FilterSpec` from query parameters, starting from the session
/// defaults.
pub(super) fn filter_from_query(query: &ProductQuery) -> Result<FilterSpec, String> {
    let sort_key = match query.sort.as_deref() {
        Some(raw) => raw.parse::<SortKey>().map_err(|e| e.to_string())?,
        None => SortKey::default(),
    };

    let defaults = PriceRange::default();
    let min = parse_price(query.min_price.as_deref(), "min_price")?.unwrap_or(defaults.min);
    let max = parse_price(query.max_price.as_deref(), "max_price")?.unwrap_or(defaults.max);
    let price_range = PriceRange::new(min, max).map_err(|e| e.to_string())?;

    Ok(FilterSpec {
        sort_key,
        price_range,
        only_in_stock: parse_flag(query.in_stock.as_deref(), "in_stock")?.unwrap_or(false),
    })
}

fn parse_flag(raw: Option<&str>, field: &str) -> Result<Option<bool>, String> {
    raw.map(|value| match value.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(format!("{field} must be true or false, got \"{value}\"")),
    })
    .transpose()
}

fn parse_price(raw: Option<&str>, field: &str) -> Result<Option<Decimal>, String> {
    raw.map(|value| {
        value
            .trim()
            .parse::<Decimal>()
            .map_err(|_| format!("{field} must be a decimal number, got \"{value}\""))
    })
    .transpose()
}

pub(super) async fn list_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<ApiResponse<CatalogPayload>>, ApiError> {
    let bad_request = |message: String| ApiError::new(req_id.0.clone(), "bad_request", message);
    let filter = filter_from_query(&query).map_err(bad_request)?;
    let limit = parse_limit(query.limit.as_deref()).map_err(bad_request)?;

    let collection = query
        .collection
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| state.settings.default_collection.clone());
    let limit = normalize_limit(limit, state.settings.product_limit);

    let mut controller = CatalogController::new(collection.clone(), limit);
    controller.set_filter(filter);
    if let FetchState::Failed(_) = controller.load(state.provider.as_ref()).await {
        return Err(upstream_error(req_id.0, "products"));
    }

    let view = controller
        .view()
        .ok_or_else(|| upstream_error(req_id.0.clone(), "products"))?;
    let filtered = view.is_filtered();

    Ok(Json(ApiResponse::new(
        req_id.0,
        CatalogPayload {
            collection,
            total: view.total,
            filtered,
            products: view.products.into_iter().map(ProductItem::from).collect(),
            filter,
        },
    )))
}
