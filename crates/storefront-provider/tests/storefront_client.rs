//! Integration tests for `StorefrontClient`'s `ContentProvider` impl.
//!
//! Uses `wiremock` to stand up a local GraphQL endpoint for each test so no
//! real network traffic is made. Covers the happy paths (single page,
//! multi-page, lookups) and every error variant a request can propagate.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use storefront_provider::{ContentProvider, ProviderError, StorefrontClient};

const GRAPHQL_PATH: &str = "/api/2025-01/graphql.json";

/// Builds a `StorefrontClient` pointed at the mock server: 5-second timeout,
/// descriptive UA.
fn test_client(server: &MockServer) -> StorefrontClient {
    StorefrontClient::with_endpoint(
        &format!("{}{GRAPHQL_PATH}", server.uri()),
        "test-token",
        5,
        "storefront-test/0.1",
    )
    .expect("failed to build test StorefrontClient")
}

fn product_node(id: u32, price: &str) -> serde_json::Value {
    json!({
        "node": {
            "id": format!("gid://shopify/Product/{id}"),
            "title": format!("Product {id}"),
            "handle": format!("product-{id}"),
            "priceRange": { "minVariantPrice": { "amount": price, "currencyCode": "USD" } },
            "featuredImage": null,
            "images": { "edges": [] },
            "variants": { "edges": [{ "node": {
                "id": format!("gid://shopify/ProductVariant/{id}"),
                "availableForSale": true,
                "price": { "amount": price, "currencyCode": "USD" }
            } }] }
        }
    })
}

fn products_page(nodes: Vec<serde_json::Value>, end_cursor: Option<&str>) -> serde_json::Value {
    json!({
        "data": {
            "collection": {
                "products": {
                    "pageInfo": { "hasNextPage": end_cursor.is_some(), "endCursor": end_cursor },
                    "edges": nodes
                }
            }
        }
    })
}

fn article_json(id: u32, published_at: &str) -> serde_json::Value {
    json!({
        "id": format!("gid://shopify/Article/{id}"),
        "title": format!("Article {id}"),
        "handle": format!("article-{id}"),
        "publishedAt": published_at,
        "excerpt": null,
        "contentHtml": "<p>Body</p>",
        "authorV2": { "name": "Amara" },
        "image": null,
        "blog": { "handle": "journal", "title": "Journal" }
    })
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_products_returns_single_page_with_token_header() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(header("X-Shopify-Storefront-Access-Token", "test-token"))
        .and(body_partial_json(json!({
            "operationName": "CollectionProducts",
            "variables": { "handle": "frontpage", "first": 50, "after": null }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_page(
            vec![product_node(1, "12.99"), product_node(2, "8.00")],
            None,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.fetch_products_by_collection("frontpage", 50).await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let products = result.unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].id.as_deref(), Some("gid://shopify/Product/1"));
    assert_eq!(products[1].handle.as_deref(), Some("product-2"));
}

#[tokio::test]
async fn fetch_products_follows_cursor_across_pages() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_partial_json(json!({ "variables": { "after": null } })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(products_page(vec![product_node(1, "1.00")], Some("c1"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_partial_json(json!({ "variables": { "after": "c1" } })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(products_page(vec![product_node(2, "2.00")], None)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let products = client
        .fetch_products_by_collection("frontpage", 10)
        .await
        .expect("expected Ok");

    let ids: Vec<_> = products.iter().filter_map(|p| p.id.as_deref()).collect();
    assert_eq!(
        ids,
        vec!["gid://shopify/Product/1", "gid://shopify/Product/2"]
    );
}

#[tokio::test]
async fn fetch_products_stops_at_limit() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_page(
            vec![product_node(1, "1.00"), product_node(2, "2.00")],
            Some("c1"),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let products = client
        .fetch_products_by_collection("frontpage", 2)
        .await
        .expect("expected Ok");
    assert_eq!(products.len(), 2);
}

#[tokio::test]
async fn fetch_products_with_zero_limit_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let products = client
        .fetch_products_by_collection("frontpage", 0)
        .await
        .expect("expected Ok");
    assert!(products.is_empty());
}

#[tokio::test]
async fn fetch_products_unknown_collection_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "collection": null } })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.fetch_products_by_collection("nope", 50).await;
    assert!(
        matches!(result, Ok(ref products) if products.is_empty()),
        "expected empty Ok, got: {result:?}"
    );
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rate_limit_surfaces_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .fetch_products_by_collection("frontpage", 50)
        .await
        .unwrap_err();
    assert!(
        matches!(err, ProviderError::RateLimited { retry_after_secs: 7, .. }),
        "expected RateLimited(7), got: {err:?}"
    );
}

#[tokio::test]
async fn rate_limit_without_header_defaults_to_sixty_seconds() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.fetch_articles(5).await.unwrap_err();
    assert!(
        matches!(err, ProviderError::RateLimited { retry_after_secs: 60, .. }),
        "expected RateLimited(60), got: {err:?}"
    );
}

#[tokio::test]
async fn unauthorized_token_is_typed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.fetch_articles(5).await.unwrap_err();
    assert!(
        matches!(err, ProviderError::Unauthorized { status: 401, .. }),
        "expected Unauthorized, got: {err:?}"
    );
}

#[tokio::test]
async fn server_error_is_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .fetch_products_by_collection("frontpage", 50)
        .await
        .unwrap_err();
    assert!(
        matches!(err, ProviderError::UnexpectedStatus { status: 503, .. }),
        "expected UnexpectedStatus(503), got: {err:?}"
    );
}

#[tokio::test]
async fn malformed_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .fetch_products_by_collection("frontpage", 50)
        .await
        .unwrap_err();
    assert!(
        matches!(err, ProviderError::Deserialize { .. }),
        "expected Deserialize, got: {err:?}"
    );
}

#[tokio::test]
async fn graphql_errors_are_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{ "message": "Field 'nope' doesn't exist on type 'QueryRoot'" }]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.fetch_articles(5).await.unwrap_err();
    match err {
        ProviderError::Graphql {
            operation,
            messages,
        } => {
            assert_eq!(operation, "Articles");
            assert_eq!(messages.len(), 1);
            assert!(messages[0].contains("doesn't exist"));
        }
        other => panic!("expected Graphql, got: {other:?}"),
    }
}

#[tokio::test]
async fn earlier_pages_are_discarded_on_later_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "variables": { "after": null } })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(products_page(vec![product_node(1, "1.00")], Some("c1"))),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "variables": { "after": "c1" } })))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.fetch_products_by_collection("frontpage", 10).await;
    assert!(
        matches!(result, Err(ProviderError::UnexpectedStatus { status: 500, .. })),
        "expected UnexpectedStatus(500), got: {result:?}"
    );
}

// ---------------------------------------------------------------------------
// Articles
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_articles_returns_nodes_in_provider_order() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_partial_json(json!({
            "operationName": "Articles",
            "variables": { "first": 20, "after": null }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "articles": {
                "pageInfo": { "hasNextPage": false, "endCursor": null },
                "edges": [
                    { "node": article_json(2, "2025-03-05T08:00:00Z") },
                    { "node": article_json(1, "2025-03-04T09:30:00Z") }
                ]
            } }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let articles = client.fetch_articles(20).await.expect("expected Ok");
    let handles: Vec<_> = articles.iter().filter_map(|a| a.handle.as_deref()).collect();
    assert_eq!(handles, vec!["article-2", "article-1"]);
}

#[tokio::test]
async fn fetch_article_by_handle_fills_blog_from_parent() {
    let server = MockServer::start().await;

    let mut article = article_json(1, "2025-03-04T09:30:00Z");
    article["blog"] = serde_json::Value::Null;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "operationName": "ArticleByHandle",
            "variables": { "blogHandle": "journal", "articleHandle": "article-1" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "blog": {
                "handle": "journal",
                "title": "Journal",
                "articleByHandle": article
            } }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let article = client
        .fetch_article_by_handle("journal", "article-1")
        .await
        .expect("expected Ok")
        .expect("expected an article");
    let blog = article.blog.expect("blog filled from parent");
    assert_eq!(blog.handle.as_deref(), Some("journal"));
    assert_eq!(blog.title.as_deref(), Some("Journal"));
}

#[tokio::test]
async fn fetch_article_by_handle_missing_article_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "blog": { "handle": "journal", "title": "Journal", "articleByHandle": null } }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.fetch_article_by_handle("journal", "nope").await;
    assert!(matches!(result, Ok(None)), "expected Ok(None), got: {result:?}");
}

#[tokio::test]
async fn fetch_article_by_handle_missing_blog_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "blog": null } })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.fetch_article_by_handle("nope", "article-1").await;
    assert!(matches!(result, Ok(None)), "expected Ok(None), got: {result:?}");
}
