use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use storefront_core::Article;
use storefront_views::{ArticleController, ArticleListController, ArticleView, FetchState};

use crate::middleware::RequestId;

use super::{normalize_limit, parse_limit, upstream_error, ApiError, ApiResponse, AppState};

/// An article plus the presentation strings the front end would otherwise
/// have to derive.
#[derive(Debug, Serialize)]
pub(super) struct ArticleItem {
    #[serde(flatten)]
    article: Article,
    published_at_millis: i64,
    published_long: String,
    published_short: String,
    blog_label: String,
    image_alt: String,
    meta_description: String,
}

impl ArticleItem {
    fn new(article: Article, site_name: &str) -> Self {
        Self {
            published_at_millis: article.published_at_millis(),
            published_long: article.published_long(),
            published_short: article.published_short(),
            blog_label: article.blog_label().to_owned(),
            image_alt: article.image_alt().to_owned(),
            meta_description: article.meta_description(site_name),
            article,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ArticleListQuery {
    pub limit: Option<String>,
}

/// Recent articles across all blogs, newest first.
pub(super) async fn list_articles(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ArticleListQuery>,
) -> Result<Json<ApiResponse<Vec<ArticleItem>>>, ApiError> {
    let limit = parse_limit(query.limit.as_deref())
        .map_err(|message| ApiError::new(req_id.0.clone(), "bad_request", message))?;
    let limit = normalize_limit(limit, state.settings.article_limit);

    let mut controller = ArticleListController::new(limit, state.sanitizer.clone());
    if let FetchState::Failed(_) = controller.load(state.provider.as_ref()).await {
        return Err(upstream_error(req_id.0, "articles"));
    }

    let data = controller
        .newest_first()
        .unwrap_or_default()
        .into_iter()
        .map(|article| ArticleItem::new(article, &state.settings.site_name))
        .collect();

    Ok(Json(ApiResponse::new(req_id.0, data)))
}

pub(super) async fn get_article(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path((blog, article)): Path<(String, String)>,
) -> Result<Json<ApiResponse<ArticleItem>>, ApiError> {
    let mut controller = ArticleController::new(blog.clone(), article.clone(), state.sanitizer.clone());
    controller.load(state.provider.as_ref()).await;

    match controller.view() {
        ArticleView::Article(found) => Ok(Json(ApiResponse::new(
            req_id.0,
            ArticleItem::new(found.clone(), &state.settings.site_name),
        ))),
        ArticleView::NotFound => Err(ApiError::new(
            req_id.0,
            "not_found",
            format!("article {blog}/{article} not found"),
        )),
        ArticleView::Failed(_) | ArticleView::Loading => Err(upstream_error(req_id.0, "the article")),
    }
}
