pub mod article;
pub mod article_list;
pub mod catalog;
pub mod state;

#[cfg(test)]
mod test_support;

pub use article::{ArticleController, ArticleRequest, ArticleView};
pub use article_list::{ArticleListController, ArticleListRequest, DEFAULT_ARTICLE_LIMIT};
pub use catalog::{CatalogController, CatalogRequest};
pub use state::{FetchOutcome, FetchRequest, FetchState, FetchTicket};
