//! GraphQL documents sent to the Storefront API.

const ARTICLE_FIELDS: &str = r"
fragment ArticleFields on Article {
  id
  title
  handle
  publishedAt
  excerpt
  contentHtml
  authorV2 { name }
  image { url altText }
  blog { handle title }
}
";

pub(crate) const COLLECTION_PRODUCTS: &str = r"
query CollectionProducts($handle: String!, $first: Int!, $after: String) {
  collection(handle: $handle) {
    products(first: $first, after: $after) {
      pageInfo { hasNextPage endCursor }
      edges {
        node {
          id
          title
          handle
          priceRange { minVariantPrice { amount currencyCode } }
          featuredImage { url altText }
          images(first: 1) { edges { node { url altText } } }
          variants(first: 1) {
            edges { node { id availableForSale price { amount currencyCode } } }
          }
        }
      }
    }
  }
}
";

const ARTICLES: &str = r"
query Articles($first: Int!, $after: String) {
  articles(first: $first, after: $after, sortKey: PUBLISHED_AT, reverse: true) {
    pageInfo { hasNextPage endCursor }
    edges { node { ...ArticleFields } }
  }
}
";

const ARTICLE_BY_HANDLE: &str = r"
query ArticleByHandle($blogHandle: String!, $articleHandle: String!) {
  blog(handle: $blogHandle) {
    handle
    title
    articleByHandle(handle: $articleHandle) { ...ArticleFields }
  }
}
";

/// Full article-list document, fragment included.
pub(crate) fn articles() -> String {
    format!("{ARTICLES}{ARTICLE_FIELDS}")
}

/// Full article-by-handle document, fragment included.
pub(crate) fn article_by_handle() -> String {
    format!("{ARTICLE_BY_HANDLE}{ARTICLE_FIELDS}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn article_documents_carry_the_fragment() {
        assert!(articles().contains("fragment ArticleFields on Article"));
        assert!(article_by_handle().contains("fragment ArticleFields on Article"));
    }

    #[test]
    fn collection_query_requests_first_variant_only() {
        assert!(COLLECTION_PRODUCTS.contains("variants(first: 1)"));
    }
}
