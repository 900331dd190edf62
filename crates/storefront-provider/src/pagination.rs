//! Cursor pagination over Storefront connections.
//!
//! A connection reports `pageInfo { hasNextPage endCursor }`. The next page is
//! requested by passing `endCursor` back as the `after` variable. The
//! Storefront API caps `first` at [`MAX_PAGE_SIZE`], so a caller asking for
//! more items than that is served across several pages.

use crate::types::PageInfo;

/// Largest `first` argument the Storefront API accepts.
pub const MAX_PAGE_SIZE: u32 = 250;

/// Returns the cursor for the next page, or `None` when the connection is
/// exhausted.
///
/// A connection that claims another page but returns no cursor (or an empty
/// one) is treated as exhausted rather than re-requesting the first page.
#[must_use]
pub fn next_cursor(page_info: &PageInfo) -> Option<String> {
    if !page_info.has_next_page {
        return None;
    }
    page_info
        .end_cursor
        .as_deref()
        .filter(|cursor| !cursor.is_empty())
        .map(str::to_owned)
}

/// Size of the next page request given how many items are still wanted.
#[must_use]
pub fn page_size(remaining: u32) -> u32 {
    remaining.min(MAX_PAGE_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(has_next_page: bool, end_cursor: Option<&str>) -> PageInfo {
        PageInfo {
            has_next_page,
            end_cursor: end_cursor.map(str::to_owned),
        }
    }

    #[test]
    fn returns_none_on_last_page() {
        assert!(next_cursor(&info(false, Some("abc"))).is_none());
    }

    #[test]
    fn returns_cursor_when_more_pages_exist() {
        assert_eq!(
            next_cursor(&info(true, Some("eyJsYXN0X2lkIjo2fQ"))).as_deref(),
            Some("eyJsYXN0X2lkIjo2fQ")
        );
    }

    #[test]
    fn returns_none_when_cursor_missing() {
        assert!(next_cursor(&info(true, None)).is_none());
    }

    #[test]
    fn returns_none_when_cursor_empty() {
        assert!(next_cursor(&info(true, Some(""))).is_none());
    }

    #[test]
    fn page_size_caps_at_storefront_maximum() {
        assert_eq!(page_size(50), 50);
        assert_eq!(page_size(250), 250);
        assert_eq!(page_size(600), 250);
    }
}
