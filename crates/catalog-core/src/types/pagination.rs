//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Default page number.
pub const DEFAULT_PAGE_NUMBER: u64 = 1;
/// Default page size.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Page number and page size, bound once per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParameters {
    /// Page number (1-based).
    #[serde(default = "default_page_number")]
    #[validate(range(min = 1, message = "pageNumber must be at least 1"))]
    pub page_number: u64,
    /// Number of items per page.
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, message = "pageSize must be at least 1"))]
    pub page_size: u64,
}

impl PaginationParameters {
    /// Create new pagination parameters.
    pub fn new(page_number: u64, page_size: u64) -> Self {
        Self {
            page_number,
            page_size,
        }
    }

    /// Number of documents to skip: `(page_number - 1) * page_size`.
    ///
    /// `None` when the product does not fit in a `u64`.
    pub fn offset(&self) -> Option<u64> {
        self.page_number.saturating_sub(1).checked_mul(self.page_size)
    }
}

impl Default for PaginationParameters {
    fn default() -> Self {
        Self {
            page_number: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Query-string parameters of paged list endpoints: pagination plus an
/// optional free-text search and an optional sort specification.
///
/// The pagination fields are declared inline rather than flattened because
/// `serde_urlencoded` cannot parse numbers through `#[serde(flatten)]`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QueryParameters {
    /// Page number (1-based, default: 1).
    #[serde(default = "default_page_number")]
    #[validate(range(min = 1, message = "pageNumber must be at least 1"))]
    pub page_number: u64,
    /// Items per page (default: 10).
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, message = "pageSize must be at least 1"))]
    pub page_size: u64,
    /// Free text matched against every field.
    pub search_string: Option<String>,
    /// Sort specification, e.g. `"name asc, createdAt desc"`.
    pub sort_by: Option<String>,
}

impl Default for QueryParameters {
    fn default() -> Self {
        Self {
            page_number: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
            search_string: None,
            sort_by: None,
        }
    }
}

/// One page of results.
///
/// Immutable once built; the derived fields are computed by [`PagedList::new`]
/// and serialized alongside the page itself.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedList<T> {
    items: Vec<T>,
    total_count: u64,
    page_number: u64,
    page_size: u64,
    total_pages: u64,
    has_previous_page: bool,
    has_next_page: bool,
}

impl<T> PagedList<T> {
    /// Build a page from its items, the total number of matches, and the
    /// requested page number and size.
    pub fn new(items: Vec<T>, total_count: u64, page_number: u64, page_size: u64) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total_count.div_ceil(page_size)
        };
        Self {
            items,
            total_count,
            page_number,
            page_size,
            total_pages,
            has_previous_page: page_number > 1,
            has_next_page: page_number < total_pages,
        }
    }

    /// The items on this page.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Total number of matches across all pages.
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Page number (1-based).
    pub fn page_number(&self) -> u64 {
        self.page_number
    }

    /// Requested page size.
    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// `ceil(total_count / page_size)`.
    pub fn total_pages(&self) -> u64 {
        self.total_pages
    }

    /// Whether a page precedes this one.
    pub fn has_previous_page(&self) -> bool {
        self.has_previous_page
    }

    /// Whether a page follows this one.
    pub fn has_next_page(&self) -> bool {
        self.has_next_page
    }
}

fn default_page_number() -> u64 {
    DEFAULT_PAGE_NUMBER
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        let page = PagedList::new(vec![1, 2, 3], 25, 1, 10);
        assert_eq!(page.total_pages(), 3);

        let exact = PagedList::<u8>::new(vec![], 20, 1, 10);
        assert_eq!(exact.total_pages(), 2);

        let none = PagedList::<u8>::new(vec![], 0, 1, 10);
        assert_eq!(none.total_pages(), 0);
        assert!(!none.has_next_page());
    }

    #[test]
    fn test_previous_and_next_flags() {
        let first = PagedList::<u8>::new(vec![], 25, 1, 10);
        assert!(!first.has_previous_page());
        assert!(first.has_next_page());

        let middle = PagedList::<u8>::new(vec![], 25, 2, 10);
        assert!(middle.has_previous_page());
        assert!(middle.has_next_page());

        let last = PagedList::<u8>::new(vec![], 25, 3, 10);
        assert!(last.has_previous_page());
        assert!(!last.has_next_page());

        let beyond = PagedList::<u8>::new(vec![], 25, 7, 10);
        assert!(!beyond.has_next_page());
    }

    #[test]
    fn test_offset() {
        assert_eq!(PaginationParameters::new(1, 10).offset(), Some(0));
        assert_eq!(PaginationParameters::new(3, 10).offset(), Some(20));
        assert_eq!(PaginationParameters::new(0, 10).offset(), Some(0));
    }

    #[test]
    fn test_offset_overflow_is_none() {
        assert_eq!(PaginationParameters::new(u64::MAX, 10).offset(), None);
        assert_eq!(PaginationParameters::new(2, u64::MAX).offset(), Some(u64::MAX));
        assert_eq!(PaginationParameters::new(3, u64::MAX).offset(), None);
    }

    #[test]
    fn test_defaults() {
        let params = PaginationParameters::default();
        assert_eq!(params.page_number, 1);
        assert_eq!(params.page_size, 10);

        let query: QueryParameters = serde_json::from_str("{}").unwrap();
        assert_eq!(query.page_number, params.page_number);
        assert_eq!(query.page_size, params.page_size);
        assert!(query.search_string.is_none());
        assert!(query.sort_by.is_none());
    }

    #[test]
    fn test_validation_rejects_zero() {
        assert!(PaginationParameters::new(1, 1).validate().is_ok());
        assert!(PaginationParameters::new(0, 10).validate().is_err());
        assert!(PaginationParameters::new(1, 0).validate().is_err());

        let query: QueryParameters =
            serde_json::from_str(r#"{"pageNumber": 2, "pageSize": 0}"#).unwrap();
        assert!(query.validate().is_err());
    }

    #[test]
    fn test_serializes_derived_fields_in_camel_case() {
        let page = PagedList::new(vec!["a"], 11, 2, 10);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["items"], serde_json::json!(["a"]));
        assert_eq!(json["totalCount"], 11);
        assert_eq!(json["pageNumber"], 2);
        assert_eq!(json["pageSize"], 10);
        assert_eq!(json["totalPages"], 2);
        assert_eq!(json["hasPreviousPage"], true);
        assert_eq!(json["hasNextPage"], false);
    }
}
