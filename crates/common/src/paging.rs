use serde::{Deserialize, Serialize};

/// A single page of query results plus the metadata derived from the total
/// row count.
///
/// Page numbers are 1-based. The metadata is computed, never stored:
/// `total_pages = ceil(total_count / page_size)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagedResult<T> {
    items: Vec<T>,
    page_number: u32,
    page_size: u32,
    total_count: u64,
}

impl<T> PagedResult<T> {
    /// Wraps one page of items together with the overall row count.
    pub fn new(items: Vec<T>, page_number: u32, page_size: u32, total_count: u64) -> Self {
        Self {
            items,
            page_number,
            page_size,
            total_count,
        }
    }

    /// Returns the items on this page.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consumes the page, returning its items.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Total number of pages for the full result set.
    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total_count.div_ceil(u64::from(self.page_size))
    }

    pub fn has_previous_page(&self) -> bool {
        self.page_number > 1
    }

    pub fn has_next_page(&self) -> bool {
        u64::from(self.page_number) < self.total_pages()
    }

    /// Maps every item on the page, keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedResult<U> {
        PagedResult {
            items: self.items.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_count: self.total_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_for_middle_page() {
        let page = PagedResult::new(vec![1, 2, 3], 2, 3, 10);
        assert_eq!(page.total_pages(), 4);
        assert!(page.has_previous_page());
        assert!(page.has_next_page());
    }

    #[test]
    fn metadata_for_first_page() {
        let page = PagedResult::new(vec![1, 2], 1, 2, 5);
        assert!(!page.has_previous_page());
        assert!(page.has_next_page());
    }

    #[test]
    fn metadata_for_last_page() {
        let page = PagedResult::new(vec![5], 3, 2, 5);
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_previous_page());
        assert!(!page.has_next_page());
    }

    #[test]
    fn total_pages_rounds_up() {
        let page: PagedResult<i32> = PagedResult::new(vec![], 1, 10, 11);
        assert_eq!(page.total_pages(), 2);
    }

    #[test]
    fn empty_result_has_no_pages() {
        let page: PagedResult<i32> = PagedResult::new(vec![], 1, 10, 0);
        assert_eq!(page.total_pages(), 0);
        assert!(!page.has_previous_page());
        assert!(!page.has_next_page());
    }

    #[test]
    fn map_preserves_metadata() {
        let page = PagedResult::new(vec![1, 2], 2, 2, 6);
        let mapped = page.map(|n| n.to_string());
        assert_eq!(mapped.items(), ["1", "2"]);
        assert_eq!(mapped.page_number(), 2);
        assert_eq!(mapped.total_count(), 6);
    }

    #[test]
    fn serialization_roundtrip() {
        let page = PagedResult::new(vec![1, 2, 3], 1, 3, 3);
        let json = serde_json::to_string(&page).unwrap();
        let back: PagedResult<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, page);
    }
}
