//! Page slices of an ordered result set

use serde::Serialize;

/// One page of results plus the counts needed for paging controls
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number
    pub page: usize,
    pub page_size: usize,
    /// Number of results across all pages
    pub total_count: usize,
    /// Zero when there are no results
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Cut page `page` out of `all`
    ///
    /// Page 0 is treated as page 1. A page past the end is empty but keeps
    /// the totals.
    pub fn slice(all: Vec<T>, page: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let page = page.max(1);
        let total_count = all.len();
        let total_pages = total_count.div_ceil(page_size);

        let start = (page - 1).saturating_mul(page_size);
        let items = all.into_iter().skip(start).take(page_size).collect();

        Self {
            items,
            page,
            page_size,
            total_count,
            total_pages,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// 1-based positions of the first and last item on this page, for
    /// "Showing 11 to 20 of 23"
    pub fn item_range(&self) -> Option<(usize, usize)> {
        if self.items.is_empty() {
            return None;
        }
        let first = (self.page - 1) * self.page_size + 1;
        Some((first, first + self.items.len() - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slices() {
        let items: Vec<u32> = (1..=23).collect();

        let third = Page::slice(items.clone(), 3, 10);
        assert_eq!(third.items, vec![21, 22, 23]);
        assert_eq!(third.total_pages, 3);
        assert!(!third.has_next());
        assert!(third.has_previous());
        assert_eq!(third.item_range(), Some((21, 23)));
    }

    #[test]
    fn test_page_zero_is_first() {
        let page = Page::slice(vec![1, 2, 3], 0, 2);
        assert_eq!(page.page, 1);
        assert_eq!(page.items, vec![1, 2]);
    }

    #[test]
    fn test_past_end_is_empty() {
        let page = Page::slice(vec![1, 2, 3], 5, 2);
        assert!(page.is_empty());
        assert_eq!(page.total_count, 3);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.item_range(), None);
    }

    #[test]
    fn test_no_results() {
        let page: Page<u32> = Page::slice(Vec::new(), 1, 10);
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next());
        assert!(!page.has_previous());
    }
}
