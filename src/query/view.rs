//! Paging state for a transaction listing
//!
//! A `TransactionView` pairs a query with the page being shown. Any change
//! to the search, filters or sort sends the view back to page 1.

use crate::models::Transaction;

use super::page::Page;
use super::pipeline::{CategoryFilter, SortDirection, SortKey, TransactionQuery, TypeFilter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionView {
    query: TransactionQuery,
    page: usize,
}

impl Default for TransactionView {
    fn default() -> Self {
        Self::new(TransactionQuery::default())
    }
}

impl TransactionView {
    pub fn new(query: TransactionQuery) -> Self {
        Self { query, page: 1 }
    }

    pub fn query(&self) -> &TransactionQuery {
        &self.query
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
        self.page = 1;
    }

    pub fn set_type_filter(&mut self, type_filter: TypeFilter) {
        self.query.type_filter = type_filter;
        self.page = 1;
    }

    pub fn set_category_filter(&mut self, category_filter: CategoryFilter) {
        self.query.category_filter = category_filter;
        self.page = 1;
    }

    pub fn set_sort_key(&mut self, sort_key: SortKey) {
        self.query.sort_key = sort_key;
        self.page = 1;
    }

    pub fn set_direction(&mut self, direction: SortDirection) {
        self.query.direction = direction;
        self.page = 1;
    }

    pub fn toggle_direction(&mut self) {
        self.set_direction(self.query.direction.toggled());
    }

    /// Jump to a page, clamped to `1..=total_pages`
    pub fn go_to(&mut self, page: usize, total_pages: usize) {
        self.page = page.clamp(1, total_pages.max(1));
    }

    pub fn next_page(&mut self, total_pages: usize) {
        self.go_to(self.page + 1, total_pages);
    }

    pub fn previous_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    /// The current page of `transactions`
    pub fn render(&self, transactions: &[Transaction]) -> Page<Transaction> {
        self.query.run(transactions, self.page)
    }
}
