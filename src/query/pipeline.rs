//! Transaction filter, sort and paginate pipeline
//!
//! Stages always run in the same order: search, type filter, category
//! filter, sort, then the page slice.

use std::cmp::Ordering;
use std::fmt;

use crate::models::{Category, Transaction, TransactionKind};

use super::page::Page;

/// Default number of rows per page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Restrict results to one transaction type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(TransactionKind),
}

impl TypeFilter {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Some(Self::All),
            other => TransactionKind::parse(other).map(Self::Only),
        }
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        match self {
            Self::All => true,
            Self::Only(kind) => txn.kind == *kind,
        }
    }
}

/// Restrict results to one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn parse(s: &str) -> Option<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Some(Self::All);
        }
        Category::parse(s).map(Self::Only)
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => txn.category == *category,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Date,
    /// Compares magnitudes
    Amount,
    Merchant,
    Category,
}

impl SortKey {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "date" => Some(Self::Date),
            "amount" => Some(Self::Amount),
            "merchant" => Some(Self::Merchant),
            "category" => Some(Self::Category),
            _ => None,
        }
    }

    /// Ascending comparison of two transactions on this key
    pub fn compare(&self, a: &Transaction, b: &Transaction) -> Ordering {
        match self {
            Self::Date => a.date.cmp(&b.date),
            Self::Amount => a.magnitude().cmp(&b.magnitude()),
            Self::Merchant => a.merchant.to_lowercase().cmp(&b.merchant.to_lowercase()),
            Self::Category => a
                .category
                .name()
                .to_lowercase()
                .cmp(&b.category.name().to_lowercase()),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date => f.pad("date"),
            Self::Amount => f.pad("amount"),
            Self::Merchant => f.pad("merchant"),
            Self::Category => f.pad("category"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Some(Self::Asc),
            "desc" | "descending" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// The inputs of the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionQuery {
    /// Case-insensitive substring of the merchant or category name
    pub search: String,
    pub type_filter: TypeFilter,
    pub category_filter: CategoryFilter,
    pub sort_key: SortKey,
    pub direction: SortDirection,
    pub page_size: usize,
}

impl Default for TransactionQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            type_filter: TypeFilter::All,
            category_filter: CategoryFilter::All,
            sort_key: SortKey::Date,
            direction: SortDirection::Desc,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl TransactionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_type(mut self, type_filter: TypeFilter) -> Self {
        self.type_filter = type_filter;
        self
    }

    pub fn with_category(mut self, category_filter: CategoryFilter) -> Self {
        self.category_filter = category_filter;
        self
    }

    pub fn sorted_by(mut self, sort_key: SortKey, direction: SortDirection) -> Self {
        self.sort_key = sort_key;
        self.direction = direction;
        self
    }

    /// Zero is treated as one
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    fn matches_search(&self, txn: &Transaction) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        txn.merchant.to_lowercase().contains(&needle)
            || txn.category.name().to_lowercase().contains(&needle)
    }

    /// Whether a transaction passes all three filters
    pub fn matches(&self, txn: &Transaction) -> bool {
        self.matches_search(txn)
            && self.type_filter.matches(txn)
            && self.category_filter.matches(txn)
    }

    /// Filtered and sorted copies of `transactions`
    ///
    /// The sort is stable, so transactions with equal keys keep their input
    /// order in either direction.
    pub fn filter_and_sort(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        let mut matched: Vec<Transaction> = transactions
            .iter()
            .filter(|t| self.matches(t))
            .cloned()
            .collect();
        matched.sort_by(|a, b| self.direction.apply(self.sort_key.compare(a, b)));
        matched
    }

    /// Run the whole pipeline and return the 1-based `page`
    pub fn run(&self, transactions: &[Transaction], page: usize) -> Page<Transaction> {
        Page::slice(self.filter_and_sort(transactions), page, self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountId, Money, TransactionId};
    use chrono::NaiveDate;

    fn txn(id: u64, merchant: &str, category: Category, cents: i64, day: (u32, u32)) -> Transaction {
        let kind = if cents > 0 {
            TransactionKind::Income
        } else {
            TransactionKind::Expense
        };
        Transaction {
            id: TransactionId::new(id),
            account_id: AccountId::new(1),
            amount: Money::from_cents(cents),
            merchant: merchant.to_string(),
            category,
            kind,
            date: NaiveDate::from_ymd_opt(2025, day.0, day.1).unwrap(),
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            txn(1, "Safeway", Category::Groceries, -9_875, (7, 4)),
            txn(2, "Costco Wholesale", Category::Groceries, -15_630, (8, 22)),
            txn(3, "Acme Payroll", Category::Salary, 420_000, (8, 1)),
            txn(4, "costco gas", Category::Gas, -4_810, (8, 24)),
            txn(5, "Sushi Zen", Category::Dining, -6_420, (7, 8)),
            txn(6, "Costco Wholesale", Category::Groceries, -2_000, (8, 3)),
        ]
    }

    fn ids(transactions: &[Transaction]) -> Vec<u64> {
        transactions.iter().map(|t| t.id.value()).collect()
    }

    #[test]
    fn test_search_matches_merchant_or_category() {
        let by_merchant = TransactionQuery::new().with_search("COSTCO");
        assert_eq!(ids(&by_merchant.filter_and_sort(&sample())), vec![4, 2, 6]);

        let by_category = TransactionQuery::new().with_search("dining");
        assert_eq!(ids(&by_category.filter_and_sort(&sample())), vec![5]);
    }

    #[test]
    fn test_search_then_sort_by_date_desc() {
        let query = TransactionQuery::new()
            .with_search("costco")
            .sorted_by(SortKey::Date, SortDirection::Desc);

        let result = query.filter_and_sort(&sample());
        assert!(result.iter().all(|t| t.date.format("%m").to_string() == "08"));
        let dates: Vec<NaiveDate> = result.iter().map(|t| t.date).collect();
        let mut expected = dates.clone();
        expected.sort_by(|a, b| b.cmp(a));
        assert_eq!(dates, expected);
    }

    #[test]
    fn test_type_and_category_filters() {
        let income = TransactionQuery::new().with_type(TypeFilter::Only(TransactionKind::Income));
        assert_eq!(ids(&income.filter_and_sort(&sample())), vec![3]);

        let groceries = TransactionQuery::new()
            .with_category(CategoryFilter::Only(Category::Groceries))
            .sorted_by(SortKey::Date, SortDirection::Asc);
        assert_eq!(ids(&groceries.filter_and_sort(&sample())), vec![1, 6, 2]);
    }

    #[test]
    fn test_amount_sort_uses_magnitude() {
        let query = TransactionQuery::new().sorted_by(SortKey::Amount, SortDirection::Desc);
        assert_eq!(ids(&query.filter_and_sort(&sample())), vec![3, 2, 1, 5, 4, 6]);
    }

    #[test]
    fn test_merchant_sort_ignores_case() {
        let query = TransactionQuery::new().sorted_by(SortKey::Merchant, SortDirection::Asc);
        let merchants: Vec<String> = query
            .filter_and_sort(&sample())
            .into_iter()
            .map(|t| t.merchant)
            .collect();
        assert_eq!(
            merchants,
            vec!["Acme Payroll", "costco gas", "Costco Wholesale", "Costco Wholesale", "Safeway", "Sushi Zen"]
        );
    }

    #[test]
    fn test_sort_is_stable_in_both_directions() {
        let query = TransactionQuery::new().sorted_by(SortKey::Category, SortDirection::Asc);
        let asc = ids(&query.filter_and_sort(&sample()));
        assert_eq!(asc, vec![5, 4, 1, 2, 6, 3]);

        let desc = ids(&query
            .clone()
            .sorted_by(SortKey::Category, SortDirection::Desc)
            .filter_and_sort(&sample()));
        assert_eq!(desc, vec![3, 1, 2, 6, 4, 5]);
    }

    #[test]
    fn test_pages_of_23() {
        let transactions: Vec<Transaction> = (1..=23)
            .map(|i| txn(i, "Shop", Category::Shopping, -100, (8, 1)))
            .collect();
        let query = TransactionQuery::new();

        let sizes: Vec<usize> = (1..=3).map(|p| query.run(&transactions, p).items.len()).collect();
        assert_eq!(sizes, vec![10, 10, 3]);

        let first = query.run(&transactions, 1);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.total_count, 23);
        // Equal dates keep input order
        assert_eq!(first.items[0].id.value(), 1);
    }

    #[test]
    fn test_parse_filters() {
        assert_eq!(TypeFilter::parse("all"), Some(TypeFilter::All));
        assert_eq!(
            TypeFilter::parse("Expense"),
            Some(TypeFilter::Only(TransactionKind::Expense))
        );
        assert_eq!(CategoryFilter::parse("ALL"), Some(CategoryFilter::All));
        assert_eq!(
            CategoryFilter::parse("gas"),
            Some(CategoryFilter::Only(Category::Gas))
        );
        assert_eq!(SortKey::parse("merchant"), Some(SortKey::Merchant));
        assert_eq!(SortDirection::parse("up"), None);
    }
}
