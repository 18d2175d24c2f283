//! Transaction display formatting
//!
//! Register rows, paged listings and single-transaction details.

use crate::models::{Transaction, TransactionKind};
use crate::query::{CategoryFilter, Page, SortDirection, TransactionQuery, TypeFilter};

use super::report::truncate;

/// Format a single transaction as a register row
pub fn format_transaction_row(txn: &Transaction) -> String {
    let kind_icon = match txn.kind {
        TransactionKind::Income => "+",
        TransactionKind::Expense => "-",
    };

    format!(
        "{} {} {:<9} {:<24} {:<14} {:>12}",
        kind_icon,
        txn.date.format("%Y-%m-%d"),
        txn.id.to_string(),
        truncate(&txn.merchant, 24),
        txn.category,
        txn.amount
    )
}

/// Format a list of transactions as a register
pub fn format_transaction_register(transactions: &[Transaction]) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = register_header();
    for txn in transactions {
        output.push_str(&format_transaction_row(txn));
        output.push('\n');
    }

    output
}

/// Format one page of a transaction query with its paging footer
pub fn format_transaction_page(page: &Page<Transaction>, query: &TransactionQuery) -> String {
    let mut output = String::new();

    let mut filters = Vec::new();
    if !query.search.is_empty() {
        filters.push(format!("search \"{}\"", query.search));
    }
    if let TypeFilter::Only(kind) = query.type_filter {
        filters.push(format!("type {}", kind));
    }
    if let CategoryFilter::Only(category) = query.category_filter {
        filters.push(format!("category {}", category));
    }
    if !filters.is_empty() {
        output.push_str(&format!("Filters: {}\n", filters.join(", ")));
    }
    output.push_str(&format!(
        "Sorted by {} ({})\n\n",
        query.sort_key,
        match query.direction {
            SortDirection::Asc => "ascending",
            SortDirection::Desc => "descending",
        }
    ));

    output.push_str(&format_transaction_register(&page.items));

    output.push('\n');
    match page.item_range() {
        Some((first, last)) => output.push_str(&format!(
            "Showing {} to {} of {} results (page {} of {})\n",
            first, last, page.total_count, page.page, page.total_pages
        )),
        None if page.total_count > 0 => output.push_str(&format!(
            "Page {} is past the last page ({} of {} results)\n",
            page.page, page.total_pages, page.total_count
        )),
        None => {}
    }

    output
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, account_name: Option<&str>) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d")));
    output.push_str(&format!("Amount:      {}\n", txn.amount));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!("Merchant:    {}\n", txn.merchant));
    output.push_str(&format!("Category:    {}\n", txn.category));

    match account_name {
        Some(name) => output.push_str(&format!("Account:     {} ({})\n", name, txn.account_id)),
        None => output.push_str(&format!("Account:     {} (unknown)\n", txn.account_id)),
    }

    output
}

fn register_header() -> String {
    let mut output = format!(
        "{:1} {:10} {:<9} {:<24} {:<14} {:>12}\n",
        "", "Date", "ID", "Merchant", "Category", "Amount"
    );
    output.push_str(&"-".repeat(76));
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountId, Category, Money, TransactionId};
    use chrono::NaiveDate;

    fn txn(id: u64, merchant: &str) -> Transaction {
        Transaction {
            id: TransactionId::new(id),
            account_id: AccountId::new(3),
            amount: Money::from_cents(-1_875),
            merchant: merchant.to_string(),
            category: Category::Dining,
            kind: TransactionKind::Expense,
            date: NaiveDate::from_ymd_opt(2025, 8, 7).unwrap(),
        }
    }

    #[test]
    fn test_format_row() {
        let row = format_transaction_row(&txn(5, "Blue Bottle Coffee"));
        assert!(row.starts_with("- 2025-08-07"));
        assert!(row.contains("Blue Bottle Coffee"));
        assert!(row.contains("-$18.75"));
    }

    #[test]
    fn test_format_page_footer() {
        let items: Vec<Transaction> = (1..=12).map(|i| txn(i, "Cafe")).collect();
        let query = TransactionQuery::new().with_search("cafe");
        let page = query.run(&items, 2);

        let output = format_transaction_page(&page, &query);
        assert!(output.contains("Filters: search \"cafe\""));
        assert!(output.contains("Sorted by date (descending)"));
        assert!(output.contains("Showing 11 to 12 of 12 results (page 2 of 2)"));
    }

    #[test]
    fn test_format_details_without_account() {
        let output = format_transaction_details(&txn(5, "Blue Bottle Coffee"), None);
        assert!(output.contains("Account:     acc-3 (unknown)"));
    }
}
