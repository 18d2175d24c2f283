//! Transaction CLI commands

use clap::Subcommand;

use crate::display::transaction::{format_transaction_details, format_transaction_page};
use crate::error::{FinboardError, FinboardResult};
use crate::models::TransactionId;
use crate::query::{CategoryFilter, SortDirection, SortKey, TransactionQuery, TypeFilter};
use crate::services::Backend;

use super::parse_id;

/// Transaction subcommands
#[derive(Subcommand, Debug)]
pub enum TransactionCommands {
    /// Search, filter, sort and page through transactions
    List {
        /// Case-insensitive text matched against merchant and category
        #[arg(short, long, default_value = "")]
        search: String,
        /// income, expense or all
        #[arg(short = 't', long = "type", default_value = "all")]
        kind: String,
        /// Category name or all
        #[arg(short, long, default_value = "all")]
        category: String,
        /// date, amount, merchant or category
        #[arg(long, default_value = "date")]
        sort: String,
        /// asc or desc
        #[arg(long, default_value = "desc")]
        order: String,
        /// Page to show (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,
        /// Rows per page (defaults to the configured page size)
        #[arg(long)]
        page_size: Option<usize>,
    },
    /// Show a single transaction
    Show {
        /// Transaction ID (e.g. "txn-4" or "4")
        transaction: String,
    },
}

fn invalid(what: &str, value: &str, valid: &str) -> FinboardError {
    FinboardError::Validation(format!(
        "Invalid {}: '{}'. Valid values: {}",
        what, value, valid
    ))
}

/// Handle a transaction command
pub async fn handle_transaction_command(
    backend: &Backend,
    default_page_size: usize,
    cmd: TransactionCommands,
) -> FinboardResult<()> {
    let service = backend.transactions();

    match cmd {
        TransactionCommands::List {
            search,
            kind,
            category,
            sort,
            order,
            page,
            page_size,
        } => {
            let type_filter = TypeFilter::parse(&kind)
                .ok_or_else(|| invalid("type", &kind, "income, expense, all"))?;
            let category_filter = CategoryFilter::parse(&category)
                .ok_or_else(|| invalid("category", &category, "a category name or all"))?;
            let sort_key = SortKey::parse(&sort)
                .ok_or_else(|| invalid("sort key", &sort, "date, amount, merchant, category"))?;
            let direction = SortDirection::parse(&order)
                .ok_or_else(|| invalid("order", &order, "asc, desc"))?;

            let query = TransactionQuery::new()
                .with_search(search)
                .with_type(type_filter)
                .with_category(category_filter)
                .sorted_by(sort_key, direction)
                .with_page_size(page_size.unwrap_or(default_page_size));

            let result = service.search(&query, page).await?;
            print!("{}", format_transaction_page(&result, &query));
        }

        TransactionCommands::Show { transaction } => {
            let id: TransactionId = parse_id(&transaction, "transaction")?;
            let txn = service
                .get_by_id(id)
                .await?
                .ok_or_else(|| FinboardError::transaction_not_found(id.to_string()))?;
            let account = backend.accounts().get_by_id(txn.account_id).await?;
            print!(
                "{}",
                format_transaction_details(&txn, account.as_ref().map(|a| a.name.as_str()))
            );
        }
    }

    Ok(())
}
