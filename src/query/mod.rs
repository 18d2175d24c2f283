//! Transaction listing queries
//!
//! - [`TransactionQuery`]: search, type and category filters, sort key and
//!   direction, page size
//! - [`Page`]: one slice of the result with total counts
//! - [`TransactionView`]: a query plus the current page

pub mod page;
pub mod pipeline;
pub mod view;

pub use page::Page;
pub use pipeline::{
    CategoryFilter, SortDirection, SortKey, TransactionQuery, TypeFilter, DEFAULT_PAGE_SIZE,
};
pub use view::TransactionView;

use crate::models::Transaction;

pub type TransactionPage = Page<Transaction>;
