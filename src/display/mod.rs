//! Display formatting for terminal output
//!
//! Formats records and query results as plain-text tables and detail views.

pub mod account;
pub mod alert;
pub mod goal;
pub mod report;
pub mod transaction;

pub use account::{format_account_details, format_account_list};
pub use alert::{format_alert_list, format_insights};
pub use goal::format_goal_list;
pub use transaction::{
    format_transaction_details, format_transaction_page, format_transaction_register,
};
