//! Account display formatting
//!
//! Formats accounts for terminal output in table and detail views.

use crate::models::{Account, Money, Transaction};
use crate::reports::metrics;

use super::transaction::format_transaction_register;

/// Format a list of accounts as a table with a net worth footer
pub fn format_account_list(accounts: &[Account]) -> String {
    if accounts.is_empty() {
        return "No accounts found.\n".to_string();
    }

    let name_width = accounts
        .iter()
        .map(|a| a.name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let type_width = accounts
        .iter()
        .map(|a| a.account_type.to_string().len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<8}  {:<name_width$}  {:<type_width$}  {:>14}  {}\n",
        "ID",
        "Name",
        "Type",
        "Balance",
        "Last Sync",
        name_width = name_width,
        type_width = type_width,
    ));

    output.push_str(&format!(
        "{:-<8}  {:-<name_width$}  {:-<type_width$}  {:->14}  {:-<16}\n",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
        type_width = type_width,
    ));

    for account in accounts {
        output.push_str(&format!(
            "{:<8}  {:<name_width$}  {:<type_width$}  {:>14}  {}\n",
            account.id.to_string(),
            account.name,
            account.account_type,
            account.balance,
            account.last_sync.format("%Y-%m-%d %H:%M"),
            name_width = name_width,
            type_width = type_width,
        ));
    }

    output.push_str(&format!(
        "{:-<8}  {:-<name_width$}  {:-<type_width$}  {:->14}\n",
        "",
        "",
        "",
        "",
        name_width = name_width,
        type_width = type_width,
    ));

    let net_worth: Money = metrics::net_worth(accounts);
    output.push_str(&format!(
        "{:<8}  {:<name_width$}  {:<type_width$}  {:>14}\n",
        "",
        "NET WORTH",
        "",
        net_worth,
        name_width = name_width,
        type_width = type_width,
    ));

    output
}

/// Format a single account's details with its transactions
pub fn format_account_details(account: &Account, transactions: &[Transaction]) -> String {
    let mut output = String::new();

    output.push_str(&format!("Account: {}\n", account.name));
    output.push_str(&format!("  Type:           {}\n", account.account_type));
    output.push_str(&format!("  ID:             {}\n", account.id));
    output.push_str(&format!("  Balance:        {}\n", account.balance));
    if account.account_type.is_liability() {
        output.push_str(&format!(
            "  Net Worth:      {}\n",
            account.net_worth_contribution()
        ));
    }
    output.push_str(&format!(
        "  Last Sync:      {}\n",
        account.last_sync.format("%Y-%m-%d %H:%M UTC")
    ));

    output.push('\n');
    output.push_str(&format!("Transactions ({})\n", transactions.len()));
    output.push_str(&format_transaction_register(transactions));

    output
}
