//! Net Worth Report
//!
//! Groups account balances by type and totals assets, liabilities and the
//! investment portfolio.

use std::collections::HashMap;
use std::io::Write;

use chrono::{DateTime, Utc};

use crate::error::FinboardResult;
use crate::models::{Account, AccountId, AccountType, Money};
use crate::services::Backend;

use super::metrics;

/// Summary of a single account's balance
#[derive(Debug, Clone)]
pub struct AccountBalance {
    pub account_id: AccountId,
    pub account_name: String,
    pub account_type: AccountType,
    /// Stored balance; credit balances are the debt owed
    pub balance: Money,
    pub last_sync: DateTime<Utc>,
}

/// Accounts of one type
#[derive(Debug, Clone)]
pub struct AccountTypeGroup {
    pub account_type: AccountType,
    pub accounts: Vec<AccountBalance>,
    pub total_balance: Money,
}

impl AccountTypeGroup {
    pub fn new(account_type: AccountType) -> Self {
        Self {
            account_type,
            accounts: Vec::new(),
            total_balance: Money::zero(),
        }
    }

    pub fn add_account(&mut self, account: AccountBalance) {
        self.total_balance += account.balance;
        self.accounts.push(account);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetWorthSummary {
    /// Checking, savings and investment balances
    pub total_assets: Money,
    /// Credit balances, as a positive amount owed
    pub total_liabilities: Money,
    pub net_worth: Money,
    /// Investment balances only
    pub investment_total: Money,
}

#[derive(Debug, Clone)]
pub struct NetWorthReport {
    /// Assets first, then liabilities
    pub groups: Vec<AccountTypeGroup>,
    pub summary: NetWorthSummary,
}

impl NetWorthReport {
    /// Build the report from a set of accounts
    pub fn from_accounts(accounts: &[Account]) -> Self {
        let mut groups: HashMap<AccountType, AccountTypeGroup> = HashMap::new();

        for account in accounts {
            groups
                .entry(account.account_type)
                .or_insert_with(|| AccountTypeGroup::new(account.account_type))
                .add_account(AccountBalance {
                    account_id: account.id,
                    account_name: account.name.clone(),
                    account_type: account.account_type,
                    balance: account.balance,
                    last_sync: account.last_sync,
                });
        }

        let mut groups: Vec<_> = groups.into_values().collect();
        groups.sort_by_key(|g| account_type_sort_order(g.account_type));

        let investment_total = groups
            .iter()
            .filter(|g| g.account_type == AccountType::Investment)
            .map(|g| g.total_balance)
            .sum();

        let summary = NetWorthSummary {
            total_assets: metrics::total_assets(accounts),
            total_liabilities: metrics::total_liabilities(accounts),
            net_worth: metrics::net_worth(accounts),
            investment_total,
        };

        Self { groups, summary }
    }

    /// Generate the report from the backend's accounts
    pub async fn generate(backend: &Backend) -> FinboardResult<Self> {
        let accounts = backend.accounts().get_all().await?;
        Ok(Self::from_accounts(&accounts))
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Net Worth Report\n");
        output.push_str(&"=".repeat(70));
        output.push('\n');

        output.push_str(&format!(
            "Total Assets:      {:>15}\n",
            self.summary.total_assets
        ));
        output.push_str(&format!(
            "Total Liabilities: {:>15}\n",
            self.summary.total_liabilities
        ));
        output.push_str(&"-".repeat(35));
        output.push('\n');
        output.push_str(&format!(
            "Net Worth:         {:>15}\n",
            self.summary.net_worth
        ));
        output.push('\n');
        output.push_str(&format!(
            "Investments:       {:>15}\n",
            self.summary.investment_total
        ));
        output.push('\n');

        output.push_str(&format!(
            "{:<30} {:>14} {:>20}\n",
            "Account", "Balance", "Last Sync"
        ));
        output.push_str(&"-".repeat(70));
        output.push('\n');

        for group in &self.groups {
            output.push_str(&format!(
                "\n{}\n",
                group.account_type.to_string().to_uppercase()
            ));

            for account in &group.accounts {
                output.push_str(&format!(
                    "  {:<28} {:>14} {:>20}\n",
                    account.account_name,
                    account.balance,
                    account.last_sync.format("%Y-%m-%d %H:%M")
                ));
            }

            output.push_str(&format!(
                "  {:<28} {:>14}\n",
                "Subtotal:", group.total_balance
            ));
        }

        output.push_str(&"-".repeat(70));
        output.push('\n');

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> FinboardResult<()> {
        let mut csv = csv::Writer::from_writer(writer);

        csv.write_record(["Account Type", "Account Name", "Balance", "Last Sync"])?;
        for group in &self.groups {
            for account in &group.accounts {
                csv.write_record([
                    group.account_type.to_string(),
                    account.account_name.clone(),
                    format!("{:.2}", account.balance.as_units_f64()),
                    account.last_sync.to_rfc3339(),
                ])?;
            }
        }

        let summary_rows = [
            ("Total Assets", self.summary.total_assets),
            ("Total Liabilities", self.summary.total_liabilities),
            ("Net Worth", self.summary.net_worth),
            ("Investments", self.summary.investment_total),
        ];
        for (label, amount) in summary_rows {
            csv.write_record([
                "SUMMARY".to_string(),
                label.to_string(),
                format!("{:.2}", amount.as_units_f64()),
                String::new(),
            ])?;
        }

        csv.flush()?;
        Ok(())
    }

    pub fn account_count(&self) -> usize {
        self.groups.iter().map(|g| g.accounts.len()).sum()
    }
}

/// Assets first, then liabilities
fn account_type_sort_order(account_type: AccountType) -> i32 {
    match account_type {
        AccountType::Checking => 0,
        AccountType::Savings => 1,
        AccountType::Investment => 2,
        AccountType::Credit => 10,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_generate_net_worth_report() {
        let backend = Backend::seeded().unwrap();
        let report = NetWorthReport::generate(&backend).await.unwrap();

        assert_eq!(report.account_count(), 5);
        assert_eq!(report.summary.total_assets.cents(), 9_142_430);
        assert_eq!(report.summary.total_liabilities.cents(), 184_275);
        assert_eq!(report.summary.net_worth.cents(), 8_958_155);
        assert_eq!(report.summary.investment_total.cents(), 6_793_080);

        let order: Vec<AccountType> = report.groups.iter().map(|g| g.account_type).collect();
        assert_eq!(
            order,
            vec![
                AccountType::Checking,
                AccountType::Savings,
                AccountType::Investment,
                AccountType::Credit
            ]
        );
    }

    #[test]
    fn test_empty_report() {
        let report = NetWorthReport::from_accounts(&[]);
        assert_eq!(report.account_count(), 0);
        assert!(report.summary.net_worth.is_zero());
        assert!(report.format_terminal().contains("Net Worth Report"));
    }

    #[tokio::test]
    async fn test_csv_export() {
        let backend = Backend::seeded().unwrap();
        let report = NetWorthReport::generate(&backend).await.unwrap();

        let mut csv_output = Vec::new();
        report.export_csv(&mut csv_output).unwrap();

        let csv_string = String::from_utf8(csv_output).unwrap();
        let mut lines = csv_string.lines();
        assert_eq!(lines.next(), Some("Account Type,Account Name,Balance,Last Sync"));
        assert!(csv_string.contains("Credit Card,Sapphire Credit Card,1842.75,"));
        assert!(csv_string.contains("SUMMARY,Net Worth,89581.55,"));
    }
}
