//! Dashboard summary
//!
//! The headline numbers for one calendar month: net worth, income and
//! expenses, savings rate, unread alerts and budget totals, plus the most
//! recent transactions.

use chrono::{Datelike, NaiveDate};

use crate::error::FinboardResult;
use crate::models::{Money, Transaction};
use crate::services::Backend;

use super::metrics::{self, MonthlyTotals};

/// Number of transactions shown under "Recent Transactions"
pub const RECENT_TRANSACTIONS: usize = 5;

#[derive(Debug, Clone)]
pub struct DashboardSummary {
    /// Any day in the summarized month
    pub month: NaiveDate,
    pub net_worth: Money,
    pub monthly: MonthlyTotals,
    pub savings_rate: f64,
    pub unread_alerts: usize,
    pub total_budget: Money,
    pub total_spent: Money,
    /// Newest first
    pub recent_transactions: Vec<Transaction>,
}

impl DashboardSummary {
    /// Gather the summary for the month containing `month`
    pub async fn generate(backend: &Backend, month: NaiveDate) -> FinboardResult<Self> {
        let net_worth = backend.accounts().get_total_balance().await?;
        let monthly = backend.transactions().get_monthly_totals_in(month).await?;
        let unread_alerts = backend.alerts().get_unread_count().await?;
        let budgets = backend.budgets().get_all().await?;
        let transactions = backend.transactions().get_all().await?;

        Ok(Self {
            month,
            net_worth,
            savings_rate: monthly.savings_rate(),
            monthly,
            unread_alerts,
            total_budget: metrics::total_budget(&budgets),
            total_spent: metrics::total_spent(&budgets),
            recent_transactions: recent(&transactions, RECENT_TRANSACTIONS),
        })
    }

    pub fn monthly_income(&self) -> Money {
        self.monthly.income
    }

    pub fn monthly_expenses(&self) -> Money {
        self.monthly.expense
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Dashboard - {} {}\n",
            month_name(self.month.month()),
            self.month.year()
        ));
        output.push_str(&"=".repeat(70));
        output.push('\n');

        output.push_str(&format!("Net Worth:         {:>15}\n", self.net_worth));
        output.push_str(&format!(
            "Monthly Income:    {:>15}\n",
            self.monthly.income
        ));
        output.push_str(&format!(
            "Monthly Expenses:  {:>15}\n",
            self.monthly.expense
        ));
        output.push_str(&format!(
            "Savings Rate:      {:>14.1}%\n",
            self.savings_rate
        ));
        output.push('\n');
        output.push_str(&format!(
            "Budgeted:          {:>15}\n",
            self.total_budget
        ));
        output.push_str(&format!("Spent:             {:>15}\n", self.total_spent));
        output.push_str(&format!(
            "Unread Alerts:     {:>15}\n",
            self.unread_alerts
        ));
        output.push('\n');

        output.push_str("Recent Transactions\n");
        output.push_str(&"-".repeat(70));
        output.push('\n');
        if self.recent_transactions.is_empty() {
            output.push_str("No transactions\n");
        }
        for txn in &self.recent_transactions {
            output.push_str(&format!(
                "{}  {:<28} {:<14} {:>12}\n",
                txn.date, txn.merchant, txn.category, txn.amount
            ));
        }

        output
    }
}

/// The `count` newest transactions. Ties keep their stored order.
pub fn recent(transactions: &[Transaction], count: usize) -> Vec<Transaction> {
    let mut sorted = transactions.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(count);
    sorted
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        _ => "December",
    }
}
