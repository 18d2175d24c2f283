//! Transaction service operations

use chrono::{NaiveDate, Utc};
use tracing::debug;

use super::{CallKind, TransactionService};
use crate::error::FinboardResult;
use crate::models::{AccountId, Money, Transaction};
use crate::query::{TransactionPage, TransactionQuery};
use crate::reports::metrics::{self, CategorySpending, MonthlyTotals};

impl TransactionService<'_> {
    /// Expense total for the current calendar month
    pub async fn get_monthly_spending(&self) -> FinboardResult<Money> {
        self.get_monthly_spending_in(Utc::now().date_naive()).await
    }

    /// Expense total for the calendar month containing `day`
    pub async fn get_monthly_spending_in(&self, day: NaiveDate) -> FinboardResult<Money> {
        Ok(self.get_monthly_totals_in(day).await?.expense)
    }

    /// Income and expense totals for the calendar month containing `day`
    pub async fn get_monthly_totals_in(&self, day: NaiveDate) -> FinboardResult<MonthlyTotals> {
        self.latency.simulate(CallKind::Aggregate).await;
        let transactions = self.collection().get_all()?;
        let totals = metrics::monthly_totals(&transactions, day);
        debug!(month = %day.format("%Y-%m"), income = %totals.income, expense = %totals.expense, "monthly totals");
        Ok(totals)
    }

    /// Lifetime expense total per category
    pub async fn get_category_spending(&self) -> FinboardResult<CategorySpending> {
        self.latency.simulate(CallKind::Aggregate).await;
        let transactions = self.collection().get_all()?;
        Ok(metrics::category_spending(&transactions))
    }

    /// Transactions posted to one account, in insertion order
    pub async fn get_by_account(&self, account_id: AccountId) -> FinboardResult<Vec<Transaction>> {
        self.latency.simulate(CallKind::List).await;
        self.collection().filter(|t| t.account_id == account_id)
    }

    /// Run the filter, sort and paginate pipeline over every transaction
    pub async fn search(&self, query: &TransactionQuery, page: usize) -> FinboardResult<TransactionPage> {
        self.latency.simulate(CallKind::List).await;
        let transactions = self.collection().get_all()?;
        Ok(query.run(&transactions, page))
    }
}
