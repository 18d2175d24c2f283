//! Budget service operations
//!
//! Budgets are keyed by category. Their `spent` field is recomputed from
//! the expense transactions every time a budget is read.

use super::{BudgetService, CallKind};
use crate::error::FinboardResult;
use crate::models::{Budget, Category, Money};
use crate::reports::metrics;

impl BudgetService<'_> {
    /// The budget for `category`, if one exists
    pub async fn get_by_category(&self, category: Category) -> FinboardResult<Option<Budget>> {
        self.get_by_id(category).await
    }

    /// Sum of every budget limit
    pub async fn get_total_budget(&self) -> FinboardResult<Money> {
        self.latency.simulate(CallKind::Aggregate).await;
        Ok(metrics::total_budget(&self.current()?))
    }

    /// Sum of every budget's spending
    pub async fn get_total_spent(&self) -> FinboardResult<Money> {
        self.latency.simulate(CallKind::Aggregate).await;
        Ok(metrics::total_spent(&self.current()?))
    }
}
