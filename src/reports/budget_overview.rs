//! Budget Overview Report
//!
//! Shows each budget's limit against actual spending, with utilization and
//! status, plus overall totals.

use std::io::Write;

use crate::error::FinboardResult;
use crate::models::{Budget, BudgetPeriod, BudgetStatus, Category, Money};
use crate::services::Backend;

use super::metrics;

/// One budget's line in the report
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetReportRow {
    pub category: Category,
    pub period: BudgetPeriod,
    pub limit: Money,
    pub spent: Money,
    /// Negative once over the limit
    pub remaining: Money,
    /// Percent of the limit spent
    pub utilization: f64,
    pub status: BudgetStatus,
}

impl BudgetReportRow {
    pub fn from_budget(budget: &Budget) -> Self {
        Self {
            category: budget.category,
            period: budget.period,
            limit: budget.limit,
            spent: budget.spent,
            remaining: budget.remaining(),
            utilization: metrics::budget_utilization(budget),
            status: metrics::budget_status(budget),
        }
    }

    pub fn is_over_limit(&self) -> bool {
        self.remaining.is_negative()
    }

    pub fn needs_attention(&self) -> bool {
        self.status != BudgetStatus::Normal
    }
}

#[derive(Debug, Clone)]
pub struct BudgetOverviewReport {
    /// Rows in budget order
    pub rows: Vec<BudgetReportRow>,
    pub total_limit: Money,
    pub total_spent: Money,
    pub total_remaining: Money,
    /// Total spent as a percent of the total limit; 0 without budgets
    pub overall_utilization: f64,
}

impl BudgetOverviewReport {
    pub fn from_budgets(budgets: &[Budget]) -> Self {
        let rows = budgets.iter().map(BudgetReportRow::from_budget).collect();
        let total_limit = metrics::total_budget(budgets);
        let total_spent = metrics::total_spent(budgets);

        Self {
            rows,
            total_limit,
            total_spent,
            total_remaining: total_limit - total_spent,
            overall_utilization: total_spent.percent_of(total_limit).unwrap_or(0.0),
        }
    }

    /// Generate the report from the current budgets
    pub async fn generate(backend: &Backend) -> FinboardResult<Self> {
        let budgets = backend.budgets().get_all().await?;
        Ok(Self::from_budgets(&budgets))
    }

    /// Rows at warning or critical status
    pub fn attention_rows(&self) -> impl Iterator<Item = &BudgetReportRow> {
        self.rows.iter().filter(|r| r.needs_attention())
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Budget Overview\n");
        output.push_str(&"=".repeat(80));
        output.push('\n');
        output.push_str(&format!(
            "Overall Utilization: {:.1}%\n\n",
            self.overall_utilization
        ));

        output.push_str(&format!(
            "{:<16} {:<8} {:>12} {:>12} {:>12} {:>7} {:<8}\n",
            "Category", "Period", "Limit", "Spent", "Remaining", "Used", "Status"
        ));
        output.push_str(&"-".repeat(80));
        output.push('\n');

        for row in &self.rows {
            let remaining_display = if row.is_over_limit() {
                format!("{} *", row.remaining)
            } else {
                row.remaining.to_string()
            };

            output.push_str(&format!(
                "{:<16} {:<8} {:>12} {:>12} {:>12} {:>6.1}% {:<8}\n",
                row.category,
                row.period,
                row.limit,
                row.spent,
                remaining_display,
                row.utilization,
                row.status
            ));
        }

        output.push_str(&"-".repeat(80));
        output.push('\n');
        output.push_str(&format!(
            "{:<25} {:>12} {:>12} {:>12}\n",
            "TOTAL", self.total_limit, self.total_spent, self.total_remaining
        ));

        output.push_str("\n* = Over limit\n");

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> FinboardResult<()> {
        let mut csv = csv::Writer::from_writer(writer);

        csv.write_record([
            "Category",
            "Period",
            "Limit",
            "Spent",
            "Remaining",
            "Utilization",
            "Status",
        ])?;

        for row in &self.rows {
            csv.write_record([
                row.category.to_string(),
                row.period.to_string(),
                format!("{:.2}", row.limit.as_units_f64()),
                format!("{:.2}", row.spent.as_units_f64()),
                format!("{:.2}", row.remaining.as_units_f64()),
                format!("{:.1}", row.utilization),
                row.status.to_string(),
            ])?;
        }

        csv.write_record([
            "TOTAL".to_string(),
            String::new(),
            format!("{:.2}", self.total_limit.as_units_f64()),
            format!("{:.2}", self.total_spent.as_units_f64()),
            format!("{:.2}", self.total_remaining.as_units_f64()),
            format!("{:.1}", self.overall_utilization),
            String::new(),
        ])?;

        csv.flush()?;
        Ok(())
    }
}
