//! Reports module for Finboard
//!
//! Aggregation functions plus the dashboard, net worth, budget overview,
//! goal progress and insight reports built on top of them.

pub mod budget_overview;
pub mod dashboard;
pub mod goals;
pub mod insights;
pub mod metrics;
pub mod net_worth;

pub use budget_overview::{BudgetOverviewReport, BudgetReportRow};
pub use dashboard::DashboardSummary;
pub use goals::{GoalProgressReport, GoalProgressRow};
pub use insights::{generate_insights, Insight, InsightKind};
pub use metrics::{CategorySpending, MonthlyTotals};
pub use net_worth::{AccountBalance, AccountTypeGroup, NetWorthReport, NetWorthSummary};
