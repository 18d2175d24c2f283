//! Insights and budget alert rules
//!
//! Insights are short observations derived from the current store contents.
//! Budget alert rules turn budgets at warning or critical utilization into
//! alert drafts for the alert service.

use std::fmt;

use serde::Serialize;

use crate::error::FinboardResult;
use crate::models::{
    Alert, AlertType, Budget, BudgetStatus, Goal, Money, NewAlert, Priority, Transaction,
};
use crate::services::Backend;

use super::metrics;

/// What an insight is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Spending,
    Budget,
    Goals,
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spending => f.pad("spending"),
            Self::Budget => f.pad("budget"),
            Self::Goals => f.pad("goals"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    /// Whether the user can act on it directly
    pub actionable: bool,
}

/// Derive insights from the given records
///
/// The spending and budget insights are always present. The goals insight
/// only appears while at least one goal is still active.
pub fn generate_insights(
    transactions: &[Transaction],
    budgets: &[Budget],
    goals: &[Goal],
) -> Vec<Insight> {
    let mut insights = Vec::with_capacity(3);

    let spent: Money = metrics::category_spending(transactions).values().sum();
    insights.push(Insight {
        kind: InsightKind::Spending,
        title: "Spending Pattern Analysis".to_string(),
        description: format!("You've spent {} across all recorded expenses.", spent),
        priority: Priority::Medium,
        actionable: true,
    });

    insights.push(Insight {
        kind: InsightKind::Budget,
        title: "Budget Performance".to_string(),
        description: format!(
            "Your average budget utilization is {:.1}%.",
            metrics::average_utilization(budgets)
        ),
        priority: Priority::Low,
        actionable: false,
    });

    if let Some(progress) = metrics::average_active_goal_progress(goals) {
        insights.push(Insight {
            kind: InsightKind::Goals,
            title: "Goal Progress".to_string(),
            description: format!(
                "You're {:.1}% of the way to completing your active goals.",
                progress
            ),
            priority: Priority::Medium,
            actionable: true,
        });
    }

    insights
}

/// Insights over the backend's current records
pub async fn load_insights(backend: &Backend) -> FinboardResult<Vec<Insight>> {
    let transactions = backend.transactions().get_all().await?;
    let budgets = backend.budgets().get_all().await?;
    let goals = backend.goals().get_all().await?;
    Ok(generate_insights(&transactions, &budgets, &goals))
}

/// Message used for a budget's utilization alert
pub fn budget_alert_message(budget: &Budget) -> String {
    format!(
        "{} budget is at {:.0}% of its {} limit",
        budget.category,
        budget.utilization(),
        budget.limit
    )
}

/// Alert drafts for budgets at warning or critical status, in budget order
///
/// Critical budgets raise high priority alerts and warning budgets medium
/// ones. A budget is skipped when an unread alert with the same message
/// already exists.
pub fn budget_alerts(budgets: &[Budget], existing: &[Alert]) -> Vec<NewAlert> {
    budgets
        .iter()
        .filter_map(|budget| {
            let priority = match budget.status() {
                BudgetStatus::Critical => Priority::High,
                BudgetStatus::Warning => Priority::Medium,
                BudgetStatus::Normal => return None,
            };
            let message = budget_alert_message(budget);
            let already_raised = existing.iter().any(|a| !a.read && a.message == message);
            (!already_raised).then(|| NewAlert::new(AlertType::Budget, priority, message))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AlertId, BudgetPeriod, Category, GoalId, GoalType};
    use chrono::{NaiveDate, Utc};

    fn budget(category: Category, limit: i64, spent: i64) -> Budget {
        Budget {
            category,
            limit: Money::from_cents(limit),
            spent: Money::from_cents(spent),
            period: BudgetPeriod::Monthly,
        }
    }

    fn goal(id: u64, target: i64, current: i64) -> Goal {
        Goal {
            id: GoalId::new(id),
            name: format!("Goal {}", id),
            goal_type: GoalType::Savings,
            target_amount: Money::from_cents(target),
            current_amount: Money::from_cents(current),
            target_date: NaiveDate::from_ymd_opt(2027, 1, 1).unwrap(),
        }
    }

    #[test]
    fn test_goals_insight_needs_active_goal() {
        let budgets = vec![budget(Category::Dining, 10_000, 5_000)];

        let done = vec![goal(1, 1_000, 1_000)];
        let insights = generate_insights(&[], &budgets, &done);
        assert_eq!(insights.len(), 2);
        assert!(insights.iter().all(|i| i.kind != InsightKind::Goals));

        let active = vec![goal(1, 1_000, 1_000), goal(2, 1_000, 250)];
        let insights = generate_insights(&[], &budgets, &active);
        assert_eq!(insights.len(), 3);
        assert_eq!(
            insights[2].description,
            "You're 25.0% of the way to completing your active goals."
        );
    }

    #[test]
    fn test_budget_insight_is_not_actionable() {
        let budgets = vec![
            budget(Category::Dining, 10_000, 5_000),
            budget(Category::Gas, 10_000, 10_000),
        ];
        let insights = generate_insights(&[], &budgets, &[]);
        let budget_insight = &insights[1];
        assert_eq!(budget_insight.kind, InsightKind::Budget);
        assert_eq!(budget_insight.priority, Priority::Low);
        assert!(!budget_insight.actionable);
        assert!(budget_insight.description.contains("75.0%"));
    }

    #[test]
    fn test_budget_alert_priorities() {
        let budgets = vec![
            budget(Category::Groceries, 10_000, 8_000),
            budget(Category::Gas, 10_000, 1_000),
            budget(Category::Dining, 10_000, 9_500),
        ];
        let drafts = budget_alerts(&budgets, &[]);
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].priority, Priority::Medium);
        assert_eq!(drafts[0].message, "Groceries budget is at 80% of its $100.00 limit");
        assert_eq!(drafts[1].priority, Priority::High);
    }

    #[test]
    fn test_budget_alerts_skip_unread_duplicates() {
        let over = budget(Category::Dining, 10_000, 9_500);
        let mut existing = Alert {
            id: AlertId::new(1),
            alert_type: AlertType::Budget,
            priority: Priority::High,
            message: budget_alert_message(&over),
            read: false,
            timestamp: Utc::now(),
        };
        assert!(budget_alerts(std::slice::from_ref(&over), std::slice::from_ref(&existing)).is_empty());

        existing.read = true;
        assert_eq!(budget_alerts(&[over], &[existing]).len(), 1);
    }
}
