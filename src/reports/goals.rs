//! Goal Progress Report

use chrono::NaiveDate;

use crate::error::FinboardResult;
use crate::models::{Goal, GoalId, GoalType, Money};
use crate::services::Backend;

use super::metrics;

/// Days before the target date at which an unfinished goal is flagged
pub const DUE_SOON_DAYS: i64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct GoalProgressRow {
    pub id: GoalId,
    pub name: String,
    pub goal_type: GoalType,
    pub current: Money,
    pub target: Money,
    pub remaining: Money,
    /// Capped at 100
    pub percent: f64,
    /// Negative once the target date has passed
    pub days_remaining: i64,
    pub is_complete: bool,
}

impl GoalProgressRow {
    pub fn from_goal(goal: &Goal, today: NaiveDate) -> Self {
        Self {
            id: goal.id,
            name: goal.name.clone(),
            goal_type: goal.goal_type,
            current: goal.current_amount,
            target: goal.target_amount,
            remaining: goal.remaining().max(Money::zero()),
            percent: goal.progress_percent(),
            days_remaining: goal.days_remaining(today),
            is_complete: goal.is_complete(),
        }
    }

    /// Unfinished and less than a month from the target date
    pub fn is_due_soon(&self) -> bool {
        !self.is_complete && (0..DUE_SOON_DAYS).contains(&self.days_remaining)
    }

    pub fn is_overdue(&self) -> bool {
        !self.is_complete && self.days_remaining < 0
    }

    fn status_label(&self) -> String {
        if self.is_complete {
            "complete".to_string()
        } else if self.is_overdue() {
            format!("overdue {}d", -self.days_remaining)
        } else if self.is_due_soon() {
            format!("{}d left !", self.days_remaining)
        } else {
            format!("{}d left", self.days_remaining)
        }
    }
}

#[derive(Debug, Clone)]
pub struct GoalProgressReport {
    pub as_of: NaiveDate,
    pub rows: Vec<GoalProgressRow>,
    pub active_count: usize,
    pub completed_count: usize,
    /// Mean progress of unfinished goals
    pub average_active_progress: Option<f64>,
}

impl GoalProgressReport {
    pub fn from_goals(goals: &[Goal], today: NaiveDate) -> Self {
        let rows: Vec<GoalProgressRow> = goals
            .iter()
            .map(|g| GoalProgressRow::from_goal(g, today))
            .collect();
        let completed_count = rows.iter().filter(|r| r.is_complete).count();

        Self {
            as_of: today,
            active_count: rows.len() - completed_count,
            completed_count,
            average_active_progress: metrics::average_active_goal_progress(goals),
            rows,
        }
    }

    pub async fn generate(backend: &Backend, today: NaiveDate) -> FinboardResult<Self> {
        let goals = backend.goals().get_all().await?;
        Ok(Self::from_goals(&goals, today))
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Goal Progress - as of {}\n", self.as_of));
        output.push_str(&"=".repeat(80));
        output.push('\n');
        output.push_str(&format!(
            "Active: {}   Completed: {}\n\n",
            self.active_count, self.completed_count
        ));

        output.push_str(&format!(
            "{:<8} {:<22} {:>13} {:>13} {:>7}  {:<12}\n",
            "ID", "Goal", "Saved", "Target", "Done", "Deadline"
        ));
        output.push_str(&"-".repeat(80));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!(
                "{:<8} {:<22} {:>13} {:>13} {:>6.1}%  {:<12}\n",
                row.id.to_string(),
                row.name,
                row.current,
                row.target,
                row.percent,
                row.status_label()
            ));
        }

        output.push_str(&"-".repeat(80));
        output.push('\n');
        if let Some(average) = self.average_active_progress {
            output.push_str(&format!("Average active progress: {:.1}%\n", average));
        }
        output.push_str("! = due within 30 days\n");

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_generate_goal_progress() {
        let backend = Backend::seeded().unwrap();
        let report = GoalProgressReport::generate(&backend, date(2025, 8, 25))
            .await
            .unwrap();

        assert_eq!(report.rows.len(), 4);
        assert_eq!(report.active_count, 3);
        assert_eq!(report.completed_count, 1);
        assert_eq!(report.rows[0].percent, 62.5);
        assert_eq!(report.rows[3].percent, 100.0);
        assert!(report.rows[3].is_complete);
        assert!(report.rows[3].remaining.is_zero());
    }

    #[test]
    fn test_due_soon_and_overdue() {
        let goal = Goal {
            id: GoalId::new(1),
            name: "Laptop".to_string(),
            goal_type: GoalType::Savings,
            target_amount: Money::from_cents(200_000),
            current_amount: Money::from_cents(50_000),
            target_date: date(2025, 9, 10),
        };

        let soon = GoalProgressRow::from_goal(&goal, date(2025, 8, 25));
        assert_eq!(soon.days_remaining, 16);
        assert!(soon.is_due_soon());
        assert!(!soon.is_overdue());

        let late = GoalProgressRow::from_goal(&goal, date(2025, 9, 12));
        assert!(late.is_overdue());
        assert!(!late.is_due_soon());

        let far = GoalProgressRow::from_goal(&goal, date(2025, 1, 1));
        assert!(!far.is_due_soon());
    }

    #[test]
    fn test_terminal_output() {
        let report = GoalProgressReport::from_goals(&[], date(2025, 8, 25));
        let text = report.format_terminal();
        assert!(text.contains("Goal Progress - as of 2025-08-25"));
        assert!(text.contains("Active: 0   Completed: 0"));
        assert!(!text.contains("Average active progress"));
    }
}
