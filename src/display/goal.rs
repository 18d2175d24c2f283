//! Goal display formatting

use chrono::NaiveDate;

use crate::models::Goal;

use super::report::{format_bar, truncate};

const BAR_WIDTH: usize = 20;

/// Format goals with a progress bar each
pub fn format_goal_list(goals: &[Goal], today: NaiveDate) -> String {
    if goals.is_empty() {
        return "No goals found.\n".to_string();
    }

    let mut output = String::new();
    for goal in goals {
        let percent = goal.progress_percent();
        output.push_str(&format!(
            "{:<8} {:<24} {:<10} {} {:>5.1}%\n",
            goal.id.to_string(),
            truncate(&goal.name, 24),
            goal.goal_type,
            format_bar(percent, 100.0, BAR_WIDTH),
            percent
        ));

        let deadline = if goal.is_complete() {
            "complete".to_string()
        } else {
            match goal.days_remaining(today) {
                days if days < 0 => format!("{} days overdue", -days),
                days => format!("{} days left", days),
            }
        };
        output.push_str(&format!(
            "         {} of {}, target {} ({})\n",
            goal.current_amount, goal.target_amount, goal.target_date, deadline
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GoalId, GoalType, Money};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_goal_list() {
        let goals = vec![Goal {
            id: GoalId::new(1),
            name: "Emergency Fund".to_string(),
            goal_type: GoalType::Savings,
            target_amount: Money::from_cents(2_000_000),
            current_amount: Money::from_cents(1_250_000),
            target_date: date(2026, 6, 30),
        }];

        let output = format_goal_list(&goals, date(2026, 6, 20));
        assert!(output.contains("goal-1"));
        assert!(output.contains(" 62.5%"));
        assert!(output.contains("$12500.00 of $20000.00"));
        assert!(output.contains("10 days left"));

        let late = format_goal_list(&goals, date(2026, 7, 2));
        assert!(late.contains("2 days overdue"));
    }

    #[test]
    fn test_format_empty() {
        assert_eq!(format_goal_list(&[], date(2026, 1, 1)), "No goals found.\n");
    }
}
