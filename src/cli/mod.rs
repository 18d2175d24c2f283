//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod account;
pub mod alert;
pub mod budget;
pub mod goal;
pub mod report;
pub mod transaction;

pub use account::{handle_account_command, AccountCommands};
pub use alert::{handle_alert_command, AlertCommands};
pub use budget::{handle_budget_command, BudgetCommands};
pub use goal::{handle_goal_command, GoalCommands};
pub use report::{handle_insights, handle_net_worth, handle_summary};
pub use transaction::{handle_transaction_command, TransactionCommands};

use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::{FinboardError, FinboardResult};

/// Parse an entity ID given with or without its prefix
pub fn parse_id<T: FromStr>(s: &str, what: &str) -> FinboardResult<T> {
    s.parse()
        .map_err(|_| FinboardError::Validation(format!("Invalid {} ID: '{}'", what, s)))
}

/// Parse a YYYY-MM-DD date
pub fn parse_date(s: &str) -> FinboardResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        FinboardError::Validation(format!("Invalid date format: {}. Use YYYY-MM-DD", s))
    })
}

/// Parse a YYYY-MM month into its first day
pub fn parse_month(s: &str) -> FinboardResult<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d").map_err(|_| {
        FinboardError::Validation(format!(
            "Invalid month format: {}. Use YYYY-MM (e.g., 2025-08)",
            s
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountId, GoalId};

    #[test]
    fn test_parse_id_with_and_without_prefix() {
        let id: AccountId = parse_id("acc-3", "account").unwrap();
        assert_eq!(id.value(), 3);
        let id: GoalId = parse_id("4", "goal").unwrap();
        assert_eq!(id.value(), 4);

        let err = parse_id::<GoalId>("goal-x", "goal").unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Invalid goal ID: 'goal-x'");
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(
            parse_month("2025-08").unwrap(),
            NaiveDate::from_ymd_opt(2025, 8, 1).unwrap()
        );
        assert!(parse_month("2025-13").is_err());
        assert!(parse_month("August").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2025-08-24").is_ok());
        assert!(parse_date("24/08/2025").is_err());
    }
}
