//! Goal CLI commands

use chrono::{Local, NaiveDate};
use clap::Subcommand;

use crate::display::goal::format_goal_list;
use crate::error::{FinboardError, FinboardResult};
use crate::models::{GoalId, Money};
use crate::reports::GoalProgressReport;
use crate::services::Backend;

use super::{parse_date, parse_id};

/// Goal subcommands
#[derive(Subcommand, Debug)]
pub enum GoalCommands {
    /// List goals with progress bars
    List,
    /// Progress report with deadlines and completion counts
    Progress {
        /// Report date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        as_of: Option<String>,
    },
    /// Add an amount to a goal's saved total
    Contribute {
        /// Goal ID (e.g. "goal-1" or "1")
        goal: String,
        /// Amount to add (e.g. "250.00")
        amount: String,
    },
}

/// Handle a goal command
pub async fn handle_goal_command(backend: &Backend, cmd: GoalCommands) -> FinboardResult<()> {
    let today = Local::now().date_naive();

    match cmd {
        GoalCommands::List => {
            let goals = backend.goals().get_all().await?;
            print!("{}", format_goal_list(&goals, today));
        }

        GoalCommands::Progress { as_of } => {
            let as_of: NaiveDate = match as_of {
                Some(s) => parse_date(&s)?,
                None => today,
            };
            let report = GoalProgressReport::generate(backend, as_of).await?;
            print!("{}", report.format_terminal());
        }

        GoalCommands::Contribute { goal, amount } => {
            let id: GoalId = parse_id(&goal, "goal")?;
            let amount = Money::parse(&amount).map_err(|e| {
                FinboardError::Validation(format!("Invalid amount '{}': {}", amount, e))
            })?;

            let updated = backend.goals().update_progress(id, amount).await?;
            println!(
                "{}: {} of {} ({:.1}%)",
                updated.name,
                updated.current_amount,
                updated.target_amount,
                updated.progress_percent()
            );
            if updated.is_complete() {
                println!("Goal complete!");
            }
        }
    }

    Ok(())
}
