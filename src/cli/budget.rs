//! Budget CLI commands

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use clap::Subcommand;
use tracing::info;

use crate::error::{FinboardError, FinboardResult};
use crate::reports::BudgetOverviewReport;
use crate::services::Backend;

/// Budget subcommands
#[derive(Subcommand, Debug)]
pub enum BudgetCommands {
    /// Show limit, spending and status for every budget
    Overview {
        /// Raise alerts for budgets at warning or critical status
        #[arg(long)]
        raise_alerts: bool,
    },
    /// Export the budget overview as CSV
    Export {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle a budget command
pub async fn handle_budget_command(backend: &Backend, cmd: BudgetCommands) -> FinboardResult<()> {
    let report = BudgetOverviewReport::generate(backend).await?;

    match cmd {
        BudgetCommands::Overview { raise_alerts } => {
            print!("{}", report.format_terminal());

            if raise_alerts {
                let budgets = backend.budgets().get_all().await?;
                let raised = backend.alerts().raise_budget_alerts(&budgets).await?;
                println!();
                if raised.is_empty() {
                    println!("No new budget alerts.");
                }
                for alert in &raised {
                    println!("Raised {}: {}", alert.id, alert);
                }
            }
        }

        BudgetCommands::Export { output } => match output {
            Some(path) => {
                let file = File::create(&path).map_err(|e| {
                    FinboardError::Export(format!(
                        "Failed to create file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                report.export_csv(BufWriter::new(file))?;
                info!(path = %path.display(), "budget overview exported");
                println!("Budget overview exported to: {}", path.display());
            }
            None => report.export_csv(io::stdout().lock())?,
        },
    }

    Ok(())
}
