//! Dashboard, insight and net worth commands

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use chrono::Local;
use tracing::info;

use crate::display::alert::format_insights;
use crate::error::{FinboardError, FinboardResult};
use crate::reports::{insights, DashboardSummary, NetWorthReport};
use crate::services::Backend;

use super::parse_month;

/// Print the dashboard for `month` (YYYY-MM), or the current month
pub async fn handle_summary(backend: &Backend, month: Option<String>) -> FinboardResult<()> {
    let month = match month {
        Some(s) => parse_month(&s)?,
        None => Local::now().date_naive(),
    };

    let summary = DashboardSummary::generate(backend, month).await?;
    print!("{}", summary.format_terminal());
    Ok(())
}

pub async fn handle_insights(backend: &Backend) -> FinboardResult<()> {
    let insights = insights::load_insights(backend).await?;
    print!("{}", format_insights(&insights));
    Ok(())
}

/// Print the net worth report, or write it as CSV
pub async fn handle_net_worth(
    backend: &Backend,
    csv: bool,
    output: Option<PathBuf>,
) -> FinboardResult<()> {
    let report = NetWorthReport::generate(backend).await?;

    match output {
        Some(path) => {
            let file = File::create(&path).map_err(|e| {
                FinboardError::Export(format!(
                    "Failed to create file {}: {}",
                    path.display(),
                    e
                ))
            })?;
            report.export_csv(BufWriter::new(file))?;
            info!(path = %path.display(), "net worth report exported");
            println!("Net worth report exported to: {}", path.display());
        }
        None if csv => report.export_csv(io::stdout().lock())?,
        None => print!("{}", report.format_terminal()),
    }

    Ok(())
}
