//! Alert CLI commands

use clap::Subcommand;

use crate::display::alert::format_alert_list;
use crate::error::FinboardResult;
use crate::models::AlertId;
use crate::services::Backend;

use super::parse_id;

/// Alert subcommands
#[derive(Subcommand, Debug)]
pub enum AlertCommands {
    /// List alerts
    List {
        /// Only unread alerts
        #[arg(short, long)]
        unread: bool,
    },
    /// Mark an alert as read
    Read {
        /// Alert ID (e.g. "alert-2" or "2")
        alert: String,
    },
    /// Delete an alert
    Delete {
        /// Alert ID
        alert: String,
    },
}

/// Handle an alert command
pub async fn handle_alert_command(backend: &Backend, cmd: AlertCommands) -> FinboardResult<()> {
    let service = backend.alerts();

    match cmd {
        AlertCommands::List { unread } => {
            let alerts = if unread {
                service.get_unread().await?
            } else {
                service.get_all().await?
            };
            print!("{}", format_alert_list(&alerts));
        }

        AlertCommands::Read { alert } => {
            let id: AlertId = parse_id(&alert, "alert")?;
            let updated = service.mark_as_read(id).await?;
            let unread = service.get_unread_count().await?;
            println!("Marked {} as read ({} unread remaining)", updated.id, unread);
        }

        AlertCommands::Delete { alert } => {
            let id: AlertId = parse_id(&alert, "alert")?;
            let deleted = service.delete(id).await?;
            println!("Deleted alert {}: {}", deleted.id, deleted.message);
        }
    }

    Ok(())
}
