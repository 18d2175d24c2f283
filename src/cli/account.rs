//! Account CLI commands

use clap::Subcommand;

use crate::display::account::{format_account_details, format_account_list};
use crate::error::{FinboardError, FinboardResult};
use crate::models::{AccountId, AccountType, Money, NewAccount};
use crate::services::Backend;

use super::parse_id;

/// Account subcommands
#[derive(Subcommand, Debug)]
pub enum AccountCommands {
    /// List all accounts with net worth
    List {
        /// Only accounts of this type (checking, savings, credit, investment)
        #[arg(short = 't', long = "type")]
        account_type: Option<String>,
    },
    /// Show an account and its transactions
    Show {
        /// Account ID (e.g. "acc-1" or "1")
        account: String,
    },
    /// Create a new account
    Create {
        /// Account name
        name: String,
        /// Account type (checking, savings, credit, investment)
        #[arg(short = 't', long = "type", default_value = "checking")]
        account_type: String,
        /// Balance (e.g. "1000.00"); for credit accounts, the amount owed
        #[arg(short, long, default_value = "0")]
        balance: String,
    },
    /// Delete an account
    Delete {
        /// Account ID
        account: String,
    },
}

fn parse_account_type(s: &str) -> FinboardResult<AccountType> {
    AccountType::parse(s).ok_or_else(|| {
        FinboardError::Validation(format!(
            "Invalid account type: '{}'. Valid types: checking, savings, credit, investment",
            s
        ))
    })
}

/// Handle an account command
pub async fn handle_account_command(backend: &Backend, cmd: AccountCommands) -> FinboardResult<()> {
    let service = backend.accounts();

    match cmd {
        AccountCommands::List { account_type } => {
            let accounts = match account_type {
                Some(t) => service.get_by_type(parse_account_type(&t)?).await?,
                None => service.get_all().await?,
            };
            print!("{}", format_account_list(&accounts));
        }

        AccountCommands::Show { account } => {
            let id: AccountId = parse_id(&account, "account")?;
            let found = service
                .get_by_id(id)
                .await?
                .ok_or_else(|| FinboardError::account_not_found(id.to_string()))?;
            let transactions = backend.transactions().get_by_account(id).await?;
            print!("{}", format_account_details(&found, &transactions));
        }

        AccountCommands::Create {
            name,
            account_type,
            balance,
        } => {
            let account_type = parse_account_type(&account_type)?;
            let balance = Money::parse(&balance).map_err(|e| {
                FinboardError::Validation(format!(
                    "Invalid balance format: '{}'. Use format like '1000.00' or '1000'. Error: {}",
                    balance, e
                ))
            })?;

            let account = service
                .create(&NewAccount::new(name, account_type, balance))
                .await?;

            println!("Created account: {}", account.name);
            println!("  Type:    {}", account.account_type);
            println!("  Balance: {}", account.balance);
            println!("  ID:      {}", account.id);
        }

        AccountCommands::Delete { account } => {
            let id: AccountId = parse_id(&account, "account")?;
            let deleted = service.delete(id).await?;
            println!("Deleted account: {} ({})", deleted.name, deleted.id);
        }
    }

    Ok(())
}
