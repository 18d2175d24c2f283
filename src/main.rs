use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use finboard::audit::AuditLogger;
use finboard::cli::{
    handle_account_command, handle_alert_command, handle_budget_command, handle_goal_command,
    handle_insights, handle_net_worth, handle_summary, handle_transaction_command,
    AccountCommands, AlertCommands, BudgetCommands, GoalCommands, TransactionCommands,
};
use finboard::config::{FinboardPaths, Settings};
use finboard::services::{Backend, Latency};
use finboard::storage::{Fixtures, Storage};

/// Environment variable holding the tracing filter
const LOG_ENV: &str = "FINBOARD_LOG";

#[derive(Parser)]
#[command(
    name = "finboard",
    version,
    about = "Personal-finance dashboard in the terminal",
    long_about = "Finboard serves accounts, transactions, budgets, goals and alerts from \
                  an in-memory store seeded with sample data. Changes last only for the \
                  running command."
)]
struct Cli {
    /// Skip the simulated service latency
    #[arg(long, global = true)]
    no_latency: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Seed the store from this directory of JSON files
    #[arg(long, global = true, value_name = "DIR")]
    fixtures: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Net worth, monthly cash flow, savings rate and recent activity
    Summary {
        /// Month to summarize (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Account commands
    #[command(subcommand)]
    Account(AccountCommands),

    /// Transaction commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Budget commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Goal commands
    #[command(subcommand)]
    Goal(GoalCommands),

    /// Alert commands
    #[command(subcommand)]
    Alert(AlertCommands),

    /// Observations about spending, budgets and goals
    Insights,

    /// Accounts grouped by type with assets, liabilities and net worth
    #[command(alias = "net-worth")]
    Networth {
        /// Write CSV to stdout instead of the table
        #[arg(long)]
        csv: bool,

        /// Export CSV to a file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show current configuration and paths
    Config {
        /// Write the settings file with the current values
        #[arg(long)]
        init: bool,
    },
}

fn init_tracing(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(filter),
        )
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))
}

/// Seed source in priority order: `--fixtures`, the settings file, a
/// `fixtures` directory under the data directory, then the built-in seed
fn load_fixtures(cli: &Cli, paths: &FinboardPaths, settings: &Settings) -> Result<Fixtures> {
    let dir = cli
        .fixtures
        .clone()
        .or_else(|| settings.fixtures_dir.clone())
        .or_else(|| Some(paths.fixtures_dir()).filter(|d| d.is_dir()));

    let fixtures = match dir {
        Some(dir) => {
            debug!(dir = %dir.display(), "using fixture directory");
            Fixtures::load_dir(&dir)?
        }
        None => Fixtures::builtin()?,
    };
    Ok(fixtures)
}

fn build_backend(cli: &Cli, paths: &FinboardPaths, settings: &Settings) -> Result<Backend> {
    let mut storage = Storage::from_fixtures(load_fixtures(cli, paths, settings)?);

    if settings.audit_to_file {
        paths.ensure_directories()?;
        storage = storage.with_audit(AuditLogger::with_file(paths.audit_log()));
    }

    let latency = if cli.no_latency {
        Latency::none()
    } else {
        Latency::from_settings(&settings.latency)
    };

    Ok(Backend::new(storage, latency))
}

fn print_config(paths: &FinboardPaths, settings: &Settings, cli: &Cli) {
    println!("Finboard Configuration");
    println!("======================");
    println!("Base directory: {}", paths.base_dir().display());
    println!("Settings file:  {}", paths.settings_file().display());
    println!("Audit log:      {}", paths.audit_log().display());
    println!();
    println!("Settings:");
    println!("  Page size:      {}", settings.page_size);
    println!("  Audit to file:  {}", settings.audit_to_file);
    match cli.fixtures.as_ref().or(settings.fixtures_dir.as_ref()) {
        Some(dir) => println!("  Fixtures:       {}", dir.display()),
        None => println!("  Fixtures:       built-in"),
    }
    let latency = &settings.latency;
    if cli.no_latency || !latency.enabled {
        println!("  Latency:        disabled");
    } else {
        println!(
            "  Latency (ms):   list {}, fetch {}, create {}, update {}, delete {}, aggregate {}",
            latency.list_ms,
            latency.fetch_ms,
            latency.create_ms,
            latency.update_ms,
            latency.delete_ms,
            latency.aggregate_ms
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let paths = FinboardPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let Some(command) = cli.command.as_ref() else {
        println!("Finboard - personal-finance dashboard");
        println!();
        println!("Run 'finboard --help' for usage information.");
        println!("Run 'finboard summary --month 2025-08' to see the sample data.");
        return Ok(());
    };

    if let Commands::Config { init } = command {
        if *init {
            settings.save(&paths)?;
            println!("Settings written to: {}", paths.settings_file().display());
            println!();
        }
        print_config(&paths, &settings, &cli);
        return Ok(());
    }

    let backend = build_backend(&cli, &paths, &settings)?;

    match cli.command {
        Some(Commands::Summary { month }) => handle_summary(&backend, month).await?,
        Some(Commands::Account(cmd)) => handle_account_command(&backend, cmd).await?,
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&backend, settings.page_size, cmd).await?
        }
        Some(Commands::Budget(cmd)) => handle_budget_command(&backend, cmd).await?,
        Some(Commands::Goal(cmd)) => handle_goal_command(&backend, cmd).await?,
        Some(Commands::Alert(cmd)) => handle_alert_command(&backend, cmd).await?,
        Some(Commands::Insights) => handle_insights(&backend).await?,
        Some(Commands::Networth { csv, output }) => {
            handle_net_worth(&backend, csv, output).await?
        }
        Some(Commands::Config { .. }) | None => {}
    }

    debug!(audit_entries = backend.storage().audit.len(), "command finished");
    Ok(())
}
