use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxc::cli::convert::ConvertArgs;
use fxc::cli::history::HistoryArgs;
use fxc::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List the currencies the backend supports
    Currencies,
    /// Convert an amount between two currencies
    Convert {
        /// Amount to convert
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Source currency, defaults to the configured pair
        from: Option<String>,
        /// Target currency, defaults to the configured pair
        to: Option<String>,
        /// Swap source and target currencies
        #[arg(short, long)]
        reverse: bool,
    },
    /// Show historical exchange rates for a currency pair
    History {
        /// Source currency, defaults to the configured pair
        from: Option<String>,
        /// Target currency, defaults to the configured pair
        to: Option<String>,
        /// Number of days to look back
        #[arg(short, long, default_value = "30", allow_hyphen_values = true)]
        days: String,
        /// Swap source and target currencies
        #[arg(short, long)]
        reverse: bool,
    },
}

impl From<Commands> for fxc::AppCommand {
    fn from(cmd: Commands) -> fxc::AppCommand {
        match cmd {
            Commands::Currencies => fxc::AppCommand::Currencies,
            Commands::Convert {
                amount,
                from,
                to,
                reverse,
            } => fxc::AppCommand::Convert(ConvertArgs {
                amount,
                from,
                to,
                reverse,
            }),
            Commands::History {
                from,
                to,
                days,
                reverse,
            } => fxc::AppCommand::History(HistoryArgs {
                from,
                to,
                days,
                reverse,
            }),
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Setup) => fxc::cli::setup::setup(),
        Some(cmd) => fxc::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}
