pub mod cli;
pub mod core;
pub mod providers;

use crate::cli::convert::ConvertArgs;
use crate::cli::history::HistoryArgs;
use crate::core::ConversionClient;
use crate::core::config::AppConfig;
use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    Currencies,
    Convert(ConvertArgs),
    History(HistoryArgs),
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fxc starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let client = ConversionClient::new(providers::build_backend(&config)?);

    match command {
        AppCommand::Currencies => cli::currencies::run(&client).await,
        AppCommand::Convert(args) => cli::convert::run(&client, &args, &config.currency).await,
        AppCommand::History(args) => cli::history::run(&client, &args, &config.currency).await,
    }
}
