pub mod cli;
pub mod core;

use crate::core::config::AppConfig;
use crate::core::resolver::Strategy;
use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    Exposure {
        fund: String,
        catalog: Option<String>,
        strategy: Option<Strategy>,
        json: bool,
    },
    Shares {
        fund: String,
        catalog: Option<String>,
    },
    Funds {
        catalog: Option<String>,
    },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Share finder starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Exposure {
            fund,
            catalog,
            strategy,
            json,
        } => {
            let catalog_path = config.catalog_path(catalog.as_deref())?;
            let strategy = strategy.unwrap_or(config.strategy);
            cli::exposure::run(&catalog_path, &fund, strategy, json, config.precision)
        }
        AppCommand::Shares { fund, catalog } => {
            let catalog_path = config.catalog_path(catalog.as_deref())?;
            cli::shares::run(&catalog_path, &fund, config.strategy)
        }
        AppCommand::Funds { catalog } => {
            let catalog_path = config.catalog_path(catalog.as_deref())?;
            cli::funds::run(&catalog_path, config.precision).await
        }
    }
}
