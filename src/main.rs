use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use sharefinder::core::log::init_logging;
use sharefinder::core::resolver::Strategy;

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

impl From<Commands> for sharefinder::AppCommand {
    fn from(cmd: Commands) -> sharefinder::AppCommand {
        match cmd {
            Commands::Exposure {
                fund,
                catalog,
                strategy,
                json,
            } => sharefinder::AppCommand::Exposure {
                fund,
                catalog,
                strategy,
                json,
            },
            Commands::Shares { fund, catalog } => sharefinder::AppCommand::Shares { fund, catalog },
            Commands::Funds { catalog } => sharefinder::AppCommand::Funds { catalog },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display the underlying share exposures of a fund
    Exposure {
        /// Name of the fund to look through
        fund: String,
        /// Fund catalog file (JSON or YAML)
        #[arg(long)]
        catalog: Option<String>,
        /// Resolution strategy: trampoline, memoized or recursive
        #[arg(short, long)]
        strategy: Option<Strategy>,
        /// Print exposures as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the shares a fund ultimately holds
    Shares {
        /// Name of the fund to look through
        fund: String,
        /// Fund catalog file (JSON or YAML)
        #[arg(long)]
        catalog: Option<String>,
    },
    /// Resolve every fund in the catalog
    Funds {
        /// Fund catalog file (JSON or YAML)
        #[arg(long)]
        catalog: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => sharefinder::cli::setup::setup(),
        Some(cmd) => sharefinder::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
