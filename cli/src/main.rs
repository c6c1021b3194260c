//! portctl CLI - List listening ports and stop the processes behind them.

mod commands;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use portctl_core::{Config, ConfigStore};
use tracing::warn;

use commands::SystemDeps;

#[derive(Parser)]
#[command(name = "portctl")]
#[command(author, version, about = "Manage listening TCP ports")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to the configuration file (default: ~/.portctl/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List listening ports
    #[command(alias = "ls")]
    List {
        /// Filter by port, process name, user or address
        #[arg(short, long)]
        search: Option<String>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Kill process(es) listening on a port
    #[command(alias = "k")]
    Kill {
        /// Port number to free
        port: u16,
    },
}

async fn load_config(path: Option<PathBuf>) -> Config {
    let store = match path {
        Some(path) => ConfigStore::with_path(path),
        None => match ConfigStore::new() {
            Ok(store) => store,
            Err(e) => {
                warn!(error = %e, "Using default configuration");
                return Config::default();
            }
        },
    };

    match store.load().await {
        Ok(config) => config,
        Err(e) => {
            warn!(path = %store.path().display(), error = %e, "Using default configuration");
            Config::default()
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let deps = SystemDeps::new(load_config(cli.config.clone()).await);

    let mut stdout = std::io::stdout().lock();
    let mut stderr = std::io::stderr().lock();

    match commands::dispatch(cli.command, &deps, &mut stdout, &mut stderr).await {
        Ok(status) => ExitCode::from(status),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
