//! # Command Line Interface
//!
//! Provides CLI commands for proxy and route administration against the
//! backend API, configuration file management, and the interactive
//! console mode.

pub mod config_cmd;
pub mod output;
pub mod proxies;
pub mod routes;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::client::{ApiClient, ClientConfig};
use crate::console::Shell;

#[derive(Parser)]
#[command(name = "proxyctl")]
#[command(about = "Reverse proxy administration console")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Base URL for the proxy management API
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Proxy management commands
    Proxy {
        #[command(subcommand)]
        command: proxies::ProxyCommands,
    },

    /// Route management commands
    Route {
        #[command(subcommand)]
        command: routes::RouteCommands,
    },

    /// Interactive console session
    Console,

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        command: config_cmd::ConfigCommands,
    },
}

/// Run CLI commands
pub async fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    initialise_logging(cli.verbose)?;

    match cli.command {
        Commands::Proxy { command } => {
            let client = create_api_client(cli.base_url, cli.timeout, cli.verbose)?;
            proxies::handle_proxy_command(command, &client).await?
        }
        Commands::Route { command } => {
            let client = create_api_client(cli.base_url, cli.timeout, cli.verbose)?;
            routes::handle_route_command(command, &client).await?
        }
        Commands::Console => {
            let client = create_api_client(cli.base_url, cli.timeout, cli.verbose)?;
            let stdin = std::io::stdin();
            let mut shell = Shell::new(stdin.lock(), std::io::stdout());
            shell.run(&client).await?
        }
        Commands::Config { command } => config_cmd::handle_config_command(command).await?,
    }

    Ok(())
}

/// Create the API client with resolved connection settings
fn create_api_client(
    base_url: Option<String>,
    timeout: Option<u64>,
    verbose: bool,
) -> anyhow::Result<ApiClient> {
    let base_url = crate::config::resolve_base_url(base_url);
    let timeout = crate::config::resolve_timeout(timeout);

    let config = ClientConfig { base_url, timeout, verbose };

    Ok(ApiClient::new(config)?)
}

fn initialise_logging(verbose: bool) -> anyhow::Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", default_level);
    }

    if tracing::subscriber::set_global_default(
        FmtSubscriber::builder().with_env_filter(EnvFilter::from_default_env()).finish(),
    )
    .is_err()
    {
        // Subscriber already set elsewhere (e.g. integration tests); ignore.
    }
    Ok(())
}
