//! Route CLI commands
//!
//! Command-line interface for a proxy's routes: listing, applying a route
//! definition from a file, and toggling enablement.

use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::PathBuf;

use super::output::{self, OutputFormat};
use crate::client::ApiClient;
use crate::domain::{Route, RouteForm};

#[derive(Subcommand)]
pub enum RouteCommands {
    /// List all routes of a proxy
    List {
        /// Proxy name
        #[arg(value_name = "PROXY")]
        proxy: String,

        /// Output format (json, yaml, or table)
        #[arg(short, long, default_value = "table", value_parser = ["json", "yaml", "table"])]
        output: String,
    },

    /// Create or update a route from a JSON definition
    #[command(
        long_about = "Create or update a route under a proxy from a JSON file.\n\nThe file carries routeId, path, method, header rules, cookie rules, and optional activationTime/expirationTime given as local wall-clock strings (YYYY-MM-DDTHH:MM); they are converted to explicit-offset ISO-8601 before submission.",
        after_help = "EXAMPLES:\n    # Create a route\n    proxyctl route apply billing --file route.json\n\n    # Update an existing route\n    proxyctl route apply billing --file route.json --update"
    )]
    Apply {
        /// Proxy name
        #[arg(value_name = "PROXY")]
        proxy: String,

        /// Path to JSON file with the route definition
        #[arg(short, long, value_name = "FILE")]
        file: PathBuf,

        /// Update an existing route instead of creating one
        #[arg(long)]
        update: bool,

        /// Output format (json or yaml)
        #[arg(short, long, default_value = "json", value_parser = ["json", "yaml"])]
        output: String,
    },

    /// Enable a route
    Enable {
        /// Proxy name
        #[arg(value_name = "PROXY")]
        proxy: String,

        /// Route id
        #[arg(value_name = "ROUTE_ID")]
        route_id: String,
    },

    /// Disable a route
    Disable {
        /// Proxy name
        #[arg(value_name = "PROXY")]
        proxy: String,

        /// Route id
        #[arg(value_name = "ROUTE_ID")]
        route_id: String,
    },
}

/// Handle route commands
pub async fn handle_route_command(command: RouteCommands, client: &ApiClient) -> Result<()> {
    match command {
        RouteCommands::List { proxy, output } => list_routes(client, &proxy, &output).await?,
        RouteCommands::Apply { proxy, file, update, output } => {
            apply_route(client, &proxy, file, update, &output).await?
        }
        RouteCommands::Enable { proxy, route_id } => {
            set_status(client, &proxy, &route_id, true).await?
        }
        RouteCommands::Disable { proxy, route_id } => {
            set_status(client, &proxy, &route_id, false).await?
        }
    }

    Ok(())
}

async fn list_routes(client: &ApiClient, proxy: &str, output: &str) -> Result<()> {
    let format = OutputFormat::from_str(output)?;
    let response = client.list_routes(proxy).await?;

    if format == OutputFormat::Table {
        print_routes_table(proxy, &response.routes);
    } else {
        output::print_serialized(&response, format)?;
    }

    Ok(())
}

async fn apply_route(
    client: &ApiClient,
    proxy: &str,
    file: PathBuf,
    update: bool,
    output: &str,
) -> Result<()> {
    let format = OutputFormat::from_str(output)?;

    let contents = std::fs::read_to_string(&file)
        .with_context(|| format!("Failed to read file: {}", file.display()))?;

    let form: RouteForm =
        serde_json::from_str(&contents).context("Failed to parse route definition from file")?;

    let request = form.to_request()?;

    let saved = if update {
        client.update_route(proxy, &request).await?
    } else {
        client.create_route(proxy, &request).await?
    };

    output::print_serialized(&saved, format)?;
    Ok(())
}

async fn set_status(client: &ApiClient, proxy: &str, route_id: &str, enabled: bool) -> Result<()> {
    client.set_route_status(proxy, route_id, enabled).await?;

    println!(
        "Route '{}' of proxy '{}' {}",
        route_id,
        proxy,
        if enabled { "enabled" } else { "disabled" }
    );
    Ok(())
}

fn print_routes_table(proxy: &str, routes: &[Route]) {
    if routes.is_empty() {
        println!("No routes for '{}' yet", proxy);
        return;
    }

    output::print_table_header(&[
        ("Route ID", 20),
        ("Path", 32),
        ("Method", 8),
        ("Status", 8),
        ("Headers", 8),
    ]);

    for route in routes {
        println!(
            "{:<20} {:<32} {:<8} {:<8} {:<8}",
            output::truncate(&route.route_id, 18),
            output::truncate(&route.path, 30),
            route.method,
            if route.enabled { "enabled" } else { "disabled" },
            route.headers.len(),
        );
    }
    println!();
}
