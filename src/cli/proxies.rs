//! Proxy CLI commands
//!
//! Command-line interface for listing and managing proxy configurations.

use anyhow::Result;
use clap::Subcommand;
use validator::Validate;

use super::output::{self, OutputFormat};
use crate::client::ApiClient;
use crate::domain::{self, PageableResponse, Proxy, ProxyForm, DEFAULT_PAGE_SIZE};

#[derive(Subcommand)]
pub enum ProxyCommands {
    /// List proxies, newest first
    #[command(
        long_about = "List proxy configurations one page at a time, sorted by creation time descending.",
        after_help = "EXAMPLES:\n    # First page as a table\n    proxyctl proxy list\n\n    # Third page as JSON\n    proxyctl proxy list --page 2 --output json"
    )]
    List {
        /// Zero-indexed page to fetch
        #[arg(long, default_value_t = 0)]
        page: u32,

        /// Page size
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        size: u32,

        /// Output format (json, yaml, or table)
        #[arg(short, long, default_value = "table", value_parser = ["json", "yaml", "table"])]
        output: String,
    },

    /// Create a new proxy
    #[command(
        after_help = "EXAMPLES:\n    proxyctl proxy create --name billing --uri http://billing.internal:9000\n\n    proxyctl proxy create --name billing --uri http://billing.internal:9000 \\\n        --description 'billing service'"
    )]
    Create {
        /// Proxy name
        #[arg(long)]
        name: String,

        /// Upstream URI
        #[arg(long)]
        uri: String,

        /// Optional description
        #[arg(long)]
        description: Option<String>,

        /// Output format (json or yaml)
        #[arg(short, long, default_value = "json", value_parser = ["json", "yaml"])]
        output: String,
    },

    /// Update an existing proxy
    Update {
        /// Server-assigned proxy id
        #[arg(value_name = "ID")]
        id: i64,

        /// Proxy name
        #[arg(long)]
        name: String,

        /// Upstream URI
        #[arg(long)]
        uri: String,

        /// Optional description
        #[arg(long)]
        description: Option<String>,

        /// Output format (json or yaml)
        #[arg(short, long, default_value = "json", value_parser = ["json", "yaml"])]
        output: String,
    },

    /// Delete a proxy
    #[command(
        after_help = "EXAMPLES:\n    # Delete with confirmation prompt\n    proxyctl proxy delete 4\n\n    # Delete without confirmation\n    proxyctl proxy delete 4 --yes"
    )]
    Delete {
        /// Server-assigned proxy id
        #[arg(value_name = "ID")]
        id: i64,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Handle proxy commands
pub async fn handle_proxy_command(command: ProxyCommands, client: &ApiClient) -> Result<()> {
    match command {
        ProxyCommands::List { page, size, output } => {
            list_proxies(client, page, size, &output).await?
        }
        ProxyCommands::Create { name, uri, description, output } => {
            let form = ProxyForm { name, uri, description };
            submit_proxy(client, form, None, &output).await?
        }
        ProxyCommands::Update { id, name, uri, description, output } => {
            let form = ProxyForm { name, uri, description };
            submit_proxy(client, form, Some(id), &output).await?
        }
        ProxyCommands::Delete { id, yes } => delete_proxy(client, id, yes).await?,
    }

    Ok(())
}

async fn list_proxies(client: &ApiClient, page: u32, size: u32, output: &str) -> Result<()> {
    let format = OutputFormat::from_str(output)?;
    let response = client.list_proxies(page, size).await?;

    if format == OutputFormat::Table {
        print_proxies_table(&response);
    } else {
        output::print_serialized(&response, format)?;
    }

    Ok(())
}

async fn submit_proxy(
    client: &ApiClient,
    form: ProxyForm,
    id: Option<i64>,
    output: &str,
) -> Result<()> {
    let format = OutputFormat::from_str(output)?;

    if let Err(errors) = form.validate() {
        return Err(domain::first_validation_error(&errors).into());
    }

    let saved = match id {
        Some(id) => client.update_proxy(id, &form).await?,
        None => client.create_proxy(&form).await?,
    };

    output::print_serialized(&saved, format)?;
    Ok(())
}

async fn delete_proxy(client: &ApiClient, id: i64, yes: bool) -> Result<()> {
    if !yes {
        println!("Are you sure you want to delete proxy {}? (y/N)", id);
        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled");
            return Ok(());
        }
    }

    client.delete_proxy(id).await?;

    println!("Proxy {} deleted successfully", id);
    Ok(())
}

fn print_proxies_table(page: &PageableResponse<Proxy>) {
    if page.is_empty() {
        println!("No proxies yet");
    } else {
        output::print_table_header(&[
            ("ID", 6),
            ("Name", 20),
            ("URI", 32),
            ("Description", 24),
            ("Created", 20),
        ]);

        for proxy in &page.content {
            print_proxy_row(proxy);
        }
        println!();
    }

    println!(
        "Page {}/{} ({} records) [prev: {}, next: {}]",
        page.current_page + 1,
        page.total_pages.max(1),
        page.total_elements,
        if page.has_previous { "available" } else { "-" },
        if page.has_next { "available" } else { "-" },
    );
}

fn print_proxy_row(proxy: &Proxy) {
    println!(
        "{:<6} {:<20} {:<32} {:<24} {:<20}",
        proxy.id,
        output::truncate(&proxy.name, 18),
        output::truncate(&proxy.uri, 30),
        output::truncate(proxy.description.as_deref().unwrap_or(""), 22),
        output::truncate(&proxy.created_at, 19),
    );
}
