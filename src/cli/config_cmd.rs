//! Configuration management CLI commands
//!
//! Provides commands for managing ~/.proxyctl/config.toml

use anyhow::Result;
use clap::Subcommand;

use super::output;
use crate::config::ConsoleConfig;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize configuration file with default values
    Init {
        /// Overwrite existing configuration file
        #[arg(short, long)]
        force: bool,
    },

    /// Show current configuration
    Show {
        /// Output format (json or yaml)
        #[arg(short, long, default_value = "yaml", value_parser = ["json", "yaml"])]
        output: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (base_url or timeout)
        key: String,

        /// Configuration value
        value: String,
    },

    /// Get configuration file path
    Path,
}

/// Handle config commands
pub async fn handle_config_command(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Init { force } => init_config(force)?,
        ConfigCommands::Show { output } => show_config(&output)?,
        ConfigCommands::Set { key, value } => set_config(&key, &value)?,
        ConfigCommands::Path => show_config_path()?,
    }

    Ok(())
}

fn init_config(force: bool) -> Result<()> {
    let path = ConsoleConfig::config_path()?;

    if path.exists() && !force {
        anyhow::bail!(
            "Configuration file already exists at: {}\nUse --force to overwrite",
            path.display()
        );
    }

    let config = ConsoleConfig {
        base_url: Some(crate::config::DEFAULT_BASE_URL.to_string()),
        timeout: Some(crate::config::DEFAULT_TIMEOUT_SECS),
    };
    config.save()?;

    println!("Configuration file created at: {}", path.display());
    Ok(())
}

fn show_config(format: &str) -> Result<()> {
    let config = ConsoleConfig::load()?;

    match output::OutputFormat::from_str(format)? {
        output::OutputFormat::Json => output::print_json(&config)?,
        _ => output::print_yaml(&config)?,
    }

    Ok(())
}

fn set_config(key: &str, value: &str) -> Result<()> {
    let mut config = ConsoleConfig::load()?;

    match key {
        "base_url" => config.base_url = Some(value.to_string()),
        "timeout" => {
            let timeout =
                value.parse::<u64>().map_err(|_| anyhow::anyhow!("timeout must be a number"))?;
            config.timeout = Some(timeout);
        }
        other => anyhow::bail!("Unknown configuration key: '{}'. Use 'base_url' or 'timeout'.", other),
    }

    config.save()?;
    println!("Set {} = {}", key, value);
    Ok(())
}

fn show_config_path() -> Result<()> {
    let path = ConsoleConfig::config_path()?;
    println!("{}", path.display());
    Ok(())
}
