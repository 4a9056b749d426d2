//! Orderly config - JSON persistence for the Orderly health-bar overlay settings.
//!
//! The library centers on [`config::ConfigManager`], which keeps one in-memory
//! copy of the settings and funnels every file read and write through a single
//! background worker. The `orderly-config` binary wraps it for the command line.

pub mod cli;
pub mod config;
pub mod error;

use anyhow::{bail, Context, Result};
use serde_json::Value;
use tracing::info;

use crate::cli::{Cli, Commands};
use crate::config::{ConfigLocation, ConfigManager, OrderlyConfig};

/// Runs the command-line tool with the provided arguments.
pub async fn run(cli: Cli) -> Result<()> {
    setup_logging(cli.log_level())?;
    execute(cli).await
}

/// Executes one subcommand against a fresh manager, then shuts the manager down.
async fn execute(cli: Cli) -> Result<()> {
    let location = ConfigLocation::new(&cli.config_dir, &cli.mod_id);
    let manager = ConfigManager::new(&location)?;

    let result = match cli.command {
        Commands::Path => {
            println!("{}", manager.config_path().display());
            Ok(())
        }
        Commands::Show => show_config(&manager).await,
        Commands::Reset => reset_config(&manager).await,
        Commands::Set { key, value } => set_value(&manager, &key, &value).await,
    };

    // Let repair saves queued by a failed read finish before the process exits.
    manager
        .shutdown()
        .await
        .context("Config I/O worker did not shut down cleanly")?;

    result
}

/// Initializes the tracing subscriber for structured logging.
fn setup_logging(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .json()
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Prints the configuration as pretty JSON.
async fn show_config(manager: &ConfigManager) -> Result<()> {
    let config = manager.get_config().await;
    println!("{}", config::loader::render_config(&config)?);
    Ok(())
}

/// Replaces the configuration with defaults and writes it out.
async fn reset_config(manager: &ConfigManager) -> Result<()> {
    manager.replace(OrderlyConfig::default()).await;
    manager.save().await?;

    info!(path = %manager.config_path().display(), "Config reset to defaults");
    println!("Reset {}", manager.config_path().display());
    Ok(())
}

/// Sets one top-level setting and saves.
async fn set_value(manager: &ConfigManager, key: &str, raw: &str) -> Result<()> {
    let config = manager.get_config().await;
    let updated = apply_setting(&config, key, raw)?;

    manager.replace(updated).await;
    manager.save().await?;

    info!(key, value = raw, "Config setting updated");
    println!("{} = {}", key, raw);
    Ok(())
}

/// Returns a copy of `config` with `key` set to the parsed `raw` value.
fn apply_setting(config: &OrderlyConfig, key: &str, raw: &str) -> Result<OrderlyConfig> {
    let mut tree = serde_json::to_value(config)?;
    let fields = match tree.as_object_mut() {
        Some(fields) => fields,
        None => bail!("Config did not serialize to a JSON object"),
    };

    if !fields.contains_key(key) {
        bail!("Unknown setting '{}'", key);
    }

    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    fields.insert(key.to_string(), value);

    serde_json::from_value(tree).with_context(|| format!("Invalid value for '{}': {}", key, raw))
}
