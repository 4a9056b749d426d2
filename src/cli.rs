//! Command-line interface definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_MOD_ID;

/// Inspect and edit the Orderly health-bar config file.
#[derive(Parser, Debug)]
#[command(name = "orderly-config", version, about, long_about = None)]
pub struct Cli {
    /// Directory the mod loader keeps config files in.
    #[arg(long, default_value = "config", env = "ORDERLY_CONFIG_DIR", global = true)]
    pub config_dir: PathBuf,

    /// Mod id, used as the config file name.
    #[arg(long, default_value = DEFAULT_MOD_ID, global = true)]
    pub mod_id: String,

    /// Increase logging verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Returns the log level based on verbosity flags.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the resolved config file path.
    Path,

    /// Print the current configuration, creating the file if needed.
    Show,

    /// Overwrite the config file with default values.
    Reset,

    /// Set a single setting and save.
    Set {
        /// Setting key, e.g. `max_distance`.
        key: String,

        /// New value as JSON; anything that does not parse is taken as a string.
        value: String,
    },
}
