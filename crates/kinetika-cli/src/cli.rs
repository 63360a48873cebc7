//! Command-line argument definitions.

use clap::{Args, Parser, Subcommand};

/// Kinetika CLI - feature gating inspection
#[derive(Parser, Debug)]
#[command(name = "kinetika")]
#[command(author, version, about = "Kinetika feature gating tool", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "KINETIKA_CONFIG", global = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check whether a permission is allowed
    Check(CheckArgs),
    /// List the features that gate a permission
    Explain {
        /// Permission key, e.g. `studio.create`
        permission: String,
    },
    /// Print the effective restriction table as TOML
    Features,
    /// Configuration file operations
    Config {
        /// Config action
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Arguments for `kinetika check`.
#[derive(Args, Debug, Clone, Default)]
pub struct CheckArgs {
    /// Permission key, e.g. `finance.invoice.create`
    pub permission: String,

    /// Start from the features of this configured plan
    #[arg(short, long)]
    pub plan: Option<String>,

    /// Additional enabled feature (repeatable)
    #[arg(short, long = "feature")]
    pub features: Vec<String>,

    /// Tenant override granting a feature (repeatable, applied after plan)
    #[arg(long)]
    pub enable: Vec<String>,

    /// Tenant override revoking a feature (repeatable, applied last)
    #[arg(long)]
    pub disable: Vec<String>,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,
    /// Print a value by dotted key
    Get {
        /// Dotted key, e.g. `logging.level`
        key: String,
    },
    /// Set a value by dotted key
    Set {
        /// Dotted key
        key: String,
        /// New value (bool, integer, float or string)
        value: String,
    },
    /// Write a default config file
    Init {
        /// Where to write it (defaults to the platform config dir)
        #[arg(short, long)]
        file: Option<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the config as environment variables
    Export {
        /// Format as `--env KEY=VALUE` for docker
        #[arg(long)]
        docker_env: bool,
    },
}
