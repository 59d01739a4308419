//! CLI command definitions

use crate::distribution::DEFAULT_API_URL;
use clap::Args;

/// Default project configuration file
pub const DEFAULT_CONFIG_FILE: &str = "project.yml";

/// Default snapshot document file
pub const DEFAULT_SNAPSHOT_FILE: &str = "target-releases.json";

/// Resolve target versions from the project
#[derive(Debug, Args, Clone)]
pub struct ResolveCommand {
    /// Path to the project configuration YAML file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: String,

    /// Where to write the snapshot document
    #[arg(short, long, default_value = DEFAULT_SNAPSHOT_FILE)]
    pub output: String,

    /// Print the snapshot document to stdout as well
    #[arg(long)]
    pub json: bool,
}

/// Verify candidate releases against the distribution service
#[derive(Debug, Args, Clone)]
pub struct VerifyCommand {
    /// Path to the snapshot document produced by resolve
    #[arg(short, long, default_value = DEFAULT_SNAPSHOT_FILE)]
    pub snapshot: String,

    /// Base URL of the distribution service API
    #[arg(long, env = "SHIPGATE_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// API token for the distribution service
    #[arg(long, env = "SHIPGATE_API_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Output the verdicts in JSON format
    #[arg(long)]
    pub json: bool,
}
