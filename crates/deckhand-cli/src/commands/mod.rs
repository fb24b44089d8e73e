//! CLI command definitions and dispatch.

pub mod containers;
pub mod db;
pub mod deployments;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use deckhand_api::client::ApiClient;
use deckhand_common::config::PlatformConfig;
use deckhand_common::constants::{BIN_NAME, DEFAULT_API_CONFIG_PATH};
use deckhand_common::credentials::ProcessEnv;
use serde::de::DeserializeOwned;

/// Deckhand — manage platform containers and deployments.
#[derive(Parser, Debug)]
#[command(name = BIN_NAME, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Environment document. Defaults to `config/platform.yaml` for API
    /// commands and `config/mysql.yaml` for `db`.
    #[arg(long, global = true, env = "DECKHAND_CONFIG")]
    pub config: Option<PathBuf>,

    /// Environment to target. Defaults to the entry flagged `default`.
    #[arg(long = "env", global = true, env = "DECKHAND_ENV")]
    pub environment: Option<String>,

    /// How results are printed.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// How log lines are written to stderr.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Result rendering.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned columns.
    Table,
    /// Pretty-printed JSON.
    Json,
}

/// Log line rendering.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per line.
    Json,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage containers through the platform API.
    Containers(containers::ContainersArgs),
    /// Manage deployments through the platform API.
    Deployments(deployments::DeploymentsArgs),
    /// Read and write container and deployment rows in MySQL.
    Db(db::DbArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Containers(args) => containers::execute(&cli.global, args),
        Command::Deployments(args) => deployments::execute(&cli.global, args),
        Command::Db(args) => db::execute(&cli.global, args),
    }
}

/// Loads the API environment document named by `--config`.
fn platform_config(global: &GlobalArgs) -> anyhow::Result<PlatformConfig> {
    let path = global
        .config
        .as_deref()
        .unwrap_or_else(|| Path::new(DEFAULT_API_CONFIG_PATH));
    Ok(PlatformConfig::load(path)?)
}

/// Builds an API client for the selected environment, reading the token
/// from the process environment.
fn api_client(global: &GlobalArgs, config: &PlatformConfig) -> anyhow::Result<ApiClient> {
    Ok(ApiClient::from_config(
        config,
        global.environment.as_deref(),
        &ProcessEnv,
    )?)
}

/// Reads a JSON request body from `path`.
fn read_json_file<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("invalid JSON in {}", path.display()))
}
