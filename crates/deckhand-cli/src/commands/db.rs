//! `deckhand db` — Read container and deployment rows from MySQL.

use std::path::Path;

use clap::{Args, Subcommand};
use deckhand_common::config::DatabaseConfig;
use deckhand_common::constants::{
    DEFAULT_DB_CONFIG_PATH, DEFAULT_DB_ENVIRONMENT, DEFAULT_DB_LIST_LIMIT,
};
use deckhand_common::credentials::ProcessEnv;
use deckhand_store::MysqlStore;
use deckhand_store::records::{ContainerRecord, DeploymentRecord};
use deckhand_store::repository::Repository;
use deckhand_store::schema::builtin_tables;

use super::GlobalArgs;
use crate::output::{self, container_record_table, deployment_record_table, timestamp};

/// Arguments for the `db` command group.
#[derive(Args, Debug)]
pub struct DbArgs {
    /// Database operation.
    #[command(subcommand)]
    pub command: DbCommand,
}

/// Database operations.
#[derive(Subcommand, Debug)]
pub enum DbCommand {
    /// List the newest container rows.
    ListContainers {
        /// Maximum number of rows.
        #[arg(default_value_t = DEFAULT_DB_LIST_LIMIT)]
        limit: u32,
    },
    /// Show one container row.
    GetContainer {
        /// Container ID.
        id: String,
    },
    /// List the newest deployment rows.
    ListDeployments {
        /// Maximum number of rows.
        #[arg(default_value_t = DEFAULT_DB_LIST_LIMIT)]
        limit: u32,
    },
    /// Show one deployment row.
    GetDeployment {
        /// Deployment ID.
        id: String,
    },
    /// Create missing tables from the document's table hints.
    InitSchema,
}

/// Executes a `db` subcommand.
///
/// Without `--env` the document's default entry is used, falling back to
/// `production` when none is flagged.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded, credentials are
/// missing, the server is unreachable, or a statement fails.
pub fn execute(global: &GlobalArgs, args: DbArgs) -> anyhow::Result<()> {
    let path = global
        .config
        .as_deref()
        .unwrap_or_else(|| Path::new(DEFAULT_DB_CONFIG_PATH));
    let config = DatabaseConfig::load(path)?;
    let environment = match global.environment.as_deref() {
        Some(name) => Some(name),
        None if config.default_environment().is_ok() => None,
        None => Some(DEFAULT_DB_ENVIRONMENT),
    };
    let store = MysqlStore::connect(&config, environment, &ProcessEnv)?;
    let format = global.output;
    tracing::info!(
        environment = store.environment(),
        operation = ?args.command,
        "running db command"
    );

    match args.command {
        DbCommand::ListContainers { limit } => {
            let records = store.containers().list(limit)?;
            output::emit(&output::render(format, &records, |r| {
                format!(
                    "Found {} containers:\n{}",
                    r.len(),
                    container_record_table(r)
                )
            })?);
        }
        DbCommand::GetContainer { id } => {
            let record = store.containers().get(&id)?;
            output::emit(&output::render(format, &record, describe_container)?);
        }
        DbCommand::ListDeployments { limit } => {
            let records = store.deployments().list(limit)?;
            output::emit(&output::render(format, &records, |r| {
                format!(
                    "Found {} deployments:\n{}",
                    r.len(),
                    deployment_record_table(r)
                )
            })?);
        }
        DbCommand::GetDeployment { id } => {
            let record = store.deployments().get(&id)?;
            output::emit(&output::render(format, &record, describe_deployment)?);
        }
        DbCommand::InitSchema => {
            let tables = if config.tables.is_empty() {
                builtin_tables()
            } else {
                config.tables.clone()
            };
            let created = store.ensure_schema(&tables, &config.defaults)?;
            output::emit(&format!(
                "Ensured {created} tables in {}",
                store.environment()
            ));
        }
    }

    store.close();
    Ok(())
}

fn describe_container(r: &ContainerRecord) -> String {
    let labels: Vec<String> = r.labels.iter().map(|(k, v)| format!("{k}={v}")).collect();
    [
        format!("ID:      {}", r.id),
        format!("Name:    {}", r.name),
        format!("Image:   {}", r.image),
        format!("Status:  {}", r.status),
        format!("Created: {}", timestamp(Some(r.created_at))),
        format!("Labels:  {}", labels.join(", ")),
    ]
    .join("\n")
}

fn describe_deployment(r: &DeploymentRecord) -> String {
    [
        format!("ID:          {}", r.id),
        format!("Name:        {}", r.name),
        format!("Description: {}", r.description),
        format!("Status:      {}", r.status),
        format!("Environment: {}", r.environment),
        format!("Created:     {}", timestamp(Some(r.created_at))),
        format!("Version:     {}", r.version),
        format!("Replicas:    {}", r.replicas),
    ]
    .join("\n")
}
