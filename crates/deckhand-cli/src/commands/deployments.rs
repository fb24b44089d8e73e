//! `deckhand deployments` — Manage deployments through the platform API.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use deckhand_api::models::{Deployment, DeploymentQuery};
use deckhand_common::constants::DEFAULT_API_PAGE_SIZE;
use deckhand_common::types::DeploymentStatus;

use super::{GlobalArgs, api_client, platform_config, read_json_file};
use crate::output::{self, deployment_table};

/// Arguments for the `deployments` command group.
#[derive(Args, Debug)]
pub struct DeploymentsArgs {
    /// Deployment operation.
    #[command(subcommand)]
    pub command: DeploymentsCommand,
}

/// Deployment operations.
#[derive(Subcommand, Debug)]
pub enum DeploymentsCommand {
    /// List deployments in the selected environment.
    List {
        /// Page size.
        #[arg(long, default_value_t = DEFAULT_API_PAGE_SIZE)]
        limit: u32,
        /// Page offset.
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
    /// Show one deployment.
    Get {
        /// Deployment ID.
        id: String,
    },
    /// Create a deployment from a JSON file.
    Create {
        /// JSON file holding the deployment definition.
        #[arg(long)]
        file: PathBuf,
    },
    /// Replace a deployment's definition from a JSON file.
    Update {
        /// Deployment ID.
        id: String,
        /// JSON file holding the new definition.
        #[arg(long)]
        file: PathBuf,
    },
    /// Change a deployment's replica count.
    Scale {
        /// Deployment ID.
        id: String,
        /// Desired replica count.
        #[arg(long)]
        replicas: u32,
    },
    /// Delete a deployment.
    Delete {
        /// Deployment ID.
        id: String,
        /// Delete even if replicas are serving.
        #[arg(short, long)]
        force: bool,
    },
}

/// Executes a `deployments` subcommand.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded, the API call
/// fails, or a definition file is unreadable.
pub fn execute(global: &GlobalArgs, args: DeploymentsArgs) -> anyhow::Result<()> {
    let config = platform_config(global)?;
    let client = api_client(global, &config)?;
    let deployments = client.deployments();
    let format = global.output;
    tracing::info!(
        endpoint = client.base_url(),
        operation = ?args.command,
        "running deployments command"
    );

    match args.command {
        DeploymentsCommand::List { limit, offset } => {
            let query = DeploymentQuery {
                environment: config.select(global.environment.as_deref())?.name.clone(),
                limit,
                offset,
            };
            let page = deployments.list(&query)?;
            if page.deployments.is_empty() {
                output::emit(&format!("No deployments found in {}.", query.environment));
                return Ok(());
            }
            output::emit(&output::render(format, &page, |p| {
                format!(
                    "{}\n\nShowing {} of {} deployments",
                    deployment_table(&p.deployments),
                    p.deployments.len(),
                    p.total
                )
            })?);
        }
        DeploymentsCommand::Get { id } => {
            let deployment = deployments.get(&id)?;
            output::emit(&output::render(format, &deployment, describe)?);
        }
        DeploymentsCommand::Create { file } => {
            let definition: Deployment = read_json_file(&file)?;
            let created = deployments.create(&definition)?;
            output::emit(&output::render(format, &created, |d| {
                format!("Created deployment {} ({})", d.id, d.name)
            })?);
        }
        DeploymentsCommand::Update { id, file } => {
            let definition: Deployment = read_json_file(&file)?;
            let updated = deployments.update(&id, &definition)?;
            output::emit(&output::render(format, &updated, |d| {
                format!("Updated deployment {id} to {}", d.version)
            })?);
        }
        DeploymentsCommand::Scale { id, replicas } => {
            let scaled = deployments.scale(&id, replicas)?;
            output::emit(&output::render(format, &scaled, |_| {
                format!("Scaled deployment {id} to {replicas} replicas")
            })?);
        }
        DeploymentsCommand::Delete { id, force } => {
            deployments.delete(&id, force)?;
            output::emit(&format!("Deleted deployment {id}"));
        }
    }
    Ok(())
}

fn describe(d: &Deployment) -> String {
    let mut lines = vec![
        format!("ID:          {}", d.id),
        format!("Name:        {}", d.name),
        format!("Environment: {}", d.environment),
        format!("Version:     {}", d.version),
        format!("Replicas:    {}", d.replicas),
        format!("Status:      {}", d.status.map_or("-", DeploymentStatus::as_str)),
    ];
    if let Some(strategy) = &d.strategy {
        lines.push(format!(
            "Strategy:    {} (max surge {}, max unavailable {})",
            strategy.kind, strategy.max_surge, strategy.max_unavailable
        ));
    }
    for spec in &d.containers {
        lines.push(format!("Container:   {} ({})", spec.name, spec.image));
    }
    for service in &d.services {
        let endpoints = if service.external_endpoints.is_empty() {
            String::new()
        } else {
            format!(" -> {}", service.external_endpoints.join(", "))
        };
        lines.push(format!("Service:     {} [{}]{endpoints}", service.name, service.kind));
    }
    lines.join("\n")
}
