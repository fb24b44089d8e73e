//! `deckhand containers` — Manage containers through the platform API.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use deckhand_api::models::{
    Container, ContainerQuery, DeleteContainerOptions, ExecRequest, LogQuery,
};
use deckhand_common::constants::APP_NAME;
use deckhand_common::types::ContainerStatus;

use super::{GlobalArgs, OutputFormat, api_client, platform_config, read_json_file};
use crate::output::{self, container_table, timestamp};

/// Arguments for the `containers` command group.
#[derive(Args, Debug)]
pub struct ContainersArgs {
    /// Container operation.
    #[command(subcommand)]
    pub command: ContainersCommand,
}

/// Container operations.
#[derive(Subcommand, Debug)]
pub enum ContainersCommand {
    /// List containers.
    List {
        /// Only containers in this status, e.g. `running`.
        #[arg(long)]
        status: Option<String>,
        /// Page size. The server's default applies when omitted.
        #[arg(long)]
        limit: Option<u32>,
        /// Page offset.
        #[arg(long)]
        offset: Option<u32>,
    },
    /// Show one container.
    Get {
        /// Container ID.
        id: String,
    },
    /// Create a container from a JSON file or from flags.
    Create(CreateArgs),
    /// Start a container.
    Start {
        /// Container ID.
        id: String,
    },
    /// Stop a container.
    Stop {
        /// Container ID.
        id: String,
        /// Seconds to wait before killing.
        #[arg(long)]
        timeout: Option<u32>,
    },
    /// Restart a container.
    Restart {
        /// Container ID.
        id: String,
        /// Seconds to wait before killing.
        #[arg(long)]
        timeout: Option<u32>,
    },
    /// Delete a container.
    Delete {
        /// Container ID.
        id: String,
        /// Delete even if running.
        #[arg(short, long)]
        force: bool,
        /// Also remove the container's volumes.
        #[arg(long)]
        remove_volumes: bool,
    },
    /// Print a container's logs.
    Logs {
        /// Container ID.
        id: String,
        /// Number of trailing lines.
        #[arg(long)]
        tail: Option<u32>,
        /// Only entries at or after this ISO-8601 instant.
        #[arg(long)]
        since: Option<String>,
        /// Only entries before this ISO-8601 instant.
        #[arg(long)]
        until: Option<String>,
        /// Ask the server to follow the stream.
        #[arg(short, long)]
        follow: bool,
    },
    /// Run a command inside a container.
    Exec {
        /// Container ID.
        id: String,
        /// Command to run. A single argument is split on whitespace.
        #[arg(trailing_var_arg = true, required = true)]
        command: Vec<String>,
    },
}

/// Arguments for `containers create`.
#[derive(Args, Debug)]
#[command(group(clap::ArgGroup::new("source").required(true).args(["file", "name"])))]
pub struct CreateArgs {
    /// JSON file holding the full container definition.
    #[arg(long, conflicts_with_all = ["image", "environment"])]
    pub file: Option<PathBuf>,
    /// Container name.
    #[arg(long, requires = "image")]
    pub name: Option<String>,
    /// Image reference.
    #[arg(long)]
    pub image: Option<String>,
    /// Value of the `environment` label.
    #[arg(long, default_value = "development")]
    pub environment: String,
}

impl CreateArgs {
    fn into_container(self) -> anyhow::Result<Container> {
        if let Some(path) = self.file {
            return read_json_file(&path);
        }
        let (Some(name), Some(image)) = (self.name, self.image) else {
            anyhow::bail!("either --file or both --name and --image are required");
        };
        Ok(Container::new(name.clone(), image)
            .label("app", name)
            .label("environment", self.environment)
            .label("created_by", APP_NAME))
    }
}

/// Executes a `containers` subcommand.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded, the API call
/// fails, or a request body file is unreadable.
pub fn execute(global: &GlobalArgs, args: ContainersArgs) -> anyhow::Result<()> {
    let client = api_client(global, &platform_config(global)?)?;
    let containers = client.containers();
    let format = global.output;
    tracing::info!(
        endpoint = client.base_url(),
        operation = ?args.command,
        "running containers command"
    );

    match args.command {
        ContainersCommand::List {
            status,
            limit,
            offset,
        } => {
            let query = ContainerQuery {
                status: status.as_deref().map(parse_status).transpose()?,
                limit,
                offset,
            };
            let page = containers.list(&query)?;
            if page.containers.is_empty() {
                output::emit("No containers found.");
                return Ok(());
            }
            output::emit(&output::render(format, &page, |p| {
                format!(
                    "{}\n\nShowing {} of {} containers",
                    container_table(&p.containers),
                    p.containers.len(),
                    p.total
                )
            })?);
        }
        ContainersCommand::Get { id } => {
            let container = containers.get(&id)?;
            output::emit(&output::render(format, &container, |c| {
                container_table(std::slice::from_ref(c))
            })?);
        }
        ContainersCommand::Create(create) => {
            let created = containers.create(&create.into_container()?)?;
            output::emit(&output::render(format, &created, |c| {
                format!("Created container {} ({})", c.id, status_or_dash(c.status))
            })?);
        }
        ContainersCommand::Start { id } => {
            let container = containers.start(&id)?;
            emit_transition(format, &container)?;
        }
        ContainersCommand::Stop { id, timeout } => {
            let container = containers.stop(&id, timeout)?;
            emit_transition(format, &container)?;
        }
        ContainersCommand::Restart { id, timeout } => {
            let container = containers.restart(&id, timeout)?;
            emit_transition(format, &container)?;
        }
        ContainersCommand::Delete {
            id,
            force,
            remove_volumes,
        } => {
            let container = containers.delete(
                &id,
                DeleteContainerOptions {
                    force,
                    remove_volumes,
                },
            )?;
            emit_transition(format, &container)?;
        }
        ContainersCommand::Logs {
            id,
            tail,
            since,
            until,
            follow,
        } => {
            let logs = containers.logs(
                &id,
                &LogQuery {
                    tail,
                    since,
                    until,
                    follow,
                },
            )?;
            output::emit(&output::render(format, &logs, |l| {
                l.logs
                    .iter()
                    .map(|e| format!("{} [{}] {}", timestamp(Some(e.timestamp)), e.stream, e.message))
                    .collect::<Vec<_>>()
                    .join("\n")
            })?);
        }
        ContainersCommand::Exec { id, command } => {
            let request = exec_request(command);
            let result = containers.exec(&id, &request)?;
            if format == OutputFormat::Json {
                output::emit(&serde_json::to_string_pretty(&result)?);
                return Ok(());
            }
            if !result.stdout.is_empty() {
                output::emit(result.stdout.trim_end_matches('\n'));
            }
            if !result.stderr.is_empty() {
                #[allow(clippy::print_stderr)]
                {
                    eprintln!("{}", result.stderr.trim_end_matches('\n'));
                }
            }
            if result.exit_code != 0 {
                std::process::exit(result.exit_code);
            }
        }
    }
    Ok(())
}

fn parse_status(value: &str) -> anyhow::Result<ContainerStatus> {
    let status = value.parse().unwrap_or_default();
    if status == ContainerStatus::Unknown {
        anyhow::bail!("unknown container status '{value}'");
    }
    Ok(status)
}

fn exec_request(mut command: Vec<String>) -> ExecRequest {
    if command.len() == 1 {
        return ExecRequest::from_command_line(&command.remove(0));
    }
    ExecRequest {
        command,
        attach_stdout: true,
        attach_stderr: true,
    }
}

fn status_or_dash(status: Option<ContainerStatus>) -> &'static str {
    status.map_or("-", ContainerStatus::as_str)
}

fn emit_transition(format: OutputFormat, container: &Container) -> anyhow::Result<()> {
    output::emit(&output::render(format, container, |c| {
        let mut line = format!("{}: {}", c.id, status_or_dash(c.status));
        if !c.message.is_empty() {
            line.push_str(" - ");
            line.push_str(&c.message);
        }
        line
    })?);
    Ok(())
}
