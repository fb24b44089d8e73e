//! Formatted output helpers for CLI commands.
//!
//! Tables are rendered to strings so they can be tested; [`emit`] is the
//! only place that writes to stdout.

use chrono::{DateTime, Utc};
use deckhand_api::models::{Container, Deployment};
use deckhand_store::records::{ContainerRecord, DeploymentRecord};
use serde::Serialize;

use crate::commands::OutputFormat;

/// Column-aligned text table.
#[derive(Debug, Default)]
pub struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Starts a table with the given column headers.
    pub fn new(headers: &[&'static str]) -> Self {
        Self {
            headers: headers.to_vec(),
            rows: Vec::new(),
        }
    }

    /// Appends a row; missing trailing cells render empty.
    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    /// Renders the table, padding every column to its widest cell.
    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.len()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = line(&widths, self.headers.iter().copied());
        for row in &self.rows {
            out.push('\n');
            out.push_str(&line(&widths, row.iter().map(String::as_str)));
        }
        out
    }
}

fn line<'a>(widths: &[usize], cells: impl Iterator<Item = &'a str>) -> String {
    let padded: Vec<String> = widths
        .iter()
        .zip(cells)
        .map(|(width, cell)| format!("{cell:<width$}"))
        .collect();
    padded.join("  ").trim_end().to_string()
}

/// Formats an optional timestamp as `YYYY-MM-DD HH:MM:SS`, or `-`.
pub fn timestamp(at: Option<DateTime<Utc>>) -> String {
    at.map_or_else(|| "-".to_string(), |t| t.format("%Y-%m-%d %H:%M:%S").to_string())
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Containers returned by the API.
pub fn container_table(containers: &[Container]) -> String {
    let mut table = Table::new(&["CONTAINER ID", "NAME", "IMAGE", "STATUS", "CREATED"]);
    for c in containers {
        table.row(vec![
            c.id.to_string(),
            c.name.clone(),
            c.image.clone(),
            or_dash(c.status),
            timestamp(c.created_at),
        ]);
    }
    table.render()
}

/// Deployments returned by the API.
pub fn deployment_table(deployments: &[Deployment]) -> String {
    let mut table = Table::new(&[
        "DEPLOYMENT ID",
        "NAME",
        "ENVIRONMENT",
        "VERSION",
        "REPLICAS",
        "STATUS",
    ]);
    for d in deployments {
        table.row(vec![
            d.id.to_string(),
            d.name.clone(),
            d.environment.clone(),
            d.version.clone(),
            d.replicas.to_string(),
            or_dash(d.status),
        ]);
    }
    table.render()
}

/// Container rows read from MySQL.
pub fn container_record_table(records: &[ContainerRecord]) -> String {
    let mut table = Table::new(&["CONTAINER ID", "NAME", "IMAGE", "STATUS", "CREATED", "LABELS"]);
    for r in records {
        let labels: Vec<String> = r.labels.iter().map(|(k, v)| format!("{k}={v}")).collect();
        table.row(vec![
            r.id.to_string(),
            r.name.clone(),
            r.image.clone(),
            r.status.to_string(),
            timestamp(Some(r.created_at)),
            labels.join(","),
        ]);
    }
    table.render()
}

/// Deployment rows read from MySQL.
pub fn deployment_record_table(records: &[DeploymentRecord]) -> String {
    let mut table = Table::new(&[
        "DEPLOYMENT ID",
        "NAME",
        "ENVIRONMENT",
        "VERSION",
        "REPLICAS",
        "STATUS",
        "CREATED",
    ]);
    for r in records {
        table.row(vec![
            r.id.to_string(),
            r.name.clone(),
            r.environment.clone(),
            r.version.clone(),
            r.replicas.to_string(),
            r.status.to_string(),
            timestamp(Some(r.created_at)),
        ]);
    }
    table.render()
}

/// Renders `value` as JSON or through `table`, depending on `format`.
///
/// # Errors
///
/// Returns an error if `value` cannot be encoded as JSON.
pub fn render<T: Serialize + ?Sized>(
    format: OutputFormat,
    value: &T,
    table: impl FnOnce(&T) -> String,
) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Table => table(value),
    })
}

/// Writes `text` and a trailing newline to stdout.
#[allow(clippy::print_stdout)]
pub fn emit(text: &str) {
    println!("{text}");
}
