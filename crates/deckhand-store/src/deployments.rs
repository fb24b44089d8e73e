//! The `deployments` table.

use deckhand_common::error::{DeckhandError, Result};
use deckhand_common::types::DeploymentStatus;

use crate::connection::MysqlStore;
use crate::error::{from_sqlx, Statement};
use crate::records::{DeploymentRecord, DeploymentRow};
use crate::repository::{expect_affected, Repository};

const COLUMNS: &str = "id, name, description, status, environment, created_at, version, replicas";

/// [`Repository`] over `deployments`, plus [`scale`](Self::scale).
#[derive(Debug, Clone, Copy)]
pub struct DeploymentRepository<'a> {
    store: &'a MysqlStore,
}

impl<'a> DeploymentRepository<'a> {
    pub(crate) const fn new(store: &'a MysqlStore) -> Self {
        Self { store }
    }

    /// Sets the replica count of deployment `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DeckhandError::NotFound`] if no row was affected.
    pub fn scale(&self, id: &str, replicas: u32) -> Result<()> {
        let result = self
            .store
            .run(
                sqlx::query("UPDATE deployments SET replicas = ? WHERE id = ?")
                    .bind(replicas)
                    .bind(id)
                    .execute(self.store.pool()),
            )
            .map_err(|e| from_sqlx(&e, Statement::Query))?;
        expect_affected(result.rows_affected(), "deployment", id)?;
        tracing::info!(id, replicas, "deployment scaled");
        Ok(())
    }
}

impl Repository for DeploymentRepository<'_> {
    type Entity = DeploymentRecord;
    type Id = str;
    type Status = DeploymentStatus;

    fn list(&self, limit: u32) -> Result<Vec<DeploymentRecord>> {
        let sql = format!("SELECT {COLUMNS} FROM deployments ORDER BY created_at DESC LIMIT ?");
        let rows = self
            .store
            .run(
                sqlx::query_as::<_, DeploymentRow>(&sql)
                    .bind(limit)
                    .fetch_all(self.store.pool()),
            )
            .map_err(|e| from_sqlx(&e, Statement::Query))?;
        tracing::debug!(limit, returned = rows.len(), "listed deployments");
        rows.into_iter().map(DeploymentRecord::try_from).collect()
    }

    fn get(&self, id: &str) -> Result<DeploymentRecord> {
        let sql = format!("SELECT {COLUMNS} FROM deployments WHERE id = ?");
        let row = self
            .store
            .run(
                sqlx::query_as::<_, DeploymentRow>(&sql)
                    .bind(id)
                    .fetch_optional(self.store.pool()),
            )
            .map_err(|e| from_sqlx(&e, Statement::Query))?;
        row.map_or_else(
            || {
                Err(DeckhandError::NotFound {
                    kind: "deployment",
                    id: id.to_string(),
                })
            },
            DeploymentRecord::try_from,
        )
    }

    fn create(&self, deployment: &DeploymentRecord) -> Result<()> {
        let sql = format!("INSERT INTO deployments ({COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?)");
        let _ = self
            .store
            .run(
                sqlx::query(&sql)
                    .bind(deployment.id.as_str())
                    .bind(&deployment.name)
                    .bind(&deployment.description)
                    .bind(deployment.status.as_str())
                    .bind(&deployment.environment)
                    .bind(deployment.created_at)
                    .bind(&deployment.version)
                    .bind(deployment.replicas)
                    .execute(self.store.pool()),
            )
            .map_err(|e| from_sqlx(&e, Statement::Insert))?;
        tracing::info!(
            id = %deployment.id,
            name = %deployment.name,
            environment = %deployment.environment,
            "deployment row inserted"
        );
        Ok(())
    }

    fn update_status(&self, id: &str, status: DeploymentStatus) -> Result<()> {
        let result = self
            .store
            .run(
                sqlx::query("UPDATE deployments SET status = ? WHERE id = ?")
                    .bind(status.as_str())
                    .bind(id)
                    .execute(self.store.pool()),
            )
            .map_err(|e| from_sqlx(&e, Statement::Query))?;
        expect_affected(result.rows_affected(), "deployment", id)?;
        tracing::info!(id, %status, "deployment status updated");
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<()> {
        let result = self
            .store
            .run(
                sqlx::query("DELETE FROM deployments WHERE id = ?")
                    .bind(id)
                    .execute(self.store.pool()),
            )
            .map_err(|e| from_sqlx(&e, Statement::Query))?;
        expect_affected(result.rows_affected(), "deployment", id)?;
        tracing::info!(id, "deployment row deleted");
        Ok(())
    }
}
