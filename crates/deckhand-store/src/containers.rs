//! The `containers` table.

use deckhand_common::error::{DeckhandError, Result};
use deckhand_common::types::ContainerStatus;

use crate::connection::MysqlStore;
use crate::error::{from_sqlx, Statement};
use crate::records::{ContainerRecord, ContainerRow};
use crate::repository::{expect_affected, Repository};

// JSON columns are read back as text.
const SELECT: &str =
    "SELECT id, name, image, status, created_at, CAST(labels AS CHAR) AS labels FROM containers";
const INSERT: &str = "INSERT INTO containers (id, name, image, status, created_at, labels) \
                      VALUES (?, ?, ?, ?, ?, ?)";
const UPDATE_STATUS: &str = "UPDATE containers SET status = ? WHERE id = ?";
const DELETE: &str = "DELETE FROM containers WHERE id = ?";

/// [`Repository`] over `containers`.
#[derive(Debug, Clone, Copy)]
pub struct ContainerRepository<'a> {
    store: &'a MysqlStore,
}

impl<'a> ContainerRepository<'a> {
    pub(crate) const fn new(store: &'a MysqlStore) -> Self {
        Self { store }
    }
}

impl Repository for ContainerRepository<'_> {
    type Entity = ContainerRecord;
    type Id = str;
    type Status = ContainerStatus;

    fn list(&self, limit: u32) -> Result<Vec<ContainerRecord>> {
        let sql = format!("{SELECT} ORDER BY created_at DESC LIMIT ?");
        let rows = self
            .store
            .run(
                sqlx::query_as::<_, ContainerRow>(&sql)
                    .bind(limit)
                    .fetch_all(self.store.pool()),
            )
            .map_err(|e| from_sqlx(&e, Statement::Query))?;
        tracing::debug!(limit, returned = rows.len(), "listed containers");
        rows.into_iter().map(ContainerRecord::try_from).collect()
    }

    fn get(&self, id: &str) -> Result<ContainerRecord> {
        let sql = format!("{SELECT} WHERE id = ?");
        let row = self
            .store
            .run(
                sqlx::query_as::<_, ContainerRow>(&sql)
                    .bind(id)
                    .fetch_optional(self.store.pool()),
            )
            .map_err(|e| from_sqlx(&e, Statement::Query))?;
        match row {
            Some(row) => ContainerRecord::try_from(row),
            None => Err(DeckhandError::NotFound {
                kind: "container",
                id: id.to_string(),
            }),
        }
    }

    fn create(&self, container: &ContainerRecord) -> Result<()> {
        let labels = container.labels_json()?;
        let _ = self
            .store
            .run(
                sqlx::query(INSERT)
                    .bind(container.id.as_str())
                    .bind(&container.name)
                    .bind(&container.image)
                    .bind(container.status.as_str())
                    .bind(container.created_at)
                    .bind(labels)
                    .execute(self.store.pool()),
            )
            .map_err(|e| from_sqlx(&e, Statement::Insert))?;
        tracing::info!(id = %container.id, name = %container.name, "container row inserted");
        Ok(())
    }

    fn update_status(&self, id: &str, status: ContainerStatus) -> Result<()> {
        let result = self
            .store
            .run(
                sqlx::query(UPDATE_STATUS)
                    .bind(status.as_str())
                    .bind(id)
                    .execute(self.store.pool()),
            )
            .map_err(|e| from_sqlx(&e, Statement::Query))?;
        expect_affected(result.rows_affected(), "container", id)?;
        tracing::info!(id, %status, "container status updated");
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<()> {
        let result = self
            .store
            .run(sqlx::query(DELETE).bind(id).execute(self.store.pool()))
            .map_err(|e| from_sqlx(&e, Statement::Query))?;
        expect_affected(result.rows_affected(), "container", id)?;
        tracing::info!(id, "container row deleted");
        Ok(())
    }
}
