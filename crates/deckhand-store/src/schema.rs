//! `CREATE TABLE IF NOT EXISTS` rendering from a document's table hints.

use std::fmt::Write as _;

use deckhand_common::config::{ColumnSchema, Defaults, TableSchema};
use deckhand_common::error::{DeckhandError, Result};

use crate::connection::MysqlStore;
use crate::error::{from_sqlx, Statement};

/// Table hints for `containers` and `deployments`, used when a document
/// carries none.
#[must_use]
pub fn builtin_tables() -> Vec<TableSchema> {
    let column = |name: &str, sql_type: &str| ColumnSchema {
        name: name.to_string(),
        sql_type: sql_type.to_string(),
        ..ColumnSchema::default()
    };
    let primary = |name: &str| ColumnSchema {
        primary_key: true,
        ..column(name, "VARCHAR(64)")
    };
    let indexed = |name: &str, sql_type: &str| ColumnSchema {
        index: true,
        ..column(name, sql_type)
    };
    let created_at = ColumnSchema {
        default: Some("CURRENT_TIMESTAMP".to_string()),
        index: true,
        ..column("created_at", "TIMESTAMP")
    };

    vec![
        TableSchema {
            name: "containers".to_string(),
            columns: vec![
                primary("id"),
                column("name", "VARCHAR(255)"),
                column("image", "VARCHAR(512)"),
                indexed("status", "VARCHAR(32)"),
                created_at.clone(),
                ColumnSchema {
                    nullable: true,
                    ..column("labels", "JSON")
                },
            ],
        },
        TableSchema {
            name: "deployments".to_string(),
            columns: vec![
                primary("id"),
                column("name", "VARCHAR(255)"),
                ColumnSchema {
                    nullable: true,
                    ..column("description", "TEXT")
                },
                indexed("status", "VARCHAR(32)"),
                indexed("environment", "VARCHAR(64)"),
                created_at,
                column("version", "VARCHAR(64)"),
                ColumnSchema {
                    default: Some("1".to_string()),
                    ..column("replicas", "INT")
                },
            ],
        },
    ]
}

/// Renders the `CREATE TABLE IF NOT EXISTS` statement for `table`.
///
/// # Errors
///
/// Returns [`DeckhandError::Config`] if the table has no name, no columns,
/// or a column without a name or type.
pub fn create_table_statement(table: &TableSchema, defaults: &Defaults) -> Result<String> {
    if table.name.is_empty() {
        return Err(DeckhandError::config("table hint without a name"));
    }
    if table.columns.is_empty() {
        return Err(DeckhandError::config(format!(
            "table {} declares no columns",
            table.name
        )));
    }

    let mut lines = Vec::with_capacity(table.columns.len() * 2);
    for column in &table.columns {
        if column.name.is_empty() || column.sql_type.is_empty() {
            return Err(DeckhandError::config(format!(
                "table {} has a column without a name or type",
                table.name
            )));
        }
        lines.push(column_definition(column));
    }

    let primary: Vec<String> = table
        .columns
        .iter()
        .filter(|c| c.primary_key)
        .map(|c| quote(&c.name))
        .collect();
    if !primary.is_empty() {
        lines.push(format!("PRIMARY KEY ({})", primary.join(", ")));
    }

    for column in &table.columns {
        let quoted = quote(&column.name);
        if column.unique {
            lines.push(format!(
                "UNIQUE KEY {} ({quoted})",
                quote(&format!("uk_{}_{}", table.name, column.name))
            ));
        } else if column.index && !column.primary_key {
            lines.push(format!(
                "KEY {} ({quoted})",
                quote(&format!("idx_{}_{}", table.name, column.name))
            ));
        }
        if let Some(fk) = column.foreign_key.as_ref().filter(|fk| !fk.table.is_empty()) {
            let mut constraint = format!(
                "CONSTRAINT {} FOREIGN KEY ({quoted}) REFERENCES {} ({})",
                quote(&format!("fk_{}_{}", table.name, column.name)),
                quote(&fk.table),
                quote(if fk.column.is_empty() { "id" } else { &fk.column }),
            );
            if !fk.on_delete.is_empty() {
                let _ = write!(constraint, " ON DELETE {}", fk.on_delete);
            }
            lines.push(constraint);
        }
    }

    let mut statement = format!(
        "CREATE TABLE IF NOT EXISTS {} (\n  {}\n) ENGINE=InnoDB",
        quote(&table.name),
        lines.join(",\n  ")
    );
    if !defaults.charset.is_empty() {
        let _ = write!(statement, " DEFAULT CHARSET={}", defaults.charset);
    }
    if !defaults.collation.is_empty() {
        let _ = write!(statement, " COLLATE={}", defaults.collation);
    }
    Ok(statement)
}

fn column_definition(column: &ColumnSchema) -> String {
    let mut definition = format!("{} {}", quote(&column.name), column.sql_type);
    if column.nullable && !column.primary_key {
        definition.push_str(" NULL");
    } else {
        definition.push_str(" NOT NULL");
    }
    if let Some(default) = column.default.as_deref() {
        let _ = write!(definition, " DEFAULT {default}");
    }
    if let Some(on_update) = column.on_update.as_deref() {
        let _ = write!(definition, " ON UPDATE {on_update}");
    }
    definition
}

fn quote(identifier: &str) -> String {
    format!("`{}`", identifier.replace('`', "``"))
}

impl MysqlStore {
    /// Creates every table in `tables` that does not exist yet, one
    /// auto-committed statement per table. Returns the number of statements
    /// executed.
    ///
    /// # Errors
    ///
    /// Returns [`DeckhandError::Config`] for an unusable table hint and a
    /// query error if the server rejects a statement. Tables created before
    /// the failure are kept.
    pub fn ensure_schema(&self, tables: &[TableSchema], defaults: &Defaults) -> Result<usize> {
        let statements = tables
            .iter()
            .map(|table| create_table_statement(table, defaults))
            .collect::<Result<Vec<_>>>()?;

        for (table, statement) in tables.iter().zip(&statements) {
            tracing::debug!(table = %table.name, %statement, "ensuring table");
            let _ = self
                .run(sqlx::raw_sql(statement).execute(self.pool()))
                .map_err(|e| from_sqlx(&e, Statement::Query))?;
            tracing::info!(table = %table.name, environment = self.environment(), "table ensured");
        }
        Ok(statements.len())
    }
}
