//! Table and column hints carried by the MySQL document.

use serde::{Deserialize, Serialize};

/// A table described in `tables[]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSchema {
    /// Table name.
    pub name: String,
    /// Columns in declaration order.
    pub columns: Vec<ColumnSchema>,
}

/// A column of a [`TableSchema`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSchema {
    /// Column name.
    pub name: String,
    /// SQL type, e.g. `VARCHAR(64)`.
    #[serde(rename = "type")]
    pub sql_type: String,
    /// Part of the primary key.
    pub primary_key: bool,
    /// Accepts NULL.
    pub nullable: bool,
    /// Default value expression, emitted verbatim.
    pub default: Option<String>,
    /// Gets a secondary index.
    pub index: bool,
    /// Gets a unique constraint.
    pub unique: bool,
    /// `ON UPDATE` expression, emitted verbatim.
    pub on_update: Option<String>,
    /// Foreign key reference.
    pub foreign_key: Option<ForeignKey>,
}

/// A foreign key reference from a column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForeignKey {
    /// Referenced table.
    pub table: String,
    /// Referenced column.
    pub column: String,
    /// Referential action on delete, e.g. `CASCADE`.
    pub on_delete: String,
}
