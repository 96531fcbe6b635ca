//! Table definitions.

use super::column::ColumnDef;
use super::constraint::PrimaryKeyConstraint;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a table: optional namespace plus name.
///
/// Compared field by field, so `a.b` (no namespace) and `b` in namespace `a`
/// are distinct tables even though they display the same.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TableKey {
    /// Namespace qualifier.
    pub schema: Option<String>,
    /// Table name.
    pub name: String,
}

impl TableKey {
    /// Create a key.
    pub fn new(schema: Option<&str>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.map(str::to_string),
            name: name.into(),
        }
    }
}

impl fmt::Display for TableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{}.{}", schema, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A relational table definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDef {
    /// Table name.
    pub name: String,
    /// Namespace qualifier.
    pub schema: Option<String>,
    /// Columns in declaration order.
    columns: Vec<ColumnDef>,
    /// Primary key, if declared.
    primary_key: Option<PrimaryKeyConstraint>,
}

impl TableDef {
    /// Create an empty table.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: None,
            columns: Vec::new(),
            primary_key: None,
        }
    }

    /// Set the namespace.
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Add a column, builder style.
    pub fn with_column(mut self, column: ColumnDef) -> Result<Self> {
        self.append_column(column)?;
        Ok(self)
    }

    /// Set the primary key, builder style.
    pub fn with_primary_key(mut self, pk: PrimaryKeyConstraint) -> Result<Self> {
        self.append_constraint(pk)?;
        Ok(self)
    }

    /// Append a column. Column names must be unique within the table.
    pub fn append_column(&mut self, column: ColumnDef) -> Result<()> {
        if self.column(&column.name).is_some() {
            return Err(Error::DuplicateColumn {
                table: self.name.clone(),
                column: column.name,
            });
        }
        self.columns.push(column);
        Ok(())
    }

    /// Attach the primary key. Every key column must already exist and is
    /// marked not-null.
    pub fn append_constraint(&mut self, pk: PrimaryKeyConstraint) -> Result<()> {
        if let Some(missing) = pk.columns.iter().find(|c| self.column(c).is_none()) {
            return Err(Error::MissingColumn {
                table: self.name.clone(),
                column: missing.clone(),
            });
        }
        for column in self.columns.iter_mut().filter(|c| pk.contains(&c.name)) {
            column.nullable = false;
        }
        self.primary_key = Some(pk);
        Ok(())
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// All columns, in declaration order.
    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    /// The primary key constraint, if any.
    pub fn primary_key(&self) -> Option<&PrimaryKeyConstraint> {
        self.primary_key.as_ref()
    }

    /// Check if a column belongs to the primary key.
    pub fn is_primary_key(&self, column: &str) -> bool {
        self.primary_key
            .as_ref()
            .map(|pk| pk.contains(column))
            .unwrap_or(false)
    }

    /// Identity used by table containers.
    pub fn key(&self) -> TableKey {
        TableKey::new(self.schema.as_deref(), self.name.clone())
    }

    /// Check if this table has the given namespace and name.
    pub fn is(&self, schema: Option<&str>, name: &str) -> bool {
        self.schema.as_deref() == schema && self.name == name
    }

    /// Name qualified with the namespace for display, e.g. `scma.foobar`.
    pub fn qualified_name(&self) -> String {
        self.key().to_string()
    }
}
