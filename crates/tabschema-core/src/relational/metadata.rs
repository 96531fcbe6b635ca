//! Metadata container - a namespace holding a collection of tables.

use super::table::TableDef;
use crate::error::{Error, Result};

/// A collection of table definitions sharing an optional default namespace.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetaData {
    /// Namespace applied to tables that do not name their own.
    pub schema: Option<String>,
    /// Tables in insertion order.
    tables: Vec<TableDef>,
}

impl MetaData {
    /// Create an empty container without a default namespace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty container with a default namespace.
    pub fn with_schema(schema: impl Into<String>) -> Self {
        Self {
            schema: Some(schema.into()),
            tables: Vec::new(),
        }
    }

    /// Add a table. Each namespace and name pair must be unique.
    pub fn add_table(&mut self, table: TableDef) -> Result<&TableDef> {
        if self.tables.iter().any(|t| t.is(table.schema.as_deref(), &table.name)) {
            return Err(Error::TableExists(table.qualified_name()));
        }
        self.tables.push(table);
        Ok(&self.tables[self.tables.len() - 1])
    }

    /// Check if a table is defined, resolving `schema` against the default namespace.
    pub fn has_table(&self, name: &str, schema: Option<&str>) -> bool {
        self.table(name, schema).is_some()
    }

    /// Get a table by name, resolving `schema` against the default namespace.
    pub fn table(&self, name: &str, schema: Option<&str>) -> Option<&TableDef> {
        let schema = schema.or(self.schema.as_deref());
        self.tables.iter().find(|t| t.is(schema, name))
    }

    /// All tables, in insertion order.
    pub fn tables(&self) -> &[TableDef] {
        &self.tables
    }

    /// Remove a table, returning it if it was present.
    pub fn remove_table(&mut self, name: &str, schema: Option<&str>) -> Option<TableDef> {
        let schema = schema.or(self.schema.as_deref());
        let index = self.tables.iter().position(|t| t.is(schema, name))?;
        Some(self.tables.remove(index))
    }
}
