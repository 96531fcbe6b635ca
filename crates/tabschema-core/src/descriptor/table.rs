//! Table descriptors.

use super::field::FieldDescriptor;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON description of one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableDescriptor {
    /// Table name.
    pub name: String,
    /// Namespace qualifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// Human readable label. Not carried into the relational model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Fields in column order.
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
    /// Primary key column names, in key order.
    #[serde(
        rename = "primaryKey",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub primary_key: Option<Vec<String>>,
}

impl TableDescriptor {
    /// Create a table descriptor with no fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: None,
            title: None,
            fields: Vec::new(),
            primary_key: None,
        }
    }

    /// Set the namespace.
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Add a field.
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Set the primary key.
    pub fn with_primary_key(mut self, columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.primary_key = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Decode a descriptor from a JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Decode a descriptor from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode the descriptor as a JSON value.
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Get a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Check table-level required and non-empty properties.
    ///
    /// Fields are validated individually as they are mapped.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::EmptyName("table"));
        }
        if matches!(&self.schema, Some(s) if s.is_empty()) {
            return Err(Error::Validation(format!(
                "table \"{}\" has an empty schema",
                self.name
            )));
        }
        if let Some(pk) = &self.primary_key {
            if pk.is_empty() {
                return Err(Error::Validation(format!(
                    "table \"{}\" declares an empty primaryKey",
                    self.name
                )));
            }
            if pk.iter().any(String::is_empty) {
                return Err(Error::Validation(format!(
                    "table \"{}\" has an empty primaryKey entry",
                    self.name
                )));
            }
        }
        Ok(())
    }
}
