//! `TableSchema` - load JSON into table definitions and dump them back.

use serde::Deserialize;
use serde_json::Value;

use crate::descriptor::TableDescriptor;
use crate::error::Result;
use crate::mapping::{decode_table, encode_table, MapperContext, TypeOverrides};
use crate::relational::{MetaData, TableDef};

/// Entry point for loading and dumping table payloads.
///
/// ```
/// use serde_json::json;
/// use tabschema_core::TableSchema;
///
/// let table = TableSchema::new()
///     .load(&json!({
///         "name": "articles",
///         "fields": [{"name": "id", "type": "int", "constraints": {"required": true}}],
///         "primaryKey": ["id"]
///     }))
///     .unwrap();
///
/// assert_eq!(table.columns().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TableSchema {
    context: MapperContext,
}

impl TableSchema {
    /// Create a schema using the default type registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override type tag resolution for every call made through this schema.
    pub fn with_type_overrides(mut self, overrides: TypeOverrides) -> Self {
        self.context.type_overrides = Some(overrides);
        self
    }

    /// Set the namespace for tables that do not name one.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.context.namespace = Some(namespace.into());
        self
    }

    /// The mapping context in use.
    pub fn context(&self) -> &MapperContext {
        &self.context
    }

    /// Load a table definition from a JSON value.
    pub fn load(&self, value: &Value) -> Result<TableDef> {
        let descriptor = TableDescriptor::deserialize(value)?;
        self.load_descriptor(&descriptor)
    }

    /// Load a table definition from JSON text.
    pub fn load_str(&self, json: &str) -> Result<TableDef> {
        self.load_descriptor(&TableDescriptor::from_json(json)?)
    }

    /// Load a table definition from a decoded descriptor.
    pub fn load_descriptor(&self, descriptor: &TableDescriptor) -> Result<TableDef> {
        decode_table(descriptor, &self.context)
    }

    /// Load a table and register it in `metadata`.
    ///
    /// The container's namespace applies unless the payload or this schema
    /// names one. Registering a table the container already holds fails.
    pub fn load_into<'m>(&self, value: &Value, metadata: &'m mut MetaData) -> Result<&'m TableDef> {
        let descriptor = TableDescriptor::deserialize(value)?;
        let mut context = self.context.clone();
        if context.namespace.is_none() {
            context.namespace = metadata.schema.clone();
        }
        let table = decode_table(&descriptor, &context)?;
        metadata.add_table(table)
    }

    /// Dump a table definition to a descriptor.
    pub fn dump_descriptor(&self, table: &TableDef) -> Result<TableDescriptor> {
        encode_table(table, &self.context)
    }

    /// Dump a table definition to a JSON value.
    pub fn dump(&self, table: &TableDef) -> Result<Value> {
        self.dump_descriptor(table)?.to_value()
    }

    /// Dump a table definition to pretty-printed JSON text.
    pub fn dump_string(&self, table: &TableDef) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.dump_descriptor(table)?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::relational::RelationalType;
    use serde_json::json;

    fn posts() -> Value {
        json!({
            "name": "posts",
            "fields": [
                {"name": "id", "type": "int", "constraints": {"required": true}},
                {"name": "title", "type": "str"}
            ],
            "primaryKey": ["id"]
        })
    }

    #[test]
    fn test_load_and_dump() {
        let schema = TableSchema::new();
        let table = schema.load(&posts()).unwrap();

        assert_eq!(schema.dump(&table).unwrap(), posts());
    }

    #[test]
    fn test_load_str_invalid_json() {
        let err = TableSchema::new().load_str("{\"name\": ").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_load_into_uses_container_namespace() {
        let mut metadata = MetaData::with_schema("blog");
        let schema = TableSchema::new();

        let table = schema.load_into(&posts(), &mut metadata).unwrap();
        assert_eq!(table.qualified_name(), "blog.posts");

        let err = schema.load_into(&posts(), &mut metadata).unwrap_err();
        assert!(matches!(err, Error::TableExists(_)));
        assert_eq!(metadata.tables().len(), 1);
    }

    #[test]
    fn test_type_overrides_are_per_schema() {
        let overridden = TableSchema::new()
            .with_type_overrides(TypeOverrides::new().with("str", RelationalType::Text));

        let table = overridden.load(&posts()).unwrap();
        assert_eq!(table.column("title").unwrap().column_type, RelationalType::Text);

        let table = TableSchema::new().load(&posts()).unwrap();
        assert_eq!(table.column("title").unwrap().column_type, RelationalType::string());
    }
}
