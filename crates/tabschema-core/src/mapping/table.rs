//! Table mapping - the top-level load and dump entry points.

use tracing::{debug, instrument};

use super::constraint::{lossy_checks, LossyConversion};
use super::field::{decode_field, encode_field};
use super::registry::{TypeOverrides, TypeRegistry};
use crate::descriptor::TableDescriptor;
use crate::error::Result;
use crate::relational::{PrimaryKeyConstraint, TableDef};

/// Per-call mapping configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapperContext {
    /// Namespace for tables whose descriptor names none.
    pub namespace: Option<String>,
    /// Type tag overrides, consulted before the default registry.
    pub type_overrides: Option<TypeOverrides>,
}

impl MapperContext {
    /// Create a context with no namespace and no overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set the type overrides.
    pub fn with_type_overrides(mut self, overrides: TypeOverrides) -> Self {
        self.type_overrides = Some(overrides);
        self
    }
}

/// Build a table definition from a descriptor.
///
/// Columns keep field order. The primary key may only name declared fields.
#[instrument(skip_all, fields(table = %descriptor.name))]
pub fn decode_table(descriptor: &TableDescriptor, ctx: &MapperContext) -> Result<TableDef> {
    descriptor.validate()?;

    let registry = TypeRegistry::global();
    let overrides = ctx.type_overrides.as_ref();

    let mut table = TableDef::new(&descriptor.name);
    table.schema = descriptor.schema.clone().or_else(|| ctx.namespace.clone());

    for field in &descriptor.fields {
        table.append_column(decode_field(field, registry, overrides)?)?;
    }

    if let Some(columns) = &descriptor.primary_key {
        table.append_constraint(PrimaryKeyConstraint::new(columns.iter().cloned()))?;
    }

    debug!(
        schema = table.schema.as_deref().unwrap_or(""),
        columns = table.columns().len(),
        "decoded table"
    );
    Ok(table)
}

/// Build a descriptor from a table definition.
///
/// Check-derived constraints do not survive; [`lossy_conversions`] lists them.
#[instrument(skip_all, fields(table = %table.name))]
pub fn encode_table(table: &TableDef, ctx: &MapperContext) -> Result<TableDescriptor> {
    let registry = TypeRegistry::global();
    let overrides = ctx.type_overrides.as_ref();

    let mut descriptor = TableDescriptor::new(&table.name);
    descriptor.schema = table.schema.clone();
    descriptor.fields = table
        .columns()
        .iter()
        .map(|column| encode_field(column, registry, overrides))
        .collect::<Result<_>>()?;
    descriptor.primary_key = table
        .primary_key()
        .filter(|pk| !pk.is_empty())
        .map(|pk| pk.columns.clone());

    debug!(fields = descriptor.fields.len(), "encoded table");
    Ok(descriptor)
}

/// Check expressions a dump of `table` would drop.
pub fn lossy_conversions(table: &TableDef) -> Vec<LossyConversion> {
    table
        .columns()
        .iter()
        .flat_map(|column| lossy_checks(&column.name, &column.checks))
        .collect()
}
