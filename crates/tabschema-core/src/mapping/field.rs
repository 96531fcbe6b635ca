//! Field mapping - one field descriptor to one column, and back.

use tracing::{debug, warn};

use super::constraint::{self, lossy_checks};
use super::registry::{TypeOverrides, TypeRegistry};
use crate::descriptor::FieldDescriptor;
use crate::error::Result;
use crate::relational::ColumnDef;

/// Build a column from a field descriptor.
pub fn decode_field(
    descriptor: &FieldDescriptor,
    registry: &TypeRegistry,
    overrides: Option<&TypeOverrides>,
) -> Result<ColumnDef> {
    descriptor.validate()?;

    let column_type = registry.resolve(&descriptor.field_type, overrides)?;
    let mut column = ColumnDef::new(&descriptor.name, column_type);

    if let Some(constraints) = &descriptor.constraints {
        let attrs = constraint::encode(constraints, &descriptor.name)?;
        column.nullable = attrs.nullable;
        column.unique = attrs.unique;
        column.checks = attrs.checks;
    }

    column.comment = descriptor.description.clone();

    debug!(
        column = %column.name,
        column_type = %column.column_type,
        nullable = column.nullable,
        unique = column.unique,
        checks = column.checks.len(),
        "decoded field"
    );
    Ok(column)
}

/// Build a field descriptor from a column.
///
/// Check expressions are not carried over; each one dropped is logged.
pub fn encode_field(
    column: &ColumnDef,
    registry: &TypeRegistry,
    overrides: Option<&TypeOverrides>,
) -> Result<FieldDescriptor> {
    let field_type = registry.tag_for(&column.column_type, overrides)?;
    let constraints = constraint::decode(column.nullable, column.unique, &column.checks);

    for lossy in lossy_checks(&column.name, &column.checks) {
        warn!(column = %lossy.column, check = %lossy.check, "dropping check expression");
    }

    let mut field = FieldDescriptor::new(&column.name, field_type);
    field.description = column.comment.clone();
    if !constraints.is_empty() {
        field.constraints = Some(constraints);
    }

    debug!(field = %field.name, field_type = %field.field_type, "encoded column");
    Ok(field)
}
