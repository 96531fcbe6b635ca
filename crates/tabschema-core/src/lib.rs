//! Tabschema Core - JSON table descriptors to relational table definitions.
//!
//! This crate converts between a JSON table-definition format (modeled on the
//! Table Schema specification) and an in-memory relational schema, in both
//! directions. Loading builds a [`TableDef`] from a [`TableDescriptor`];
//! dumping reads a [`TableDef`] back into a [`TableDescriptor`].

pub mod catalog;
pub mod ddl;
pub mod descriptor;
pub mod error;
pub mod mapping;
pub mod relational;
pub mod schema;

pub use catalog::Catalog;
pub use descriptor::{ConstraintSet, FieldDescriptor, TableDescriptor};
pub use error::{Error, ErrorCategory, Result};
pub use mapping::{
    ColumnAttrs, LossyConversion, MapperContext, TypeOverrides, TypeRegistry,
};
pub use relational::{
    CheckExpr, ColumnDef, MetaData, PrimaryKeyConstraint, RelationalType, TableDef, TableKey,
};
pub use schema::TableSchema;
