//! Relational schema model.
//!
//! The abstract table/column/constraint representation that loading builds and
//! dumping reads. It stands in for the relational engine's own schema objects.

mod column;
mod constraint;
mod metadata;
mod table;
mod types;

pub use column::ColumnDef;
pub use constraint::{CheckExpr, PrimaryKeyConstraint};
pub use metadata::MetaData;
pub use table::{TableDef, TableKey};
pub use types::RelationalType;
