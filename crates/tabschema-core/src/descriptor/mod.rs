//! JSON table descriptors.
//!
//! Serde models of the wire payload: a table with its ordered fields, each
//! field with a type tag and an optional constraint set.

pub mod constraints;
mod field;
mod table;

pub use constraints::ConstraintSet;
pub use field::FieldDescriptor;
pub use table::TableDescriptor;
