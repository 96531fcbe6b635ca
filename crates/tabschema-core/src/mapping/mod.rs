//! Bidirectional mapping engine.
//!
//! - [`registry`]: type tags to relational types.
//! - [`constraint`]: constraint sets to column flags and check expressions.
//! - [`field`]: one field descriptor to one column.
//! - [`table`]: one table descriptor to one table definition.

pub mod constraint;
pub mod field;
pub mod registry;
pub mod table;

pub use constraint::{ColumnAttrs, LossyConversion};
pub use field::{decode_field, encode_field};
pub use registry::{TypeOverrides, TypeRegistry};
pub use table::{decode_table, encode_table, lossy_conversions, MapperContext};
