//! Core error types.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Load, dump and catalog errors.
#[derive(Debug, Error)]
pub enum Error {
    /// A table or field name was empty.
    #[error("{0} name must not be empty")]
    EmptyName(&'static str),

    /// Malformed descriptor content.
    #[error("validation error: {0}")]
    Validation(String),

    /// Payload could not be decoded into a descriptor.
    #[error("invalid descriptor: {0}")]
    Json(#[from] serde_json::Error),

    /// Type tag not present in the overrides nor the default registry.
    #[error("unknown type \"{0}\"")]
    UnknownType(String),

    /// Relational type with no tag to dump it as.
    #[error("no type tag maps to relational type {0}")]
    UnmappedType(String),

    /// Constraint key that is not recognized at all.
    #[error("unknown constraint \"{0}\"")]
    UnknownConstraint(String),

    /// Constraint value of the wrong JSON type.
    #[error("constraint \"{constraint}\" expects {expected}")]
    InvalidConstraintValue {
        /// Constraint key.
        constraint: String,
        /// Description of the accepted value.
        expected: &'static str,
    },

    /// Recognized constraint that cannot be translated yet.
    #[error("constraint \"{0}\" is not supported yet")]
    UnsupportedConstraint(String),

    /// Primary key references a column the table does not have.
    #[error("table \"{table}\" has no column \"{column}\"")]
    MissingColumn {
        /// Table name.
        table: String,
        /// Referenced column name.
        column: String,
    },

    /// Column appended twice to the same table.
    #[error("table \"{table}\" already has a column \"{column}\"")]
    DuplicateColumn {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
    },

    /// Table already defined in the metadata container or catalog.
    #[error("table {0} already exists")]
    TableExists(String),

    /// Table not found in the catalog.
    #[error("table {0} not found")]
    TableNotFound(String),

    /// Storage layer error.
    #[error("storage error: {0}")]
    Storage(#[from] sled::Error),

    /// Stored table definition could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Coarse classification of an [`Error`], for hosts mapping failures to responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed or missing descriptor content.
    Validation,
    /// Use of a recognized but unimplemented feature.
    UnsupportedFeature,
    /// Dangling reference to an undeclared column.
    Reference,
    /// Failure raised by the relational layer or its storage.
    Engine,
}

impl Error {
    /// Classify this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::EmptyName(_)
            | Error::Validation(_)
            | Error::Json(_)
            | Error::UnknownType(_)
            | Error::UnmappedType(_)
            | Error::UnknownConstraint(_)
            | Error::InvalidConstraintValue { .. } => ErrorCategory::Validation,
            Error::UnsupportedConstraint(_) => ErrorCategory::UnsupportedFeature,
            Error::MissingColumn { .. } => ErrorCategory::Reference,
            Error::DuplicateColumn { .. }
            | Error::TableExists(_)
            | Error::TableNotFound(_)
            | Error::Storage(_)
            | Error::Serialization(_) => ErrorCategory::Engine,
        }
    }

    /// Check if this is a validation error.
    pub fn is_validation(&self) -> bool {
        self.category() == ErrorCategory::Validation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert!(Error::UnknownConstraint("foo".into()).is_validation());
        assert!(Error::UnknownType("uuid".into()).is_validation());
        assert_eq!(
            Error::UnsupportedConstraint("pattern".into()).category(),
            ErrorCategory::UnsupportedFeature
        );
        assert_eq!(
            Error::MissingColumn {
                table: "t".into(),
                column: "c".into()
            }
            .category(),
            ErrorCategory::Reference
        );
        assert_eq!(
            Error::TableExists("t".into()).category(),
            ErrorCategory::Engine
        );
    }

    #[test]
    fn test_messages() {
        let err = Error::MissingColumn {
            table: "posts".into(),
            column: "missing".into(),
        };
        assert_eq!(err.to_string(), "table \"posts\" has no column \"missing\"");
        assert_eq!(
            Error::UnsupportedConstraint("enum".into()).to_string(),
            "constraint \"enum\" is not supported yet"
        );
    }
}
