//! Column definitions for tables.

use super::constraint::CheckExpr;
use super::types::RelationalType;
use serde::{Deserialize, Serialize};

/// A column definition within a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Column name.
    pub name: String,
    /// Column data type.
    pub column_type: RelationalType,
    /// Whether the column accepts NULL.
    pub nullable: bool,
    /// Whether values must be unique across rows.
    pub unique: bool,
    /// Free-form column comment.
    pub comment: Option<String>,
    /// Check expressions, in declaration order.
    pub checks: Vec<CheckExpr>,
}

impl ColumnDef {
    /// Create a new nullable, non-unique column.
    pub fn new(name: impl Into<String>, column_type: RelationalType) -> Self {
        Self {
            name: name.into(),
            column_type,
            nullable: true,
            unique: false,
            comment: None,
            checks: Vec::new(),
        }
    }

    /// Set nullability.
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Mark as NOT NULL.
    pub fn not_null(self) -> Self {
        self.nullable(false)
    }

    /// Set uniqueness.
    pub fn unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    /// Set the comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Append a check expression.
    pub fn with_check(mut self, check: CheckExpr) -> Self {
        self.checks.push(check);
        self
    }

    /// Check if the column has any check expressions.
    pub fn has_checks(&self) -> bool {
        !self.checks.is_empty()
    }
}
