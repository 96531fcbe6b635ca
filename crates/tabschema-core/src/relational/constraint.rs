//! Column check expressions and table constraints.

use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;

/// A boolean check expression attached to a single column.
///
/// Expressions generated from field constraints keep their structure; checks
/// that come from elsewhere are carried as opaque SQL text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CheckExpr {
    /// `LENGTH(column) >= value`.
    MinLength {
        /// Constrained column.
        column: String,
        /// Lower length bound.
        value: i64,
    },
    /// `LENGTH(column) <= value`.
    MaxLength {
        /// Constrained column.
        column: String,
        /// Upper length bound.
        value: i64,
    },
    /// `column >= value`.
    Minimum {
        /// Constrained column.
        column: String,
        /// Lower bound.
        value: Number,
    },
    /// `column <= value`.
    Maximum {
        /// Constrained column.
        column: String,
        /// Upper bound.
        value: Number,
    },
    /// Opaque SQL boolean expression.
    Raw(String),
}

impl CheckExpr {
    /// Create an opaque check expression.
    pub fn raw(sql: impl Into<String>) -> Self {
        CheckExpr::Raw(sql.into())
    }

    /// Get the column this expression constrains, if known.
    pub fn column(&self) -> Option<&str> {
        match self {
            CheckExpr::MinLength { column, .. }
            | CheckExpr::MaxLength { column, .. }
            | CheckExpr::Minimum { column, .. }
            | CheckExpr::Maximum { column, .. } => Some(column),
            CheckExpr::Raw(_) => None,
        }
    }

    /// Render the expression as SQL.
    pub fn to_sql(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CheckExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckExpr::MinLength { column, value } => {
                write!(f, "LENGTH({}) >= {}", quoted(column), value)
            }
            CheckExpr::MaxLength { column, value } => {
                write!(f, "LENGTH({}) <= {}", quoted(column), value)
            }
            CheckExpr::Minimum { column, value } => write!(f, "{} >= {}", quoted(column), value),
            CheckExpr::Maximum { column, value } => write!(f, "{} <= {}", quoted(column), value),
            CheckExpr::Raw(sql) => f.write_str(sql),
        }
    }
}

fn quoted(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

/// Primary key constraint naming columns in key order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PrimaryKeyConstraint {
    /// Key columns, in order.
    pub columns: Vec<String>,
}

impl PrimaryKeyConstraint {
    /// Create a primary key over the given columns.
    pub fn new(columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if a column is part of the key.
    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Check if the key names no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
