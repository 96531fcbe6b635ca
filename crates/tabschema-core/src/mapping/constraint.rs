//! Constraint translation between field constraint sets and column attributes.
//!
//! Forward: `required`/`unique` become column flags, bound constraints become
//! check expressions. Reverse: flags become `required`/`unique` again, while
//! check expressions are dropped.

use serde_json::Value;
use std::fmt;

use crate::descriptor::constraints::{
    ConstraintSet, ENUM, MAXIMUM, MAX_LENGTH, MINIMUM, MIN_LENGTH, PATTERN, REQUIRED, UNIQUE,
};
use crate::error::{Error, Result};
use crate::relational::CheckExpr;

/// Column attributes derived from a constraint set.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnAttrs {
    /// Whether the column accepts NULL.
    pub nullable: bool,
    /// Whether values must be unique.
    pub unique: bool,
    /// Generated check expressions, in handler order.
    pub checks: Vec<CheckExpr>,
}

impl Default for ColumnAttrs {
    fn default() -> Self {
        Self {
            nullable: true,
            unique: false,
            checks: Vec::new(),
        }
    }
}

type CheckHandler = fn(column: &str, key: &str, value: &Value) -> Result<CheckExpr>;

/// Check-generating constraints, evaluated in this order.
const CHECK_HANDLERS: [(&str, CheckHandler); 6] = [
    (MIN_LENGTH, min_length),
    (MAX_LENGTH, max_length),
    (MINIMUM, minimum),
    (MAXIMUM, maximum),
    (PATTERN, unsupported),
    (ENUM, unsupported),
];

fn min_length(column: &str, key: &str, value: &Value) -> Result<CheckExpr> {
    Ok(CheckExpr::MinLength {
        column: column.to_string(),
        value: integer(key, value)?,
    })
}

fn max_length(column: &str, key: &str, value: &Value) -> Result<CheckExpr> {
    Ok(CheckExpr::MaxLength {
        column: column.to_string(),
        value: integer(key, value)?,
    })
}

fn minimum(column: &str, key: &str, value: &Value) -> Result<CheckExpr> {
    Ok(CheckExpr::Minimum {
        column: column.to_string(),
        value: number(key, value)?,
    })
}

fn maximum(column: &str, key: &str, value: &Value) -> Result<CheckExpr> {
    Ok(CheckExpr::Maximum {
        column: column.to_string(),
        value: number(key, value)?,
    })
}

fn unsupported(_column: &str, key: &str, _value: &Value) -> Result<CheckExpr> {
    Err(Error::UnsupportedConstraint(key.to_string()))
}

fn integer(key: &str, value: &Value) -> Result<i64> {
    value.as_i64().ok_or_else(|| Error::InvalidConstraintValue {
        constraint: key.to_string(),
        expected: "an integer",
    })
}

fn number(key: &str, value: &Value) -> Result<serde_json::Number> {
    match value {
        Value::Number(n) => Ok(n.clone()),
        _ => Err(Error::InvalidConstraintValue {
            constraint: key.to_string(),
            expected: "a number",
        }),
    }
}

fn flag(constraints: &ConstraintSet, key: &str) -> Result<bool> {
    match constraints.get(key) {
        None => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(Error::InvalidConstraintValue {
            constraint: key.to_string(),
            expected: "a boolean",
        }),
    }
}

/// Translate a field's constraints into column attributes.
///
/// Fails on the first unsupported (`pattern`, `enum`) or unrecognized key;
/// no partial attributes are returned.
pub fn encode(constraints: &ConstraintSet, field_name: &str) -> Result<ColumnAttrs> {
    let mut attrs = ColumnAttrs {
        nullable: !flag(constraints, REQUIRED)?,
        unique: flag(constraints, UNIQUE)?,
        checks: Vec::new(),
    };

    for (key, handler) in CHECK_HANDLERS {
        if let Some(value) = constraints.get(key) {
            attrs.checks.push(handler(field_name, key, value)?);
        }
    }

    if let Some(key) = constraints.unknown_keys().next() {
        return Err(Error::UnknownConstraint(key.to_string()));
    }

    Ok(attrs)
}

/// Reconstruct a constraint set from column attributes.
///
/// `required` and `unique` are emitted only when true. Check expressions are
/// not decoded; see [`lossy_checks`] for what gets dropped.
pub fn decode(nullable: bool, unique: bool, _checks: &[CheckExpr]) -> ConstraintSet {
    let mut constraints = ConstraintSet::new();
    if !nullable {
        constraints = constraints.required(true);
    }
    if unique {
        constraints = constraints.unique(true);
    }
    constraints
}

/// A check expression that a dump cannot represent.
#[derive(Debug, Clone, PartialEq)]
pub struct LossyConversion {
    /// Column the check is attached to.
    pub column: String,
    /// The dropped check.
    pub check: CheckExpr,
}

impl fmt::Display for LossyConversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "check ({}) on column \"{}\" is not representable and was dropped",
            self.check, self.column
        )
    }
}

/// The check expressions [`decode`] drops for a column.
pub fn lossy_checks(column: &str, checks: &[CheckExpr]) -> Vec<LossyConversion> {
    checks
        .iter()
        .map(|check| LossyConversion {
            column: column.to_string(),
            check: check.clone(),
        })
        .collect()
}
