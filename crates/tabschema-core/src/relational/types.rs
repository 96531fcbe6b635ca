//! Relational column types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Column types understood by the relational layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationalType {
    /// 32-bit signed integer.
    Integer,
    /// 64-bit signed integer.
    BigInteger,
    /// 16-bit signed integer.
    SmallInteger,
    /// Variable-length string, optionally bounded.
    String {
        /// Maximum length, if any.
        length: Option<u32>,
    },
    /// Unbounded text.
    Text,
    /// Floating point.
    Float,
    /// Fixed-precision decimal.
    Numeric,
    /// Boolean value.
    Boolean,
    /// Calendar date.
    Date,
    /// Date and time of day.
    DateTime,
    /// Time of day.
    Time,
    /// Binary data.
    LargeBinary,
    /// JSON document.
    Json,
}

impl RelationalType {
    /// Unbounded string type.
    pub fn string() -> Self {
        RelationalType::String { length: None }
    }

    /// String type bounded to `length` characters.
    pub fn varchar(length: u32) -> Self {
        RelationalType::String {
            length: Some(length),
        }
    }

    /// Check if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            RelationalType::Integer
                | RelationalType::BigInteger
                | RelationalType::SmallInteger
                | RelationalType::Float
                | RelationalType::Numeric
        )
    }

    /// Check if this type is a string-like type.
    pub fn is_string_like(&self) -> bool {
        matches!(self, RelationalType::String { .. } | RelationalType::Text)
    }

    /// Check if two types are the same kind, ignoring parameters such as length.
    pub fn same_kind(&self, other: &RelationalType) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl fmt::Display for RelationalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationalType::Integer => write!(f, "INTEGER"),
            RelationalType::BigInteger => write!(f, "BIGINT"),
            RelationalType::SmallInteger => write!(f, "SMALLINT"),
            RelationalType::String { length: None } => write!(f, "VARCHAR"),
            RelationalType::String { length: Some(n) } => write!(f, "VARCHAR({})", n),
            RelationalType::Text => write!(f, "TEXT"),
            RelationalType::Float => write!(f, "FLOAT"),
            RelationalType::Numeric => write!(f, "NUMERIC"),
            RelationalType::Boolean => write!(f, "BOOLEAN"),
            RelationalType::Date => write!(f, "DATE"),
            RelationalType::DateTime => write!(f, "DATETIME"),
            RelationalType::Time => write!(f, "TIME"),
            RelationalType::LargeBinary => write!(f, "BLOB"),
            RelationalType::Json => write!(f, "JSON"),
        }
    }
}

impl FromStr for RelationalType {
    type Err = Error;

    /// Parse a DDL type name such as `INTEGER` or `VARCHAR(30)`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();

        if let Some(rest) = upper.strip_prefix("VARCHAR") {
            let rest = rest.trim();
            if rest.is_empty() {
                return Ok(RelationalType::string());
            }
            let length = rest
                .strip_prefix('(')
                .and_then(|r| r.strip_suffix(')'))
                .and_then(|n| n.trim().parse::<u32>().ok())
                .ok_or_else(|| Error::Validation(format!("invalid string type \"{}\"", s)))?;
            return Ok(RelationalType::varchar(length));
        }

        match upper.as_str() {
            "INTEGER" | "INT" => Ok(RelationalType::Integer),
            "BIGINT" => Ok(RelationalType::BigInteger),
            "SMALLINT" => Ok(RelationalType::SmallInteger),
            "STRING" => Ok(RelationalType::string()),
            "TEXT" => Ok(RelationalType::Text),
            "FLOAT" | "REAL" | "DOUBLE" => Ok(RelationalType::Float),
            "NUMERIC" | "DECIMAL" => Ok(RelationalType::Numeric),
            "BOOLEAN" | "BOOL" => Ok(RelationalType::Boolean),
            "DATE" => Ok(RelationalType::Date),
            "DATETIME" | "TIMESTAMP" => Ok(RelationalType::DateTime),
            "TIME" => Ok(RelationalType::Time),
            "BLOB" | "BINARY" => Ok(RelationalType::LargeBinary),
            "JSON" => Ok(RelationalType::Json),
            _ => Err(Error::Validation(format!("unknown relational type \"{}\"", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_checks() {
        assert!(RelationalType::Integer.is_numeric());
        assert!(RelationalType::Float.is_numeric());
        assert!(!RelationalType::string().is_numeric());
        assert!(RelationalType::varchar(30).is_string_like());
        assert!(RelationalType::Text.is_string_like());
        assert!(!RelationalType::Boolean.is_string_like());
    }

    #[test]
    fn test_same_kind_ignores_length() {
        assert!(RelationalType::varchar(30).same_kind(&RelationalType::string()));
        assert!(!RelationalType::Text.same_kind(&RelationalType::string()));
    }

    #[test]
    fn test_display_and_parse() {
        assert_eq!(RelationalType::string().to_string(), "VARCHAR");
        assert_eq!(RelationalType::varchar(30).to_string(), "VARCHAR(30)");
        assert_eq!("varchar(30)".parse::<RelationalType>().unwrap(), RelationalType::varchar(30));
        assert_eq!("Integer".parse::<RelationalType>().unwrap(), RelationalType::Integer);
        assert_eq!("timestamp".parse::<RelationalType>().unwrap(), RelationalType::DateTime);
        assert!("VARCHAR(x)".parse::<RelationalType>().is_err());
        assert!("GEOMETRY".parse::<RelationalType>().is_err());
    }
}
