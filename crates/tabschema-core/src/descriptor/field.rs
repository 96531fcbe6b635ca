//! Field descriptors.

use super::constraints::ConstraintSet;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// JSON description of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDescriptor {
    /// Field (column) name.
    pub name: String,
    /// Type tag, resolved through the type registry.
    #[serde(rename = "type")]
    pub field_type: String,
    /// Maps to the column comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Human readable label. Not carried into the relational model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Format hint for the type. Not carried into the relational model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Column constraints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<ConstraintSet>,
}

impl FieldDescriptor {
    /// Create a field with no description or constraints.
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            description: None,
            title: None,
            format: None,
            constraints: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the constraints.
    pub fn with_constraints(mut self, constraints: ConstraintSet) -> Self {
        self.constraints = Some(constraints);
        self
    }

    /// Check required and non-empty properties.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::EmptyName("field"));
        }
        if self.field_type.is_empty() {
            return Err(Error::Validation(format!(
                "field \"{}\" has an empty type",
                self.name
            )));
        }
        for (key, value) in [
            ("description", &self.description),
            ("title", &self.title),
            ("format", &self.format),
        ] {
            if matches!(value, Some(v) if v.is_empty()) {
                return Err(Error::Validation(format!(
                    "field \"{}\" has an empty {}",
                    self.name, key
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_minimal_field() {
        let field: FieldDescriptor =
            serde_json::from_value(json!({"name": "content", "type": "str"})).unwrap();

        assert_eq!(field, FieldDescriptor::new("content", "str"));
        assert!(field.validate().is_ok());
    }

    #[test]
    fn test_missing_type_rejected() {
        let result = serde_json::from_value::<FieldDescriptor>(json!({"name": "content"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_property_rejected() {
        let result = serde_json::from_value::<FieldDescriptor>(
            json!({"name": "content", "type": "str", "nullable": true}),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_empty_values() {
        assert!(matches!(
            FieldDescriptor::new("", "str").validate(),
            Err(Error::EmptyName("field"))
        ));
        assert!(FieldDescriptor::new("a", "").validate().is_err());
        assert!(FieldDescriptor::new("a", "str")
            .with_description("")
            .validate()
            .is_err());
    }

    #[test]
    fn test_absent_options_not_serialized() {
        let value = serde_json::to_value(FieldDescriptor::new("content", "str")).unwrap();
        assert_eq!(value, json!({"name": "content", "type": "str"}));
    }
}
