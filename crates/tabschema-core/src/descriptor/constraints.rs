//! Field constraint sets.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// `required` constraint key.
pub const REQUIRED: &str = "required";
/// `unique` constraint key.
pub const UNIQUE: &str = "unique";
/// `minLength` constraint key.
pub const MIN_LENGTH: &str = "minLength";
/// `maxLength` constraint key.
pub const MAX_LENGTH: &str = "maxLength";
/// `minimum` constraint key.
pub const MINIMUM: &str = "minimum";
/// `maximum` constraint key.
pub const MAXIMUM: &str = "maximum";
/// `pattern` constraint key, reserved.
pub const PATTERN: &str = "pattern";
/// `enum` constraint key, reserved.
pub const ENUM: &str = "enum";

/// Every key a constraint set may carry.
pub const KNOWN_KEYS: [&str; 8] = [
    REQUIRED, UNIQUE, MIN_LENGTH, MAX_LENGTH, MINIMUM, MAXIMUM, PATTERN, ENUM,
];

/// The `constraints` object of a field descriptor.
///
/// Kept as the raw JSON mapping so that unknown or unsupported keys survive
/// decoding and are reported by the constraint translator rather than by serde.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConstraintSet(Map<String, Value>);

impl ConstraintSet {
    /// Create an empty constraint set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an arbitrary key.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Set `required`.
    pub fn required(self, required: bool) -> Self {
        self.with(REQUIRED, required)
    }

    /// Set `unique`.
    pub fn unique(self, unique: bool) -> Self {
        self.with(UNIQUE, unique)
    }

    /// Set `minLength`.
    pub fn min_length(self, value: i64) -> Self {
        self.with(MIN_LENGTH, value)
    }

    /// Set `maxLength`.
    pub fn max_length(self, value: i64) -> Self {
        self.with(MAX_LENGTH, value)
    }

    /// Set `minimum`.
    pub fn minimum(self, value: impl Into<Number>) -> Self {
        self.with(MINIMUM, Value::Number(value.into()))
    }

    /// Set `maximum`.
    pub fn maximum(self, value: impl Into<Number>) -> Self {
        self.with(MAXIMUM, Value::Number(value.into()))
    }

    /// Get the raw value of a key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Check if a key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// All keys present.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of keys present.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if no keys are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keys that are not part of [`KNOWN_KEYS`].
    pub fn unknown_keys(&self) -> impl Iterator<Item = &str> {
        self.keys().filter(|k| !KNOWN_KEYS.contains(k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_produces_wire_keys() {
        let constraints = ConstraintSet::new()
            .required(true)
            .min_length(1)
            .maximum(100i64);

        assert_eq!(
            serde_json::to_value(&constraints).unwrap(),
            json!({"required": true, "minLength": 1, "maximum": 100})
        );
    }

    #[test]
    fn test_unknown_keys_survive_decoding() {
        let constraints: ConstraintSet =
            serde_json::from_value(json!({"required": true, "foo": 1})).unwrap();

        assert_eq!(constraints.len(), 2);
        assert_eq!(constraints.unknown_keys().collect::<Vec<_>>(), vec!["foo"]);
    }
}
