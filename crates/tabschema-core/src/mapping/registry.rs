//! Type registry - type tags to relational column types.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::error::{Error, Result};
use crate::relational::RelationalType;

/// Built-in tag mapping. The first tag listed for a type is the one dumps emit.
const DEFAULT_MAPPING: [(&str, RelationalType); 17] = [
    ("int", RelationalType::Integer),
    ("integer", RelationalType::Integer),
    ("bigint", RelationalType::BigInteger),
    ("smallint", RelationalType::SmallInteger),
    ("str", RelationalType::String { length: None }),
    ("string", RelationalType::String { length: None }),
    ("text", RelationalType::Text),
    ("float", RelationalType::Float),
    ("number", RelationalType::Float),
    ("decimal", RelationalType::Numeric),
    ("bool", RelationalType::Boolean),
    ("boolean", RelationalType::Boolean),
    ("date", RelationalType::Date),
    ("datetime", RelationalType::DateTime),
    ("time", RelationalType::Time),
    ("binary", RelationalType::LargeBinary),
    ("json", RelationalType::Json),
];

static DEFAULT_REGISTRY: OnceLock<TypeRegistry> = OnceLock::new();

/// Per-call tag mapping that takes precedence over the registry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeOverrides(BTreeMap<String, RelationalType>);

impl TypeOverrides {
    /// Create an empty override set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a tag, builder style.
    pub fn with(mut self, tag: impl Into<String>, column_type: RelationalType) -> Self {
        self.insert(tag, column_type);
        self
    }

    /// Map a tag.
    pub fn insert(&mut self, tag: impl Into<String>, column_type: RelationalType) {
        self.0.insert(tag.into(), column_type);
    }

    /// Get the type a tag is overridden to.
    pub fn get(&self, tag: &str) -> Option<&RelationalType> {
        self.0.get(tag)
    }

    /// Check if a tag is overridden.
    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains_key(tag)
    }

    /// Check if no tags are overridden.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate entries in tag order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RelationalType)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Parse a `TAG=TYPE` entry, e.g. `str=VARCHAR(255)`.
    pub fn parse_entry(entry: &str) -> Result<(String, RelationalType)> {
        let (tag, column_type) = entry
            .split_once('=')
            .ok_or_else(|| Error::Validation(format!("expected TAG=TYPE, got \"{}\"", entry)))?;
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(Error::Validation(format!("empty type tag in \"{}\"", entry)));
        }
        Ok((tag.to_string(), column_type.parse()?))
    }
}

impl FromIterator<(String, RelationalType)> for TypeOverrides {
    fn from_iter<I: IntoIterator<Item = (String, RelationalType)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Mapping from type tags to relational column types.
///
/// The process-wide default registry is built once and never mutated;
/// callers customise resolution per call through [`TypeOverrides`].
#[derive(Debug, Clone, PartialEq)]
pub struct TypeRegistry {
    entries: Vec<(String, RelationalType)>,
}

impl TypeRegistry {
    /// Build a registry from `(tag, type)` entries. Earlier tags win on reverse lookup.
    pub fn new(entries: impl IntoIterator<Item = (String, RelationalType)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// The shared default registry.
    pub fn global() -> &'static TypeRegistry {
        DEFAULT_REGISTRY.get_or_init(TypeRegistry::default)
    }

    /// Resolve a tag, consulting `overrides` before the registry.
    pub fn resolve(&self, tag: &str, overrides: Option<&TypeOverrides>) -> Result<RelationalType> {
        if let Some(column_type) = overrides.and_then(|o| o.get(tag)) {
            return Ok(column_type.clone());
        }
        self.entries
            .iter()
            .find(|(t, _)| t == tag)
            .map(|(_, column_type)| column_type.clone())
            .ok_or_else(|| Error::UnknownType(tag.to_string()))
    }

    /// Find the tag to dump a column type as.
    ///
    /// Exact matches are preferred over matches of the same kind (a
    /// `VARCHAR(30)` column dumps as the tag for `VARCHAR`). Registry tags
    /// shadowed by `overrides` are skipped so the emitted tag resolves back to
    /// the same type under the same overrides.
    pub fn tag_for(
        &self,
        column_type: &RelationalType,
        overrides: Option<&TypeOverrides>,
    ) -> Result<String> {
        let candidates = || {
            let overridden = overrides.into_iter().flat_map(|o| o.iter());
            let defaults = self
                .entries
                .iter()
                .filter(move |(tag, _)| !overrides.map(|o| o.contains(tag)).unwrap_or(false))
                .map(|(tag, t)| (tag.as_str(), t));
            overridden.chain(defaults)
        };

        candidates()
            .find(|(_, t)| *t == column_type)
            .or_else(|| candidates().find(|(_, t)| t.same_kind(column_type)))
            .map(|(tag, _)| tag.to_string())
            .ok_or_else(|| Error::UnmappedType(column_type.to_string()))
    }

    /// Check if a tag is registered.
    pub fn contains_tag(&self, tag: &str) -> bool {
        self.entries.iter().any(|(t, _)| t == tag)
    }

    /// All registered tags, in registration order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(t, _)| t.as_str())
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new(
            DEFAULT_MAPPING
                .iter()
                .map(|(tag, column_type)| (tag.to_string(), column_type.clone())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_resolution() {
        let registry = TypeRegistry::global();

        assert_eq!(registry.resolve("int", None).unwrap(), RelationalType::Integer);
        assert_eq!(registry.resolve("str", None).unwrap(), RelationalType::string());
        assert_eq!(registry.resolve("number", None).unwrap(), RelationalType::Float);
        assert_eq!(registry.resolve("date", None).unwrap(), RelationalType::Date);
    }

    #[test]
    fn test_unknown_tag() {
        let err = TypeRegistry::global().resolve("uuid", None).unwrap_err();
        assert!(matches!(err, Error::UnknownType(ref tag) if tag == "uuid"));
    }

    #[test]
    fn test_overrides_take_precedence_without_mutating_default() {
        let overrides = TypeOverrides::new()
            .with("str", RelationalType::varchar(64))
            .with("uuid", RelationalType::varchar(36));
        let registry = TypeRegistry::global();

        assert_eq!(
            registry.resolve("str", Some(&overrides)).unwrap(),
            RelationalType::varchar(64)
        );
        assert_eq!(
            registry.resolve("uuid", Some(&overrides)).unwrap(),
            RelationalType::varchar(36)
        );
        assert_eq!(
            registry.resolve("int", Some(&overrides)).unwrap(),
            RelationalType::Integer
        );

        // a later call without overrides still sees the defaults
        assert_eq!(registry.resolve("str", None).unwrap(), RelationalType::string());
        assert!(registry.resolve("uuid", None).is_err());
    }

    #[test]
    fn test_reverse_lookup_prefers_canonical_tag() {
        let registry = TypeRegistry::global();

        assert_eq!(registry.tag_for(&RelationalType::Integer, None).unwrap(), "int");
        assert_eq!(registry.tag_for(&RelationalType::string(), None).unwrap(), "str");
        assert_eq!(registry.tag_for(&RelationalType::varchar(30), None).unwrap(), "str");
        assert_eq!(registry.tag_for(&RelationalType::Boolean, None).unwrap(), "bool");
    }

    #[test]
    fn test_reverse_lookup_with_overrides() {
        let overrides = TypeOverrides::new().with("str", RelationalType::Text);
        let registry = TypeRegistry::global();

        assert_eq!(registry.tag_for(&RelationalType::Text, Some(&overrides)).unwrap(), "str");
        // "str" is shadowed, so plain strings fall back to the alias
        assert_eq!(
            registry.tag_for(&RelationalType::string(), Some(&overrides)).unwrap(),
            "string"
        );
    }

    #[test]
    fn test_unmapped_type() {
        let registry = TypeRegistry::new([("int".to_string(), RelationalType::Integer)]);
        let err = registry.tag_for(&RelationalType::Json, None).unwrap_err();
        assert!(matches!(err, Error::UnmappedType(_)));
    }

    #[test]
    fn test_parse_entry() {
        let (tag, column_type) = TypeOverrides::parse_entry("str=VARCHAR(255)").unwrap();
        assert_eq!(tag, "str");
        assert_eq!(column_type, RelationalType::varchar(255));

        assert!(TypeOverrides::parse_entry("str").is_err());
        assert!(TypeOverrides::parse_entry("=TEXT").is_err());
        assert!(TypeOverrides::parse_entry("str=POINT").is_err());
    }

    #[test]
    fn test_concurrent_reads_of_default_registry() {
        let overrides = TypeOverrides::new().with("str", RelationalType::varchar(8));

        std::thread::scope(|scope| {
            let readers: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(|| {
                        for _ in 0..100 {
                            let registry = TypeRegistry::global();
                            assert_eq!(registry.resolve("str", None).unwrap(), RelationalType::string());
                            assert_eq!(registry.tag_for(&RelationalType::Integer, None).unwrap(), "int");
                        }
                    })
                })
                .collect();

            let overriding = scope.spawn(|| {
                for _ in 0..100 {
                    let column_type = TypeRegistry::global()
                        .resolve("str", Some(&overrides))
                        .unwrap();
                    assert_eq!(column_type, RelationalType::varchar(8));
                }
            });

            for handle in readers {
                handle.join().unwrap();
            }
            overriding.join().unwrap();
        });

        assert_eq!(
            TypeRegistry::global().resolve("str", None).unwrap(),
            RelationalType::string()
        );
    }
}
