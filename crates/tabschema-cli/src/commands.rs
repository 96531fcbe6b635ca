//! Subcommand handlers.

use std::path::Path;

use tabschema_core::mapping::lossy_conversions;
use tabschema_core::{Catalog, Error, TableDef, TableKey, TableSchema, TypeRegistry};
use tracing::{info, warn};

use crate::error::CliError;
use crate::formatter::Formatter;

fn read_descriptor(schema: &TableSchema, file: &Path) -> Result<TableDef, CliError> {
    let json = std::fs::read_to_string(file).map_err(|source| CliError::Read {
        path: file.to_path_buf(),
        source,
    })?;
    Ok(schema.load_str(&json)?)
}

/// Decode a descriptor file and format the resulting table.
pub fn load(
    schema: &TableSchema,
    file: &Path,
    formatter: &dyn Formatter,
) -> Result<String, CliError> {
    let table = read_descriptor(schema, file)?;
    Ok(formatter.format_table(&table))
}

/// Decode a descriptor file and store the table unless it already exists.
pub fn create(
    schema: &TableSchema,
    catalog: &Catalog,
    file: &Path,
    formatter: &dyn Formatter,
) -> Result<String, CliError> {
    let table = read_descriptor(schema, file)?;

    if catalog.has_table(&table.name, table.schema.as_deref())? {
        return Err(Error::TableExists(table.qualified_name()).into());
    }
    catalog.create_table(&table)?;

    info!(table = %table.qualified_name(), "created");
    Ok(formatter.format_table(&table))
}

/// Dump a stored table back to its JSON descriptor.
pub fn show(
    schema: &TableSchema,
    catalog: &Catalog,
    name: &str,
    namespace: Option<&str>,
) -> Result<String, CliError> {
    let table = catalog
        .get_table(name, namespace)?
        .ok_or_else(|| Error::TableNotFound(TableKey::new(namespace, name).to_string()))?;

    for lossy in lossy_conversions(&table) {
        warn!("{}", lossy);
    }
    Ok(schema.dump_string(&table)?)
}

/// List stored tables.
pub fn list(catalog: &Catalog, formatter: &dyn Formatter) -> Result<String, CliError> {
    let names: Vec<String> = catalog
        .list_tables()?
        .iter()
        .map(ToString::to_string)
        .collect();
    Ok(formatter.format_list(&names))
}

/// Remove a stored table.
pub fn drop(catalog: &Catalog, name: &str, namespace: Option<&str>) -> Result<String, CliError> {
    let table = catalog.drop_table(name, namespace)?;
    Ok(format!("dropped {}", table.qualified_name()))
}

/// List the type tags available to this schema, with overrides applied.
pub fn tags(schema: &TableSchema, formatter: &dyn Formatter) -> Result<String, CliError> {
    let registry = TypeRegistry::global();
    let overrides = schema.context().type_overrides.as_ref();

    let mut entries = Vec::new();
    for tag in registry.tags() {
        entries.push((tag.to_string(), registry.resolve(tag, overrides)?));
    }
    // tags introduced by overrides alone
    for (tag, column_type) in overrides.into_iter().flat_map(|o| o.iter()) {
        if !registry.contains_tag(tag) {
            entries.push((tag.to_string(), column_type.clone()));
        }
    }
    Ok(formatter.format_tags(&entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::{DdlFormatter, JsonFormatter};
    use std::io::Write;
    use tabschema_core::{ErrorCategory, RelationalType, TypeOverrides};

    fn descriptor_file(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    fn temp_catalog() -> (Catalog, sled::Db) {
        let db = sled::Config::new().temporary(true).open().unwrap();
        (Catalog::open(&db).unwrap(), db)
    }

    const ARTICLES: &str = r#"{
        "name": "articles",
        "fields": [
            {"name": "id", "type": "int", "constraints": {"required": true}},
            {"name": "body", "type": "str", "constraints": {"minLength": 1}}
        ],
        "primaryKey": ["id"]
    }"#;

    #[test]
    fn test_load_prints_ddl() {
        let file = descriptor_file(ARTICLES);
        let output = load(&TableSchema::new(), file.path(), &DdlFormatter).unwrap();

        assert_eq!(
            output,
            "CREATE TABLE articles (id INTEGER NOT NULL, body VARCHAR CHECK (LENGTH(\"body\") >= 1), PRIMARY KEY (id));"
        );
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let err = load(&TableSchema::new(), Path::new("/nonexistent/t.json"), &DdlFormatter)
            .unwrap_err();

        assert!(matches!(err, CliError::Read { ref path, .. } if path == Path::new("/nonexistent/t.json")));
        assert!(err.to_string().starts_with("cannot read /nonexistent/t.json"));
    }

    #[test]
    fn test_load_invalid_descriptor_is_schema_error() {
        let file = descriptor_file(r#"{"name": "t", "fields": [{"name": "a", "type": "uuid"}]}"#);
        let err = load(&TableSchema::new(), file.path(), &DdlFormatter).unwrap_err();

        assert!(matches!(
            err,
            CliError::Schema(ref e) if e.category() == ErrorCategory::Validation
        ));
    }

    #[test]
    fn test_create_show_drop() {
        let (catalog, _db) = temp_catalog();
        let schema = TableSchema::new();
        let file = descriptor_file(ARTICLES);

        create(&schema, &catalog, file.path(), &JsonFormatter).unwrap();
        let err = create(&schema, &catalog, file.path(), &JsonFormatter).unwrap_err();
        assert!(matches!(err, CliError::Schema(Error::TableExists(_))));

        let shown: serde_json::Value =
            serde_json::from_str(&show(&schema, &catalog, "articles", None).unwrap()).unwrap();
        assert_eq!(shown["fields"][1], serde_json::json!({"name": "body", "type": "str"}));

        assert_eq!(list(&catalog, &DdlFormatter).unwrap(), "articles");
        assert_eq!(drop(&catalog, "articles", None).unwrap(), "dropped articles");
        assert!(matches!(
            show(&schema, &catalog, "articles", None).unwrap_err(),
            CliError::Schema(Error::TableNotFound(_))
        ));
    }

    #[test]
    fn test_show_distinguishes_namespace_from_dotted_name() {
        let (catalog, _db) = temp_catalog();
        let schema = TableSchema::new();
        let dotted = descriptor_file(r#"{"name": "a.b", "fields": [{"name": "x", "type": "int"}]}"#);
        let namespaced = descriptor_file(
            r#"{"name": "b", "schema": "a", "fields": [{"name": "y", "type": "text"}]}"#,
        );

        create(&schema, &catalog, dotted.path(), &DdlFormatter).unwrap();
        create(&schema, &catalog, namespaced.path(), &DdlFormatter).unwrap();

        let shown: serde_json::Value =
            serde_json::from_str(&show(&schema, &catalog, "b", Some("a")).unwrap()).unwrap();
        assert_eq!(shown["fields"][0]["name"], "y");
        let shown: serde_json::Value =
            serde_json::from_str(&show(&schema, &catalog, "a.b", None).unwrap()).unwrap();
        assert_eq!(shown["fields"][0]["name"], "x");
    }

    #[test]
    fn test_tags_apply_overrides() {
        let schema = TableSchema::new().with_type_overrides(
            TypeOverrides::new()
                .with("str", RelationalType::varchar(64))
                .with("uuid", RelationalType::varchar(36)),
        );
        let output = tags(&schema, &DdlFormatter).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "int=INTEGER");
        assert!(lines.contains(&"str=VARCHAR(64)"));
        assert!(lines.contains(&"string=VARCHAR"));
        assert_eq!(lines.last(), Some(&"uuid=VARCHAR(36)"));

        let output = tags(&TableSchema::new(), &DdlFormatter).unwrap();
        assert!(output.lines().any(|l| l == "str=VARCHAR"));
        assert!(!output.contains("uuid"));
    }
}
