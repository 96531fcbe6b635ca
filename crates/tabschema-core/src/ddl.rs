//! CREATE TABLE rendering for table definitions.
//!
//! Produces the DDL a generic SQL dialect would emit for a [`TableDef`]:
//! columns first, then the primary key, then one `UNIQUE` clause per unique
//! column.

use crate::relational::{ColumnDef, MetaData, TableDef};

/// Words that must be quoted when used as identifiers.
const RESERVED_WORDS: &[&str] = &[
    "all", "and", "any", "as", "asc", "between", "both", "by", "case", "cast", "check",
    "collate", "column", "constraint", "create", "cross", "current_date", "current_time",
    "current_timestamp", "default", "delete", "desc", "distinct", "drop", "else", "end",
    "except", "exists", "false", "for", "foreign", "from", "full", "group", "having", "in",
    "index", "inner", "insert", "intersect", "into", "is", "join", "key", "leading", "left",
    "like", "limit", "natural", "not", "null", "offset", "on", "or", "order", "outer",
    "primary", "references", "right", "select", "set", "some", "table", "then", "to",
    "trailing", "true", "union", "unique", "update", "user", "using", "values", "when",
    "where", "with",
];

/// Quote an identifier if it is reserved or not a plain lowercase name.
pub fn quote_identifier(identifier: &str) -> String {
    let mut chars = identifier.chars();
    let plain = matches!(chars.next(), Some(c) if c.is_ascii_lowercase() || c == '_')
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '$');

    if plain && !RESERVED_WORDS.contains(&identifier) {
        identifier.to_string()
    } else {
        format!("\"{}\"", identifier.replace('"', "\"\""))
    }
}

/// Render the `CREATE TABLE` statement for a table.
pub fn create_table(table: &TableDef) -> String {
    let mut clauses: Vec<String> = table.columns().iter().map(column_clause).collect();

    if let Some(pk) = table.primary_key().filter(|pk| !pk.is_empty()) {
        clauses.push(format!("PRIMARY KEY ({})", identifier_list(&pk.columns)));
    }

    clauses.extend(
        table
            .columns()
            .iter()
            .filter(|c| c.unique)
            .map(|c| format!("UNIQUE ({})", quote_identifier(&c.name))),
    );

    format!(
        "CREATE TABLE {} ({})",
        table_identifier(table),
        clauses.join(", ")
    )
}

/// Render `CREATE TABLE` statements for every table, in insertion order.
pub fn create_all(metadata: &MetaData) -> Vec<String> {
    metadata.tables().iter().map(create_table).collect()
}

fn table_identifier(table: &TableDef) -> String {
    match &table.schema {
        Some(schema) => format!(
            "{}.{}",
            quote_identifier(schema),
            quote_identifier(&table.name)
        ),
        None => quote_identifier(&table.name),
    }
}

fn column_clause(column: &ColumnDef) -> String {
    let mut clause = format!("{} {}", quote_identifier(&column.name), column.column_type);
    if !column.nullable {
        clause.push_str(" NOT NULL");
    }
    for check in &column.checks {
        clause.push_str(&format!(" CHECK ({})", check));
    }
    clause
}

fn identifier_list(names: &[String]) -> String {
    names
        .iter()
        .map(|n| quote_identifier(n))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relational::{CheckExpr, PrimaryKeyConstraint, RelationalType};

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("comment"), "comment");
        assert_eq!(quote_identifier("entry_id"), "entry_id");
        assert_eq!(quote_identifier("like"), "\"like\"");
        assert_eq!(quote_identifier("Title"), "\"Title\"");
        assert_eq!(quote_identifier("年龄"), "\"年龄\"");
        assert_eq!(quote_identifier("1st"), "\"1st\"");
    }

    #[test]
    fn test_create_table_with_unique_and_pk() {
        let table = TableDef::new("articles")
            .with_column(ColumnDef::new("id", RelationalType::Integer).not_null())
            .unwrap()
            .with_column(ColumnDef::new("title", RelationalType::string()).not_null().unique(true))
            .unwrap()
            .with_column(ColumnDef::new("content", RelationalType::string()))
            .unwrap()
            .with_primary_key(PrimaryKeyConstraint::new(["id"]))
            .unwrap();

        assert_eq!(
            create_table(&table),
            "CREATE TABLE articles (\
             id INTEGER NOT NULL, \
             title VARCHAR NOT NULL, \
             content VARCHAR, \
             PRIMARY KEY (id), \
             UNIQUE (title))"
        );
    }

    #[test]
    fn test_primary_key_column_is_not_null() {
        let table = TableDef::new("bar")
            .with_column(ColumnDef::new("id", RelationalType::Integer))
            .unwrap()
            .with_column(ColumnDef::new("value", RelationalType::varchar(30)))
            .unwrap()
            .with_primary_key(PrimaryKeyConstraint::new(["id"]))
            .unwrap();

        assert!(!table.column("id").unwrap().nullable);
        assert_eq!(
            create_table(&table),
            "CREATE TABLE bar (id INTEGER NOT NULL, value VARCHAR(30), PRIMARY KEY (id))"
        );
    }

    #[test]
    fn test_checks_and_schema() {
        let table = TableDef::new("comments")
            .with_schema("scma")
            .with_column(
                ColumnDef::new("like", RelationalType::Integer).with_check(CheckExpr::Maximum {
                    column: "like".into(),
                    value: 100i64.into(),
                }),
            )
            .unwrap();

        assert_eq!(
            create_table(&table),
            "CREATE TABLE scma.comments (\"like\" INTEGER CHECK (\"like\" <= 100))"
        );
    }
}
