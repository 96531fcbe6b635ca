//! Output formatters for table definitions.

use clap::ValueEnum;
use comfy_table::{Cell, Table};
use tabschema_core::{ddl, RelationalType, TableDef};

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table of columns
    Table,
    /// Relational definition as JSON
    Json,
    /// CREATE TABLE statement
    Ddl,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Ddl => write!(f, "ddl"),
        }
    }
}

/// Trait for formatting output.
pub trait Formatter {
    /// Format a table definition.
    fn format_table(&self, table: &TableDef) -> String;

    /// Format a list of table names.
    fn format_list(&self, names: &[String]) -> String;

    /// Format type tags and the column types they resolve to.
    fn format_tags(&self, tags: &[(String, RelationalType)]) -> String;
}

/// Create a formatter for the given output format.
pub fn create_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Table => Box::new(TableFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Ddl => Box::new(DdlFormatter),
    }
}

/// Column listing using comfy-table.
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format_table(&self, table: &TableDef) -> String {
        let mut output = Table::new();
        output.set_header(vec![
            "Column", "Type", "Nullable", "Unique", "Primary Key", "Checks", "Comment",
        ]);

        for column in table.columns() {
            let checks: Vec<String> = column.checks.iter().map(|c| c.to_sql()).collect();
            output.add_row(vec![
                Cell::new(&column.name),
                Cell::new(column.column_type.to_string()),
                Cell::new(yes_no(column.nullable)),
                Cell::new(yes_no(column.unique)),
                Cell::new(yes_no(table.is_primary_key(&column.name))),
                Cell::new(checks.join("\n")),
                Cell::new(column.comment.as_deref().unwrap_or("")),
            ]);
        }

        format!("{}\n{}", table.qualified_name(), output)
    }

    fn format_list(&self, names: &[String]) -> String {
        if names.is_empty() {
            return "No tables".to_string();
        }
        let mut output = Table::new();
        output.set_header(vec!["Table"]);
        for name in names {
            output.add_row(vec![name]);
        }
        output.to_string()
    }

    fn format_tags(&self, tags: &[(String, RelationalType)]) -> String {
        let mut output = Table::new();
        output.set_header(vec!["Tag", "Type"]);
        for (tag, column_type) in tags {
            output.add_row(vec![tag.clone(), column_type.to_string()]);
        }
        output.to_string()
    }
}

/// JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_table(&self, table: &TableDef) -> String {
        serde_json::to_string_pretty(table).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }

    fn format_list(&self, names: &[String]) -> String {
        serde_json::to_string_pretty(names).unwrap_or_else(|_| "[]".to_string())
    }

    fn format_tags(&self, tags: &[(String, RelationalType)]) -> String {
        let map: serde_json::Map<String, serde_json::Value> = tags
            .iter()
            .map(|(tag, column_type)| (tag.clone(), column_type.to_string().into()))
            .collect();
        serde_json::to_string_pretty(&map).unwrap_or_else(|_| "{}".to_string())
    }
}

/// DDL formatter.
pub struct DdlFormatter;

impl Formatter for DdlFormatter {
    fn format_table(&self, table: &TableDef) -> String {
        format!("{};", ddl::create_table(table))
    }

    fn format_list(&self, names: &[String]) -> String {
        names.join("\n")
    }

    /// One `TAG=TYPE` line per tag, accepted back by `--type-map`.
    fn format_tags(&self, tags: &[(String, RelationalType)]) -> String {
        tags.iter()
            .map(|(tag, column_type)| format!("{}={}", tag, column_type))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}
