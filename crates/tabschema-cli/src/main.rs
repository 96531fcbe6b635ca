//! Tabschema Command-Line Tool
//!
//! Loads JSON table descriptors into relational definitions, stores them in a
//! local catalog, and dumps stored tables back to JSON.

mod commands;
mod error;
mod formatter;

use clap::{Parser, Subcommand};
use error::CliError;
use formatter::OutputFormat;
use std::path::{Path, PathBuf};
use tabschema_core::{Catalog, RelationalType, TableSchema, TypeOverrides};

/// Tabschema Command-Line Tool
#[derive(Parser, Debug)]
#[command(name = "tabschema")]
#[command(version, about = "Load and dump JSON table descriptors")]
pub struct Args {
    /// Catalog storage directory
    #[arg(short = 'd', long, global = true, default_value = "tabschema-data")]
    pub data: PathBuf,

    /// Output format
    #[arg(long, global = true, default_value = "table", value_enum)]
    pub format: OutputFormat,

    /// Override a type tag, e.g. --type-map str=VARCHAR(255)
    #[arg(long = "type-map", value_name = "TAG=TYPE", global = true, value_parser = parse_type_entry)]
    pub type_map: Vec<(String, RelationalType)>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode a descriptor file and print the table
    Load {
        /// Descriptor JSON file
        file: PathBuf,
    },
    /// Decode a descriptor file and store the table if it does not exist
    Create {
        /// Descriptor JSON file
        file: PathBuf,
    },
    /// Dump a stored table as a JSON descriptor
    Show {
        /// Table name
        name: String,
        /// Namespace the table lives in
        #[arg(short, long)]
        schema: Option<String>,
    },
    /// List stored tables
    List,
    /// Remove a stored table
    Drop {
        /// Table name
        name: String,
        /// Namespace the table lives in
        #[arg(short, long)]
        schema: Option<String>,
    },
    /// List type tags and the column types they map to
    Tags,
}

fn parse_type_entry(entry: &str) -> Result<(String, RelationalType), String> {
    TypeOverrides::parse_entry(entry).map_err(|e| e.to_string())
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tabschema_cli=info".parse().expect("static directive")),
        )
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(args: Args) -> Result<String, CliError> {
    let mut schema = TableSchema::new();
    if !args.type_map.is_empty() {
        schema = schema.with_type_overrides(args.type_map.into_iter().collect());
    }
    let formatter = formatter::create_formatter(args.format);

    let output = match &args.command {
        Command::Load { file } => commands::load(&schema, file, &*formatter)?,
        Command::Create { file } => {
            commands::create(&schema, &open_catalog(&args.data)?, file, &*formatter)?
        }
        Command::Show { name, schema: ns } => {
            commands::show(&schema, &open_catalog(&args.data)?, name, ns.as_deref())?
        }
        Command::List => commands::list(&open_catalog(&args.data)?, &*formatter)?,
        Command::Drop { name, schema: ns } => {
            commands::drop(&open_catalog(&args.data)?, name, ns.as_deref())?
        }
        Command::Tags => commands::tags(&schema, &*formatter)?,
    };
    Ok(output)
}

fn open_catalog(path: &Path) -> Result<Catalog, CliError> {
    let db = sled::open(path).map_err(|source| CliError::OpenCatalog {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Catalog::open(&db)?)
}
