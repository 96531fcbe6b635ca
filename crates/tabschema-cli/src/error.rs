//! CLI errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by subcommands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Descriptor file could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog storage could not be opened.
    #[error("cannot open catalog at {}: {source}", .path.display())]
    OpenCatalog {
        path: PathBuf,
        #[source]
        source: sled::Error,
    },

    /// Load, dump or catalog failure.
    #[error(transparent)]
    Schema(#[from] tabschema_core::Error),
}
