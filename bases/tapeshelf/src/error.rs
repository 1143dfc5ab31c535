//! Errors that abort a run.
//!
//! Skips (an existing output without `--overwrite`, an empty directory) are
//! not errors; they are logged where they happen.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShelfError {
    #[error("failed to {operation} {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Catalog(#[from] dir_catalog::CatalogError),

    #[error(transparent)]
    Metadata(#[from] album_metadata::MetadataError),

    #[error(transparent)]
    Tool(#[from] external_tools::ToolError),

    #[error("failed to build cuesheet for {path}")]
    Cuesheet {
        path: PathBuf,
        #[source]
        source: cuesheet::CuesheetError,
    },

    #[error("backup {backup} of {original} is empty")]
    EmptyBackup { original: PathBuf, backup: PathBuf },
}

impl ShelfError {
    pub fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ShelfError::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ShelfError>;
