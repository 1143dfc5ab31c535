mod classify;
mod context;
mod listing;
pub mod naming;

pub use classify::{bitrate_in, classify, compressed_format_for, Classification, DirType};
pub use context::{AlbumInfo, DirectoryContext, MetadataSource, TrackList};
pub use listing::{DirListing, CUESHEET_EXTENSION, INFO_SHEET_EXTENSION};
pub use naming::{AlbumName, RecordingType};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to list directory {path}")]
    Listing {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}
