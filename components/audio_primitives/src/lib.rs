mod bitrate;
mod format;
mod matrix;

pub use bitrate::Bitrate;
pub use format::Format;
pub use matrix::{BitrateSelector, FormatBitrateMatrix, FormatSelector};

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown audio format: {0}")]
    UnknownFormat(String),

    #[error("Unknown bitrate: {0}")]
    UnknownBitrate(String),
}
