//! Album and track metadata for one audio directory.
//!
//! Each source is tried in turn: info sheet, cuesheet, then the directory
//! names themselves. A source either yields values it vouches for or is
//! rejected with a reason, and the next one takes over.

mod album;
mod info_sheet;
mod names;
mod resolution;
mod sources;
mod tracks;

pub use album::{album_from_cuesheet, album_from_info_sheet, album_from_name, resolve_album};
pub use info_sheet::{parse_header, parse_set_list, SetListEntry};
pub use names::title_from_file_name;
pub use resolution::{Resolution, ResolverOptions};
pub use sources::{locate_sources, SheetPaths};
pub use tracks::{resolve_tracks, tracks_from_cuesheet, tracks_from_info_sheet, TrackNames, UNKNOWN_ARTIST};

use dir_catalog::{CatalogError, DirectoryContext};
use external_tools::{ToolError, ToolRunner, ToolSet};
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MetadataError>;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("failed to read metadata source {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to look for metadata sources")]
    Listing(#[from] CatalogError),

    #[error("failed to probe track duration")]
    Probe(#[from] ToolError),
}

impl MetadataError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}

/// Read a sheet as text, tolerating a byte-order mark and non-UTF-8 bytes
pub(crate) fn read_sheet(path: &std::path::Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| MetadataError::read(path, e))?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(text.trim_start_matches('\u{feff}').to_string())
}

/// Locate the sheets for `ctx`, then resolve its album and its tracks.
///
/// `files` are the audio files the caller is about to process, in order.
pub fn resolve(
    ctx: &mut DirectoryContext,
    files: &[PathBuf],
    options: &ResolverOptions,
    runner: &dyn ToolRunner,
    tools: &ToolSet,
) -> Result<()> {
    let sheets = locate_sources(ctx)?;
    ctx.info_sheet_path = sheets.info_sheet;
    ctx.cuesheet_path = sheets.cuesheet;

    resolve_album(ctx, options)?;
    resolve_tracks(ctx, files, options, runner, tools)?;

    tracing::info!(
        "Resolved {} (album from {}, tracks from {})",
        ctx.path.display(),
        ctx.dir_metadata_source,
        ctx.track_metadata_source
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cuesheet::{CueHeader, CueSheet};
    use dir_catalog::MetadataSource;
    use external_tools::stub::StubRunner;
    use std::fs;
    use tempfile::TempDir;

    const SHEET: &str = "The Band\nThe Fillmore\nSan Francisco, CA\n2024-03-15\n\n\
                         Set 1\n01. One\n02. Two\n03. Three\n04. Four\n05. Five\nEnd\n";

    const SHORT_SHEET: &str = "The Band\nThe Fillmore\nSan Francisco, CA\n2024-03-15\n\n\
                               Set 1\n01. One\n02. Two\n03. Three\n04. Four\nEnd\n";

    struct Album {
        _root: TempDir,
        ctx: DirectoryContext,
        files: Vec<PathBuf>,
    }

    fn album_with_tracks(count: usize) -> Album {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("The Band 2024-03-15").join("16-44");
        fs::create_dir_all(&dir).unwrap();
        let files = (1..=count)
            .map(|i| {
                let file = dir.join(format!("{:02} file{}.wav", i, i));
                fs::write(&file, b"RIFF").unwrap();
                file
            })
            .collect();
        Album {
            ctx: DirectoryContext::new(&dir),
            _root: root,
            files,
        }
    }

    fn probe() -> StubRunner {
        StubRunner::new().respond("mediainfo", "125000")
    }

    #[test]
    fn info_sheet_supplies_album_and_tracks() {
        let mut album = album_with_tracks(5);
        fs::write(album.ctx.path.join("info.txt"), SHEET).unwrap();

        resolve(&mut album.ctx, &album.files, &ResolverOptions::default(), &probe(), &ToolSet::new())
            .unwrap();

        assert_eq!(album.ctx.dir_metadata_source, MetadataSource::InfoSheet);
        assert_eq!(album.ctx.track_metadata_source, MetadataSource::InfoSheet);
        assert_eq!(album.ctx.album.concert_date.as_deref(), Some("2024-03-15"));
        assert_eq!(album.ctx.album.album_artist.as_deref(), Some("The Band"));
        assert_eq!(album.ctx.tracks.titles[4], "Five");
        assert!(album.ctx.tracks.is_complete(5));
    }

    #[test]
    fn short_set_list_rolls_back_tracks_only() {
        let mut album = album_with_tracks(5);
        fs::write(album.ctx.path.join("info.txt"), SHORT_SHEET).unwrap();

        resolve(&mut album.ctx, &album.files, &ResolverOptions::default(), &probe(), &ToolSet::new())
            .unwrap();

        assert_eq!(album.ctx.dir_metadata_source, MetadataSource::InfoSheet);
        assert_eq!(album.ctx.track_metadata_source, MetadataSource::DirectoryName);
        assert_eq!(album.ctx.tracks.titles[0], "file1");
        assert_eq!(album.ctx.tracks.artists, vec!["The Band"; 5]);
    }

    #[test]
    fn generated_cuesheet_resolves_back() {
        let mut album = album_with_tracks(2);
        let header = CueHeader {
            performer: Some("The Band".to_string()),
            title: Some("Fillmore Night".to_string()),
            date: Some("2024-03-15".to_string()),
            ..CueHeader::default()
        };
        let sheet = CueSheet::build(
            "The Band 2024-03-15.wav",
            header,
            &["Opener".to_string(), "Closer".to_string()],
            &["The Band".to_string(), "Guest".to_string()],
            &["125000".to_string(), "200500".to_string()],
        )
        .unwrap();
        fs::write(album.ctx.path.join("The Band 2024-03-15.cue"), sheet.render()).unwrap();

        resolve(&mut album.ctx, &album.files, &ResolverOptions::default(), &probe(), &ToolSet::new())
            .unwrap();

        assert_eq!(album.ctx.dir_metadata_source, MetadataSource::Cuesheet);
        assert_eq!(album.ctx.track_metadata_source, MetadataSource::Cuesheet);
        assert_eq!(album.ctx.album.album.as_deref(), Some("Fillmore Night"));
        assert_eq!(album.ctx.tracks.titles, ["Opener", "Closer"]);
        assert_eq!(album.ctx.tracks.artists, ["The Band", "Guest"]);
    }
}
