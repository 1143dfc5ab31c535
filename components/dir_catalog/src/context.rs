use crate::classify::{classify, DirType};
use crate::naming::{
    parse_album_name, sanitize_key, split_extension, strip_ordinal_prefix, AlbumName,
    RecordingType,
};
use audio_primitives::{Bitrate, Format};
use std::fmt;
use std::path::{Path, PathBuf};

/// Which source supplied accepted metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetadataSource {
    #[default]
    DirectoryName,
    InfoSheet,
    Cuesheet,
}

impl fmt::Display for MetadataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MetadataSource::DirectoryName => "directory name",
            MetadataSource::InfoSheet => "info sheet",
            MetadataSource::Cuesheet => "cuesheet",
        };
        write!(f, "{}", name)
    }
}

/// Album-level descriptive fields, each unset until resolved
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlbumInfo {
    pub album_artist: Option<String>,
    pub album: Option<String>,
    pub event: Option<String>,
    pub venue: Option<String>,
    pub location: Option<String>,
    pub stage: Option<String>,
    /// `yyyy-mm-dd`
    pub concert_date: Option<String>,
}

/// Per-track fields, index-aligned with the directory's audio files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackList {
    pub titles: Vec<String>,
    pub artists: Vec<String>,
    /// Integer milliseconds as reported by the duration probe
    pub durations_ms: Vec<String>,
}

impl TrackList {
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// All three lists agree with the number of files being processed
    pub fn is_complete(&self, file_count: usize) -> bool {
        self.titles.len() == file_count
            && self.artists.len() == file_count
            && self.durations_ms.len() == file_count
    }
}

/// Everything known about one visited directory.
///
/// Built on entry, classified immediately and dropped when the walk moves on;
/// siblings never share one.
#[derive(Debug, Clone)]
pub struct DirectoryContext {
    pub name: String,
    pub path: PathBuf,
    pub parent_name: String,
    pub parent_path: PathBuf,

    pub base_name: String,
    pub extension: Option<String>,
    /// File-name-safe album key derived from the parent directory
    pub parent_base_name: String,
    /// Parent directory name split into artist, date, stage and album
    pub name_parts: AlbumName,

    pub dir_type: DirType,
    pub bitrate: Option<Bitrate>,
    pub compression_format: Option<Format>,
    pub recording_type: RecordingType,

    pub album: AlbumInfo,
    pub dir_metadata_source: MetadataSource,
    pub track_metadata_source: MetadataSource,
    pub tracks: TrackList,

    pub info_sheet_path: Option<PathBuf>,
    pub cuesheet_path: Option<PathBuf>,
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

impl DirectoryContext {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = file_name_of(&path);
        let parent_path = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let parent_name = file_name_of(&parent_path);

        let (base_name, extension) = split_extension(&name);
        let base_name = base_name.to_string();
        let extension = extension.map(str::to_string);

        let name_parts = parse_album_name(&parent_name);
        let parent_base_name = sanitize_key(strip_ordinal_prefix(&parent_name));

        let class = classify(&name);

        Self {
            recording_type: name_parts.recording_type,
            name,
            path,
            parent_name,
            parent_path,
            base_name,
            extension,
            parent_base_name,
            name_parts,
            dir_type: class.dir_type,
            bitrate: class.bitrate,
            compression_format: class.format,
            album: AlbumInfo::default(),
            dir_metadata_source: MetadataSource::default(),
            track_metadata_source: MetadataSource::default(),
            tracks: TrackList::default(),
            info_sheet_path: None,
            cuesheet_path: None,
        }
    }

    pub fn is_audio(&self) -> bool {
        self.dir_type != DirType::Other
    }

    /// Sibling directory sharing this directory's parent
    pub fn sibling(&self, name: &str) -> PathBuf {
        self.parent_path.join(name)
    }
}
