use crate::CatalogError;
use audio_primitives::Format;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const INFO_SHEET_EXTENSION: &str = "txt";
pub const CUESHEET_EXTENSION: &str = "cue";

/// Immediate contents of one directory, sorted by file name
#[derive(Debug, Clone, Default)]
pub struct DirListing {
    pub subdirs: Vec<PathBuf>,
    pub files: Vec<PathBuf>,
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|e| e.eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}

impl DirListing {
    /// List files and subdirectories of `dir` without descending.
    ///
    /// Hidden entries are skipped and symlinks are not followed.
    pub fn read(dir: &Path) -> Result<Self, CatalogError> {
        let mut listing = DirListing::default();

        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(|source| CatalogError::Listing {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if is_hidden(path) {
                continue;
            }
            if entry.file_type().is_dir() {
                listing.subdirs.push(path.to_path_buf());
            } else if entry.file_type().is_file() {
                listing.files.push(path.to_path_buf());
            }
        }

        Ok(listing)
    }

    /// Files whose extension matches `ext`, case-insensitive
    pub fn with_extension<'a>(&'a self, ext: &'a str) -> impl Iterator<Item = &'a PathBuf> + 'a {
        self.files.iter().filter(move |path| has_extension(path, ext))
    }

    pub fn audio_files(&self, format: Format) -> Vec<PathBuf> {
        self.with_extension(format.file_extension()).cloned().collect()
    }

    pub fn wav_files(&self) -> Vec<PathBuf> {
        self.audio_files(Format::Wav)
    }

    /// Compressed captures of any format, paired with their format
    pub fn compressed_files(&self) -> Vec<(Format, PathBuf)> {
        self.files
            .iter()
            .filter_map(|path| {
                let ext = path.extension()?.to_str()?;
                let format = Format::from_file_extension(ext)?;
                format.is_compressed().then(|| (format, path.clone()))
            })
            .collect()
    }
}
