use crate::Result;
use dir_catalog::{DirListing, DirectoryContext, CUESHEET_EXTENSION, INFO_SHEET_EXTENSION};
use std::path::{Path, PathBuf};

/// Info sheet and cuesheet found for one audio directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetPaths {
    pub info_sheet: Option<PathBuf>,
    pub cuesheet: Option<PathBuf>,
}

/// Look in the audio directory, then in its album directory.
///
/// The first directory with any candidate decides; within it the first file
/// by name wins and the rest are reported and ignored.
pub fn locate_sources(ctx: &DirectoryContext) -> Result<SheetPaths> {
    let here = DirListing::read(&ctx.path)?;
    let mut parent = None;

    let mut find = |extension: &str| -> Result<Option<PathBuf>> {
        if let Some(found) = first_match(&here, &ctx.path, extension) {
            return Ok(Some(found));
        }
        if ctx.parent_path.as_os_str().is_empty() {
            return Ok(None);
        }
        if parent.is_none() {
            parent = Some(DirListing::read(&ctx.parent_path)?);
        }
        Ok(parent
            .as_ref()
            .and_then(|l| first_match(l, &ctx.parent_path, extension)))
    };

    let info_sheet = find(INFO_SHEET_EXTENSION)?;
    let cuesheet = find(CUESHEET_EXTENSION)?;

    Ok(SheetPaths {
        info_sheet,
        cuesheet,
    })
}

fn first_match(listing: &DirListing, dir: &Path, extension: &str) -> Option<PathBuf> {
    let mut matches = listing.with_extension(extension);
    let first = matches.next()?.clone();
    for extra in matches {
        tracing::warn!(
            "Several .{} files in {}, using {} and ignoring {}",
            extension,
            dir.display(),
            first.display(),
            extra.display()
        );
    }
    Some(first)
}
