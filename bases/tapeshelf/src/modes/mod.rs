// bases/tapeshelf/src/modes/mod.rs
//! One pipeline per mode, each run on a single classified directory.
//!
//! Every pipeline follows the same order: gate on directory type and the
//! format/bitrate selection, resolve metadata for the files it will touch,
//! run the external tools, then write sidecars.

mod compress;
mod convert;
mod cue;
mod decompress;
mod delete;
mod join;
mod verify;

use crate::config::{Config, Mode};
use crate::error::{Result, ShelfError};
use crate::fs_ops;
use crate::sidecar::{self, CHECKSUM_EXTENSION};
use audio_primitives::{Bitrate, BitrateSelector};
use dir_catalog::{DirListing, DirectoryContext};
use external_tools::{ToolCommand, ToolRunner, TrackTags};
use std::path::{Path, PathBuf};

/// What a pipeline did with a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Wrong directory type, or its format/bitrate is not selected
    NotSelected,
    /// Selected, but there was nothing to do
    Skipped(String),
    Done,
    /// Safe to delete once the walk is over
    Delete(PathBuf),
}

impl Outcome {
    fn skipped(reason: impl Into<String>) -> Self {
        Outcome::Skipped(reason.into())
    }
}

/// Runs the configured mode's pipeline
pub struct Dispatcher<'a> {
    pub config: &'a Config,
    pub runner: &'a dyn ToolRunner,
}

impl<'a> Dispatcher<'a> {
    pub fn new(config: &'a Config, runner: &'a dyn ToolRunner) -> Self {
        Self { config, runner }
    }

    pub fn run(&self, ctx: &mut DirectoryContext, listing: &DirListing) -> Result<Outcome> {
        if !self.config.mode.accepts(ctx.dir_type) {
            return Ok(Outcome::NotSelected);
        }

        match self.config.mode {
            Mode::Compress => compress::run(self, ctx, listing),
            Mode::Verify => verify::run(self, ctx, listing),
            Mode::Decompress => decompress::run(self, ctx, listing),
            Mode::Join => join::run(self, ctx, listing),
            Mode::ConvertToWav => convert::to_wav(self, ctx, listing),
            Mode::ConvertBitrate => convert::bitrate(self, ctx, listing),
            Mode::Delete => delete::run(self, ctx, listing),
            Mode::CreateCuesheet => cue::run(self, ctx, listing),
        }
    }

    fn resolve(&self, ctx: &mut DirectoryContext, files: &[PathBuf]) -> Result<()> {
        album_metadata::resolve(
            ctx,
            files,
            &self.config.resolver,
            self.runner,
            &self.config.tools,
        )?;
        Ok(())
    }

    fn run_tool(&self, command: &ToolCommand) -> Result<String> {
        Ok(self.runner.run(command)?)
    }

    fn may_write(&self, path: &Path) -> bool {
        fs_ops::may_write(path, self.config.overwrite)
    }

    fn write_file(&self, path: &Path, contents: &str) -> Result<bool> {
        fs_ops::write_file(path, contents, self.config.overwrite)
    }

    /// `<dir>/<dir>.sha256` over `files`
    fn write_checksums(&self, dir: &Path, files: &[PathBuf]) -> Result<()> {
        let path = sidecar::sidecar_path(dir, CHECKSUM_EXTENSION);
        if !self.may_write(&path) {
            return Ok(());
        }
        let manifest = sidecar::checksum_manifest(files)?;
        fs_ops::write_file(&path, &manifest, true)?;
        Ok(())
    }
}

/// Bitrate column a directory is gated on; a compressed directory whose name
/// names no bitrate matches any selected bitrate
fn bitrate_selector(bitrate: Option<Bitrate>) -> BitrateSelector {
    bitrate.map_or(BitrateSelector::Any, BitrateSelector::Only)
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Per-track WAVs, leaving out an album-long file made by an earlier join
fn track_wavs(ctx: &DirectoryContext, listing: &DirListing) -> Vec<PathBuf> {
    let joined = joined_path(ctx);
    listing
        .wav_files()
        .into_iter()
        .filter(|wav| *wav != joined)
        .collect()
}

fn joined_path(ctx: &DirectoryContext) -> PathBuf {
    ctx.path.join(format!("{}.wav", ctx.parent_base_name))
}

fn tags(ctx: &DirectoryContext, track: usize) -> TrackTags {
    TrackTags {
        artist: ctx
            .tracks
            .artists
            .get(track)
            .cloned()
            .unwrap_or_else(|| album_metadata::UNKNOWN_ARTIST.to_string()),
        album: ctx.album.album.clone().unwrap_or_default(),
        title: ctx.tracks.titles.get(track).cloned().unwrap_or_default(),
        track_number: track + 1,
        date: ctx.album.concert_date.clone(),
    }
}

fn io_error<'a>(operation: &'static str, path: &'a Path) -> impl FnOnce(std::io::Error) -> ShelfError + 'a {
    move |source| ShelfError::io(operation, path, source)
}
