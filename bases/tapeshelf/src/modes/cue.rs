use super::{track_wavs, Dispatcher, Outcome};
use crate::error::{Result, ShelfError};
use audio_primitives::Format;
use cuesheet::{CueHeader, CueSheet};
use dir_catalog::{DirListing, DirectoryContext};

/// Describe the directory's tracks as one `<album>.cue` for the joined file
pub(super) fn run(
    dispatcher: &Dispatcher,
    ctx: &mut DirectoryContext,
    listing: &DirListing,
) -> Result<Outcome> {
    let Some(bitrate) = ctx.bitrate else {
        return Ok(Outcome::NotSelected);
    };
    if !dispatcher.config.matrix.is_set(Format::Wav, bitrate) {
        return Ok(Outcome::NotSelected);
    }

    let wavs = track_wavs(ctx, listing);
    if wavs.is_empty() {
        return Ok(Outcome::skipped("no WAV files"));
    }

    dispatcher.resolve(ctx, &wavs)?;
    if write_cuesheet(dispatcher, ctx)? {
        Ok(Outcome::Done)
    } else {
        Ok(Outcome::skipped("cuesheet exists"))
    }
}

/// Write `<parent base name>.cue` from the resolved metadata; false when an
/// existing one was kept
pub(super) fn write_cuesheet(dispatcher: &Dispatcher, ctx: &DirectoryContext) -> Result<bool> {
    let path = ctx.path.join(format!("{}.cue", ctx.parent_base_name));
    if !dispatcher.may_write(&path) {
        return Ok(false);
    }

    let album = &ctx.album;
    let header = CueHeader {
        performer: album.album_artist.clone(),
        title: album.album.clone(),
        event: album.event.clone(),
        venue: album.venue.clone(),
        stage: album.stage.clone(),
        location: album.location.clone(),
        date: album.concert_date.clone(),
    };
    let sheet = CueSheet::build(
        format!("{}.wav", ctx.parent_base_name),
        header,
        &ctx.tracks.titles,
        &ctx.tracks.artists,
        &ctx.tracks.durations_ms,
    )
    .map_err(|source| ShelfError::Cuesheet {
        path: path.clone(),
        source,
    })?;

    crate::fs_ops::write_file(&path, &sheet.render(), true)
}
