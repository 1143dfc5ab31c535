use super::{cue, joined_path, track_wavs, Dispatcher, Outcome};
use crate::error::Result;
use audio_primitives::Format;
use dir_catalog::{DirListing, DirectoryContext};

/// Join the tracks of a single selected bitrate into one album-long WAV,
/// with a cuesheet describing it
pub(super) fn run(
    dispatcher: &Dispatcher,
    ctx: &mut DirectoryContext,
    listing: &DirListing,
) -> Result<Outcome> {
    let matrix = &dispatcher.config.matrix;
    let Some(bitrate) = ctx.bitrate else {
        return Ok(Outcome::NotSelected);
    };
    if !matrix.is_set(Format::Wav, bitrate) || !matrix.is_unique_bitrate(Format::Wav) {
        return Ok(Outcome::NotSelected);
    }

    let wavs = track_wavs(ctx, listing);
    if wavs.is_empty() {
        return Ok(Outcome::skipped("no WAV files"));
    }

    let joined = joined_path(ctx);
    if !dispatcher.may_write(&joined) {
        return Ok(Outcome::skipped("already joined"));
    }

    dispatcher.resolve(ctx, &wavs)?;
    dispatcher.run_tool(&dispatcher.config.tools.join(&wavs, &joined))?;
    cue::write_cuesheet(dispatcher, ctx)?;

    tracing::info!("Joined {} tracks into {}", wavs.len(), joined.display());
    Ok(Outcome::Done)
}
