use super::{stem, track_wavs, Dispatcher, Outcome};
use crate::error::{Result, ShelfError};
use crate::fs_ops;
use audio_primitives::{Format, FormatSelector};
use dir_catalog::{DirListing, DirectoryContext};

/// Mark a WAV directory for deletion once every track has a non-empty
/// counterpart in a compressed sibling.
///
/// A missing counterpart only skips the directory; an empty or unreadable
/// one means the backup is broken and aborts the run.
pub(super) fn run(
    dispatcher: &Dispatcher,
    ctx: &mut DirectoryContext,
    listing: &DirListing,
) -> Result<Outcome> {
    let matrix = &dispatcher.config.matrix;
    let Some(bitrate) = ctx.bitrate else {
        return Ok(Outcome::NotSelected);
    };
    if !matrix.is_set(FormatSelector::Any, bitrate) {
        return Ok(Outcome::NotSelected);
    }

    let backup = Format::COMPRESSED
        .into_iter()
        .filter(|format| matrix.is_set(*format, bitrate))
        .find_map(|format| {
            let extension = format.dir_extension()?;
            let dir = ctx.sibling(&format!("{}.{}", ctx.name, extension));
            dir.is_dir().then_some((format, dir))
        });
    let Some((format, backup_dir)) = backup else {
        return Ok(Outcome::skipped("no compressed backup"));
    };

    let wavs = track_wavs(ctx, listing);
    if wavs.is_empty() {
        return Ok(Outcome::skipped("no WAV files"));
    }

    dispatcher.resolve(ctx, &wavs)?;

    for wav in &wavs {
        let counterpart = backup_dir.join(format!("{}.{}", stem(wav), format.file_extension()));
        if !counterpart.exists() {
            return Ok(Outcome::skipped(format!(
                "{} has no counterpart in {}",
                wav.display(),
                backup_dir.display()
            )));
        }
        if fs_ops::file_len(&counterpart)? == 0 {
            return Err(ShelfError::EmptyBackup {
                original: wav.clone(),
                backup: counterpart,
            });
        }
    }

    tracing::info!(
        "{} is backed up in {}, marking for deletion",
        ctx.path.display(),
        backup_dir.display()
    );
    Ok(Outcome::Delete(ctx.path.clone()))
}
