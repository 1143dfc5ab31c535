use super::{stem, tags, track_wavs, Dispatcher, Outcome};
use crate::error::Result;
use crate::fs_ops;
use crate::sidecar::{self, FINGERPRINT_EXTENSION, PLAYLIST_EXTENSION};
use audio_primitives::Format;
use dir_catalog::{DirListing, DirectoryContext};
use std::path::{Path, PathBuf};

/// Encode the directory's WAVs into `<name>.<ext>` siblings, one per
/// selected compressed format
pub(super) fn run(
    dispatcher: &Dispatcher,
    ctx: &mut DirectoryContext,
    listing: &DirListing,
) -> Result<Outcome> {
    let Some(bitrate) = ctx.bitrate else {
        return Ok(Outcome::NotSelected);
    };
    let formats: Vec<Format> = Format::COMPRESSED
        .into_iter()
        .filter(|format| dispatcher.config.matrix.is_set(*format, bitrate))
        .collect();
    if formats.is_empty() {
        return Ok(Outcome::NotSelected);
    }

    let wavs = track_wavs(ctx, listing);
    if wavs.is_empty() {
        return Ok(Outcome::skipped("no WAV files"));
    }

    dispatcher.resolve(ctx, &wavs)?;

    for format in formats {
        let Some(extension) = format.dir_extension() else {
            continue;
        };
        let out_dir = ctx.sibling(&format!("{}.{}", ctx.name, extension));
        fs_ops::create_dir(&out_dir)?;

        let mut outputs = Vec::with_capacity(wavs.len());
        for (i, wav) in wavs.iter().enumerate() {
            let output = out_dir.join(format!("{}.{}", stem(wav), format.file_extension()));
            if dispatcher.may_write(&output) {
                let command = dispatcher.config.tools.encode(format, wav, &output, &tags(ctx, i));
                dispatcher.run_tool(&command)?;
            }
            outputs.push(output);
        }

        dispatcher.write_checksums(&out_dir, &outputs)?;
        dispatcher.write_file(
            &sidecar::sidecar_path(&out_dir, PLAYLIST_EXTENSION),
            &sidecar::playlist(&outputs, &ctx.tracks),
        )?;
        if format == Format::Flac {
            write_fingerprints(dispatcher, format, &out_dir, &outputs)?;
        }

        tracing::info!(
            "Compressed {} tracks of {} into {}",
            outputs.len(),
            ctx.path.display(),
            out_dir.display()
        );
    }

    Ok(Outcome::Done)
}

fn write_fingerprints(
    dispatcher: &Dispatcher,
    format: Format,
    out_dir: &Path,
    outputs: &[PathBuf],
) -> Result<()> {
    let path = sidecar::sidecar_path(out_dir, FINGERPRINT_EXTENSION);
    if !dispatcher.may_write(&path) {
        return Ok(());
    }

    let mut entries = Vec::with_capacity(outputs.len());
    for output in outputs {
        let Some(command) = dispatcher.config.tools.fingerprint(format, output) else {
            return Ok(());
        };
        let md5 = dispatcher.run_tool(&command)?;
        entries.push((sidecar::file_name(output), md5.trim().to_string()));
    }

    fs_ops::write_file(&path, &sidecar::fingerprints(&entries), true)?;
    Ok(())
}
