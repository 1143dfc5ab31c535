use super::{stem, track_wavs, Dispatcher, Outcome};
use crate::error::Result;
use crate::fs_ops;
use audio_primitives::{Bitrate, Format};
use dir_catalog::{DirListing, DirectoryContext};
use std::path::PathBuf;

/// Decode compressed captures in a Raw directory to WAVs beside them
pub(super) fn to_wav(
    dispatcher: &Dispatcher,
    ctx: &mut DirectoryContext,
    listing: &DirListing,
) -> Result<Outcome> {
    let captures: Vec<(Format, PathBuf)> = listing
        .compressed_files()
        .into_iter()
        .filter(|(format, _)| dispatcher.config.matrix.is_set(*format, Bitrate::Raw))
        .collect();
    if captures.is_empty() {
        return Ok(Outcome::NotSelected);
    }

    let files: Vec<PathBuf> = captures.iter().map(|(_, path)| path.clone()).collect();
    dispatcher.resolve(ctx, &files)?;

    for (format, capture) in &captures {
        let output = ctx
            .path
            .join(format!("{}.{}", stem(capture), Format::Wav.file_extension()));
        if dispatcher.may_write(&output) {
            dispatcher.run_tool(&dispatcher.config.tools.decode(*format, capture, &output))?;
        }
    }

    tracing::info!("Converted {} captures in {}", captures.len(), ctx.path.display());
    Ok(Outcome::Done)
}

/// Resample a tracked directory into the `<target bitrate>` sibling
pub(super) fn bitrate(
    dispatcher: &Dispatcher,
    ctx: &mut DirectoryContext,
    listing: &DirListing,
) -> Result<Outcome> {
    let matrix = &dispatcher.config.matrix;
    let (Some(source), Some(target)) = (ctx.bitrate, dispatcher.config.target_bitrate) else {
        return Ok(Outcome::NotSelected);
    };
    if !matrix.is_set(Format::Wav, source) || !matrix.is_unique_bitrate(Format::Wav) {
        return Ok(Outcome::NotSelected);
    }
    if source == target {
        return Ok(Outcome::skipped(format!("already {}", target)));
    }

    let wavs = track_wavs(ctx, listing);
    if wavs.is_empty() {
        return Ok(Outcome::skipped("no WAV files"));
    }

    dispatcher.resolve(ctx, &wavs)?;

    let out_dir = ctx.sibling(target.name());
    fs_ops::create_dir(&out_dir)?;

    let mut outputs = Vec::with_capacity(wavs.len());
    for wav in &wavs {
        let output = out_dir.join(format!("{}.{}", stem(wav), Format::Wav.file_extension()));
        if dispatcher.may_write(&output) {
            if let Some(command) = dispatcher.config.tools.resample(wav, &output, target) {
                dispatcher.run_tool(&command)?;
            }
        }
        outputs.push(output);
    }

    dispatcher.write_checksums(&out_dir, &outputs)?;
    tracing::info!("Converted {} from {} to {}", ctx.path.display(), source, target);
    Ok(Outcome::Done)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mode;
    use crate::modes::fixtures::{config, files};
    use external_tools::stub::{OutputArg, StubRunner};
    use tempfile::TempDir;

    #[test]
    fn raw_captures_of_selected_formats_are_decoded() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("Album").join("Raw");
        files(&dir, &["take1.flac", "take2.shn"]);
        let config = config(root.path(), Mode::ConvertToWav, &[(Format::Flac, Bitrate::Raw)]);
        let runner = StubRunner::new().respond("mediainfo", "1000");

        let mut ctx = DirectoryContext::new(&dir);
        let listing = DirListing::read(&dir).unwrap();
        let outcome = Dispatcher::new(&config, &runner).run(&mut ctx, &listing).unwrap();

        assert_eq!(outcome, Outcome::Done);
        let decodes = runner.calls_to("flac");
        assert_eq!(decodes.len(), 1);
        assert!(decodes[0].contains("take1.wav"));
        assert!(runner.calls_to("shorten").is_empty());
    }

    #[test]
    fn resamples_into_target_directory() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("Album").join("24-96");
        files(&dir, &["01 a.wav"]);
        let mut config = config(root.path(), Mode::ConvertBitrate, &[(Format::Wav, Bitrate::B24_96)]);
        config.target_bitrate = Some(Bitrate::B16_44);
        let runner = StubRunner::new()
            .respond("mediainfo", "1000")
            .creates_output("sox", OutputArg::Position(3));

        let mut ctx = DirectoryContext::new(&dir);
        let listing = DirListing::read(&dir).unwrap();
        let outcome = Dispatcher::new(&config, &runner).run(&mut ctx, &listing).unwrap();

        assert_eq!(outcome, Outcome::Done);
        let calls = runner.calls_to("sox");
        assert_eq!(calls.len(), 1);
        assert!(calls[0].ends_with("rate -v 44100"));
        assert!(root.path().join("Album").join("16-44").join("16-44.sha256").exists());
    }

    #[test]
    fn target_equal_to_source_is_skipped() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("Album").join("16-44");
        files(&dir, &["01 a.wav"]);
        let mut config = config(root.path(), Mode::ConvertBitrate, &[(Format::Wav, Bitrate::B16_44)]);
        config.target_bitrate = Some(Bitrate::B16_44);
        let runner = StubRunner::new();

        let mut ctx = DirectoryContext::new(&dir);
        let listing = DirListing::read(&dir).unwrap();
        let outcome = Dispatcher::new(&config, &runner).run(&mut ctx, &listing).unwrap();

        assert_eq!(outcome, Outcome::skipped("already 16-44"));
        assert!(runner.invocations().is_empty());
    }
}
