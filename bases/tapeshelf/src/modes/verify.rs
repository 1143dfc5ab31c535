use super::{bitrate_selector, io_error, Dispatcher, Outcome};
use crate::error::Result;
use crate::sidecar::{
    self, CheckStatus, VerifyReport, CHECKSUM_EXTENSION, FINGERPRINT_EXTENSION, REPORT_EXTENSION,
};
use audio_primitives::Format;
use dir_catalog::{DirListing, DirectoryContext};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

/// Test every file with its format's own checker, then compare against the
/// checksum and fingerprint sidecars when they are present
pub(super) fn run(
    dispatcher: &Dispatcher,
    ctx: &mut DirectoryContext,
    listing: &DirListing,
) -> Result<Outcome> {
    let Some(format) = ctx.compression_format else {
        return Ok(Outcome::NotSelected);
    };
    if !dispatcher
        .config
        .matrix
        .is_set(format, bitrate_selector(ctx.bitrate))
    {
        return Ok(Outcome::NotSelected);
    }

    let files = listing.audio_files(format);
    if files.is_empty() {
        return Ok(Outcome::skipped(format!("no .{} files", format.file_extension())));
    }

    dispatcher.resolve(ctx, &files)?;

    let mut report = VerifyReport::new(format!(
        "{} - {} ({})",
        ctx.album.album_artist.as_deref().unwrap_or(album_metadata::UNKNOWN_ARTIST),
        ctx.album.album.as_deref().unwrap_or_default(),
        ctx.name
    ));

    for file in &files {
        dispatcher.run_tool(&dispatcher.config.tools.test(format, file))?;
        report.tested(file);
    }

    compare_checksums(ctx, &files, &mut report)?;
    if format == Format::Flac {
        compare_fingerprints(dispatcher, format, ctx, &mut report)?;
    }

    if report.failures() > 0 {
        tracing::warn!("{} failed verification: {} problems", ctx.path.display(), report.failures());
    } else {
        tracing::info!("{} verified, {} files", ctx.path.display(), files.len());
    }

    dispatcher.write_file(
        &sidecar::sidecar_path(&ctx.path, REPORT_EXTENSION),
        &report.render(),
    )?;
    Ok(Outcome::Done)
}

fn compare_checksums(
    ctx: &DirectoryContext,
    files: &[PathBuf],
    report: &mut VerifyReport,
) -> Result<()> {
    let manifest_path = sidecar::sidecar_path(&ctx.path, CHECKSUM_EXTENSION);
    if !manifest_path.exists() {
        return Ok(());
    }
    let text = fs::read_to_string(&manifest_path).map_err(io_error("read", &manifest_path))?;
    let entries = sidecar::parse_manifest(&text);

    let listed: HashSet<&str> = entries.iter().map(|e| e.file_name.as_str()).collect();
    for entry in &entries {
        let path = ctx.path.join(&entry.file_name);
        let status = if !path.exists() {
            CheckStatus::Missing
        } else if sidecar::sha256_file(&path)? == entry.digest {
            CheckStatus::Ok
        } else {
            CheckStatus::Mismatch
        };
        report.check(CHECKSUM_EXTENSION, entry.file_name.as_str(), status);
    }

    for file in files {
        let name = sidecar::file_name(file);
        if !listed.contains(name.as_str()) {
            report.check(CHECKSUM_EXTENSION, name, CheckStatus::Unlisted);
        }
    }
    Ok(())
}

fn compare_fingerprints(
    dispatcher: &Dispatcher,
    format: Format,
    ctx: &DirectoryContext,
    report: &mut VerifyReport,
) -> Result<()> {
    let path = sidecar::sidecar_path(&ctx.path, FINGERPRINT_EXTENSION);
    if !path.exists() {
        return Ok(());
    }
    let text = fs::read_to_string(&path).map_err(io_error("read", &path))?;

    for (name, expected) in sidecar::parse_fingerprints(&text) {
        let file = ctx.path.join(&name);
        let Some(command) = dispatcher.config.tools.fingerprint(format, &file) else {
            return Ok(());
        };
        let status = if !file.exists() {
            CheckStatus::Missing
        } else if dispatcher.run_tool(&command)?.trim().eq_ignore_ascii_case(&expected) {
            CheckStatus::Ok
        } else {
            CheckStatus::Mismatch
        };
        report.check(FINGERPRINT_EXTENSION, name, status);
    }
    Ok(())
}
