use super::{bitrate_selector, stem, Dispatcher, Outcome};
use crate::error::Result;
use crate::fs_ops;
use audio_primitives::Format;
use dir_catalog::{DirListing, DirectoryContext};

/// Decode a compressed directory back into its `<base name>` WAV sibling
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

    let out_dir = ctx.sibling(&ctx.base_name);
    fs_ops::create_dir(&out_dir)?;

    let mut outputs = Vec::with_capacity(files.len());
    for file in &files {
        let output = out_dir.join(format!("{}.{}", stem(file), Format::Wav.file_extension()));
        if dispatcher.may_write(&output) {
            dispatcher.run_tool(&dispatcher.config.tools.decode(format, file, &output))?;
        }
        outputs.push(output);
    }

    dispatcher.write_checksums(&out_dir, &outputs)?;
    tracing::info!("Decompressed {} into {}", ctx.path.display(), out_dir.display());
    Ok(Outcome::Done)
}
