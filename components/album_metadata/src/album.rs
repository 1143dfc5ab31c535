use crate::info_sheet::{labelled_header, parse_header};
use crate::{read_sheet, Resolution, ResolverOptions, Result};
use cuesheet::find_label;
use dir_catalog::naming::clean_album;
use dir_catalog::{AlbumInfo, AlbumName, DirectoryContext, MetadataSource, RecordingType};

/// Album fields from an info sheet, if they are complete enough to trust
pub fn album_from_info_sheet(text: &str, recording_type: RecordingType) -> Resolution<AlbumInfo> {
    judge(
        parse_header(text, recording_type),
        recording_type,
        MetadataSource::InfoSheet,
    )
}

/// Album fields from the header of a cuesheet
pub fn album_from_cuesheet(text: &str, recording_type: RecordingType) -> Resolution<AlbumInfo> {
    let header = cuesheet::header(text);
    let info = match recording_type {
        RecordingType::Live => labelled_header(&header),
        RecordingType::Commercial | RecordingType::Other => AlbumInfo {
            album_artist: find_label(&header, "PERFORMER"),
            album: find_label(&header, "TITLE"),
            ..AlbumInfo::default()
        },
    };
    judge(info, recording_type, MetadataSource::Cuesheet)
}

/// Album fields implied by the album directory's name; always usable
pub fn album_from_name(name: &AlbumName) -> AlbumInfo {
    AlbumInfo {
        album_artist: name.artist.clone(),
        album: Some(name.album.clone()).filter(|album| !album.is_empty()),
        concert_date: name.date.clone(),
        stage: name.stage.clone(),
        ..AlbumInfo::default()
    }
}

/// Live recordings need an artist and a real date; the title can be built
/// from the rest. Anything else needs both artist and title.
fn judge(
    mut info: AlbumInfo,
    recording_type: RecordingType,
    source: MetadataSource,
) -> Resolution<AlbumInfo> {
    if info.album_artist.is_none() {
        return Resolution::rejected(source, "no artist");
    }

    match recording_type {
        RecordingType::Live => {
            if info.concert_date.is_none() {
                return Resolution::rejected(source, "no valid concert date");
            }
            if info.album.is_none() {
                info.album = synthesized_title(&info);
            }
        }
        RecordingType::Commercial | RecordingType::Other => {
            if info.album.is_none() {
                return Resolution::rejected(source, "no album title");
            }
        }
    }

    Resolution::accepted(info, source)
}

/// `event venue stage location date` with runs of whitespace collapsed
fn synthesized_title(info: &AlbumInfo) -> Option<String> {
    let parts = [
        &info.event,
        &info.venue,
        &info.stage,
        &info.location,
        &info.concert_date,
    ];
    let title = parts
        .into_iter()
        .flatten()
        .flat_map(|part| part.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ");
    (!title.is_empty()).then_some(title)
}

/// Fill the context's album fields from the first source that holds up
pub fn resolve_album(ctx: &mut DirectoryContext, options: &ResolverOptions) -> Result<()> {
    let mut resolved = None;

    if let Some(path) = ctx.info_sheet_path.as_ref().filter(|_| options.use_info_sheet) {
        let text = read_sheet(path)?;
        resolved = album_from_info_sheet(&text, ctx.recording_type).into_accepted();
    }

    if resolved.is_none() {
        if let Some(path) = ctx.cuesheet_path.as_ref().filter(|_| options.use_cuesheet) {
            let text = read_sheet(path)?;
            resolved = album_from_cuesheet(&text, ctx.recording_type).into_accepted();
        }
    }

    let (mut album, source) = resolved
        .unwrap_or_else(|| (album_from_name(&ctx.name_parts), MetadataSource::DirectoryName));
    album.album = album.album.as_deref().map(clean_album);

    tracing::debug!(
        "Album for {}: {:?} by {:?} (from {})",
        ctx.path.display(),
        album.album,
        album.album_artist,
        source
    );

    ctx.album = album;
    ctx.dir_metadata_source = source;
    Ok(())
}
