use crate::info_sheet::parse_set_list;
use crate::names::title_from_file_name;
use crate::{read_sheet, Resolution, ResolverOptions, Result};
use cuesheet::parse_tracks;
use dir_catalog::{DirectoryContext, MetadataSource, TrackList};
use external_tools::{probe_duration_ms, ToolRunner, ToolSet};
use std::path::PathBuf;

/// Artist for tracks when nothing better is known
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Titles and artists, one per audio file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackNames {
    pub titles: Vec<String>,
    pub artists: Vec<String>,
}

fn count_matches(
    names: TrackNames,
    file_count: usize,
    source: MetadataSource,
) -> Resolution<TrackNames> {
    if names.titles.len() == file_count {
        Resolution::accepted(names, source)
    } else {
        Resolution::rejected(
            source,
            format!("lists {} tracks for {} files", names.titles.len(), file_count),
        )
    }
}

/// Track names from an info sheet's set list
pub fn tracks_from_info_sheet(
    text: &str,
    album_artist: &str,
    file_count: usize,
) -> Resolution<TrackNames> {
    let mut names = TrackNames::default();
    for entry in parse_set_list(text) {
        names.titles.push(entry.title);
        names
            .artists
            .push(entry.artist.unwrap_or_else(|| album_artist.to_string()));
    }
    count_matches(names, file_count, MetadataSource::InfoSheet)
}

/// Track names from a cuesheet's `TRACK` blocks
pub fn tracks_from_cuesheet(
    text: &str,
    album_artist: &str,
    file_count: usize,
) -> Resolution<TrackNames> {
    let mut names = TrackNames::default();
    for (i, track) in parse_tracks(text).into_iter().enumerate() {
        names
            .titles
            .push(track.title.unwrap_or_else(|| format!("Track {:02}", i + 1)));
        names
            .artists
            .push(track.performer.unwrap_or_else(|| album_artist.to_string()));
    }
    count_matches(names, file_count, MetadataSource::Cuesheet)
}

fn tracks_from_file_names(files: &[PathBuf], album_artist: &str) -> TrackNames {
    TrackNames {
        titles: files.iter().map(|f| title_from_file_name(f)).collect(),
        artists: vec![album_artist.to_string(); files.len()],
    }
}

/// Fill titles, artists and durations for `files`, in order.
///
/// A sheet whose track count disagrees with `files` is dropped entirely,
/// titles and artists alike, and file names take over. Durations always
/// come from the probe; a probe failure is fatal.
pub fn resolve_tracks(
    ctx: &mut DirectoryContext,
    files: &[PathBuf],
    options: &ResolverOptions,
    runner: &dyn ToolRunner,
    tools: &ToolSet,
) -> Result<()> {
    let album_artist = ctx
        .album
        .album_artist
        .clone()
        .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());

    let info_sheet = ctx.info_sheet_path.as_ref().filter(|_| options.use_info_sheet);
    let cuesheet = ctx.cuesheet_path.as_ref().filter(|_| options.use_cuesheet);

    let resolved = if let Some(path) = info_sheet {
        let text = read_sheet(path)?;
        tracks_from_info_sheet(&text, &album_artist, files.len()).into_accepted()
    } else if let Some(path) = cuesheet {
        let text = read_sheet(path)?;
        tracks_from_cuesheet(&text, &album_artist, files.len()).into_accepted()
    } else {
        None
    };

    let (names, source) = resolved.unwrap_or_else(|| {
        (
            tracks_from_file_names(files, &album_artist),
            MetadataSource::DirectoryName,
        )
    });

    let durations_ms = files
        .iter()
        .map(|file| probe_duration_ms(runner, tools, file))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    tracing::debug!(
        "{} tracks for {} (from {})",
        names.titles.len(),
        ctx.path.display(),
        source
    );

    ctx.tracks = TrackList {
        titles: names.titles,
        artists: names.artists,
        durations_ms,
    };
    ctx.track_metadata_source = source;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use external_tools::stub::StubRunner;
    use std::fs;
    use tempfile::TempDir;

    fn wavs(dir: &std::path::Path, count: usize) -> Vec<PathBuf> {
        (1..=count)
            .map(|i| dir.join(format!("{:02} Song {}.wav", i, i)))
            .collect()
    }

    #[test]
    fn guest_artist_overrides_album_artist() {
        let text = "Set 1\n1. Intro\n2. Duet [Guest]\nEnd\n";
        assert_matches!(tracks_from_info_sheet(text, "Band", 2), Resolution::Accepted { value, .. } => {
            assert_eq!(value.artists, ["Band", "Guest"]);
        });
    }

    #[test]
    fn count_mismatch_is_rejected() {
        let text = "Set 1\n1. Intro\nEnd\n";
        assert_matches!(
            tracks_from_info_sheet(text, "Band", 3),
            Resolution::Rejected { source: MetadataSource::InfoSheet, .. }
        );
    }

    #[test]
    fn cuesheet_track_without_title_is_numbered() {
        let text = "TRACK 01 AUDIO\n  TITLE \"A\"\nTRACK 02 AUDIO\n  PERFORMER \"Guest\"\n";
        assert_matches!(tracks_from_cuesheet(text, "Band", 2), Resolution::Accepted { value, .. } => {
            assert_eq!(value.titles, ["A", "Track 02"]);
            assert_eq!(value.artists, ["Band", "Guest"]);
        });
    }

    #[test]
    fn file_names_and_unknown_artist_without_sheets() {
        let root = TempDir::new().unwrap();
        let mut ctx = DirectoryContext::new(root.path().join("Something").join("16-44"));
        let files = wavs(&ctx.path, 2);
        let runner = StubRunner::new().respond("mediainfo", "1000");

        resolve_tracks(&mut ctx, &files, &ResolverOptions::default(), &runner, &ToolSet::new())
            .unwrap();

        assert_eq!(ctx.track_metadata_source, MetadataSource::DirectoryName);
        assert_eq!(ctx.tracks.titles, ["Song 1", "Song 2"]);
        assert_eq!(ctx.tracks.artists, [UNKNOWN_ARTIST, UNKNOWN_ARTIST]);
        assert_eq!(ctx.tracks.durations_ms, ["1000", "1000"]);
        assert_eq!(runner.calls_to("mediainfo").len(), 2);
    }

    #[test]
    fn info_sheet_mismatch_rolls_back_titles_and_artists() {
        let root = TempDir::new().unwrap();
        let mut ctx = DirectoryContext::new(root.path().join("Band 2024-03-15").join("16-44"));
        fs::create_dir_all(&ctx.path).unwrap();
        let sheet = ctx.path.join("info.txt");
        fs::write(&sheet, "Set 1\n1. A [Guest]\n2. B\nEnd\n").unwrap();
        ctx.info_sheet_path = Some(sheet);
        ctx.album.album_artist = Some("Band".to_string());
        let files = wavs(&ctx.path, 3);
        let runner = StubRunner::new().respond("mediainfo", "1000");

        resolve_tracks(&mut ctx, &files, &ResolverOptions::default(), &runner, &ToolSet::new())
            .unwrap();

        assert_eq!(ctx.track_metadata_source, MetadataSource::DirectoryName);
        assert_eq!(ctx.tracks.titles, ["Song 1", "Song 2", "Song 3"]);
        assert_eq!(ctx.tracks.artists, ["Band", "Band", "Band"]);
        assert!(ctx.tracks.is_complete(3));
    }

    #[test]
    fn cuesheet_mismatch_rolls_back_titles_and_artists() {
        let root = TempDir::new().unwrap();
        let mut ctx = DirectoryContext::new(root.path().join("Band 2024-03-15").join("16-44"));
        fs::create_dir_all(&ctx.path).unwrap();
        let cue = ctx.path.join("show.cue");
        fs::write(
            &cue,
            "PERFORMER \"Band\"\n\
             TRACK 01 AUDIO\n  TITLE \"A\"\n  PERFORMER \"Guest\"\n  INDEX 01 00:00:00\n\
             TRACK 02 AUDIO\n  TITLE \"B\"\n  INDEX 01 01:00:00\n",
        )
        .unwrap();
        ctx.cuesheet_path = Some(cue);
        ctx.album.album_artist = Some("Band".to_string());
        let files = wavs(&ctx.path, 3);
        let runner = StubRunner::new().respond("mediainfo", "1000");

        resolve_tracks(&mut ctx, &files, &ResolverOptions::default(), &runner, &ToolSet::new())
            .unwrap();

        assert_eq!(ctx.track_metadata_source, MetadataSource::DirectoryName);
        assert_eq!(ctx.tracks.titles, ["Song 1", "Song 2", "Song 3"]);
        assert_eq!(ctx.tracks.artists, ["Band", "Band", "Band"]);
        assert!(ctx.tracks.is_complete(3));
    }

    #[test]
    fn failing_probe_is_fatal() {
        let root = TempDir::new().unwrap();
        let mut ctx = DirectoryContext::new(root.path().join("x").join("16-44"));
        let files = wavs(&ctx.path, 1);
        let runner = StubRunner::new().respond("mediainfo", "");

        let result =
            resolve_tracks(&mut ctx, &files, &ResolverOptions::default(), &runner, &ToolSet::new());
        assert_matches!(result, Err(crate::MetadataError::Probe(_)));
    }
}
