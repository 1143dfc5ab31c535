//! Plain-text info sheets as traded alongside live recordings.
//!
//! The header is either positional:
//!
//! ```text
//! Artist
//! Venue
//! City, Country
//! 2024-03-15
//! ```
//!
//! (or five lines with event and stage in place of the venue), or a set of
//! `LABEL value` lines. A set list of numbered lines follows, optionally
//! introduced by a `Set`, `Track` or `Disc` line and closed by `End`.

use cuesheet::find_label;
use dir_catalog::naming::find_iso_date;
use dir_catalog::{AlbumInfo, RecordingType};
use regex::Regex;
use std::sync::LazyLock;

/// Where the set list starts when no marker line says so
const DEFAULT_SET_LIST_LINE: usize = 6;

static SET_LIST_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(Set|Track|Disc)").expect("valid regex"));

static SET_LIST_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^End\b").expect("valid regex"));

static TRACK_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d{1,2}(?:\.\s*|\s+)").expect("valid regex"));

static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("valid regex"));

static ARTIST_OVERRIDE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]").expect("valid regex"));

/// One numbered line of a set list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetListEntry {
    pub title: String,
    /// Set by a `[Guest Artist]` note on the line
    pub artist: Option<String>,
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Album fields an info sheet states, without judging whether they suffice
pub fn parse_header(text: &str, recording_type: RecordingType) -> AlbumInfo {
    match recording_type {
        RecordingType::Live => positional_header(text).unwrap_or_else(|| labelled_header(text)),
        RecordingType::Commercial | RecordingType::Other => AlbumInfo {
            album_artist: find_label(text, "PERFORMER"),
            album: find_label(text, "TITLE"),
            ..AlbumInfo::default()
        },
    }
}

fn positional_header(text: &str) -> Option<AlbumInfo> {
    let lines: Vec<&str> = text.lines().map(str::trim).take(5).collect();

    if let Some(date) = lines.get(3).and_then(|line| find_iso_date(line)) {
        return Some(AlbumInfo {
            album_artist: non_empty(lines[0]),
            venue: non_empty(lines[1]),
            location: non_empty(lines[2]),
            concert_date: Some(date),
            ..AlbumInfo::default()
        });
    }

    let date = lines.get(4).and_then(|line| find_iso_date(line))?;
    Some(AlbumInfo {
        album_artist: non_empty(lines[0]),
        event: non_empty(lines[1]),
        stage: non_empty(lines[2]),
        location: non_empty(lines[3]),
        concert_date: Some(date),
        ..AlbumInfo::default()
    })
}

/// `PERFORMER`, `TITLE`, `EVENT`, `VENUE`, `STAGE`, `LOCATION` and `DATE`
/// labels anywhere in `text`
pub(crate) fn labelled_header(text: &str) -> AlbumInfo {
    AlbumInfo {
        album_artist: find_label(text, "PERFORMER"),
        album: find_label(text, "TITLE"),
        event: find_label(text, "EVENT"),
        venue: find_label(text, "VENUE"),
        stage: find_label(text, "STAGE"),
        location: find_label(text, "LOCATION"),
        concert_date: find_label(text, "DATE").and_then(|date| find_iso_date(&date)),
    }
}

/// The numbered lines of the set list, in order.
///
/// Parenthesized comments are dropped, a bracketed note names the track's
/// artist, and trailing footnote marks are trimmed. A line left with no
/// title becomes `Track NN` after its position.
pub fn parse_set_list(text: &str) -> Vec<SetListEntry> {
    let lines: Vec<&str> = text.lines().collect();

    let start = lines
        .iter()
        .position(|line| SET_LIST_START.is_match(line))
        .unwrap_or(DEFAULT_SET_LIST_LINE)
        .min(lines.len());
    let end = lines[start..]
        .iter()
        .position(|line| SET_LIST_END.is_match(line))
        .map_or(lines.len(), |offset| start + offset);

    let mut entries = Vec::new();
    for line in &lines[start..end] {
        let Some(prefix) = TRACK_PREFIX.find(line) else {
            continue;
        };
        entries.push(entry_from(&line[prefix.end()..], entries.len() + 1));
    }
    entries
}

fn entry_from(rest: &str, number: usize) -> SetListEntry {
    let rest = COMMENT.replace_all(rest, "");

    let artist = ARTIST_OVERRIDE
        .captures(&rest)
        .and_then(|caps| non_empty(&caps[1]));
    let rest = ARTIST_OVERRIDE.replace_all(&rest, "");

    let title = rest
        .trim_start_matches(|c: char| c.is_whitespace() || c == '-')
        .trim_end_matches(|c: char| !c.is_alphanumeric());

    let title = if title.is_empty() {
        format!("Track {:02}", number)
    } else {
        title.to_string()
    };

    SetListEntry { title, artist }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const FOUR_LINE: &str = "The Band\nThe Fillmore\nSan Francisco, CA\n2024-03-15\n\nSource: AUD\n\
                             Set 1\n01. Opener\n02. Second Song\nEnd\n";

    #[test]
    fn four_line_header() {
        let info = parse_header(FOUR_LINE, RecordingType::Live);
        assert_eq!(info.album_artist.as_deref(), Some("The Band"));
        assert_eq!(info.venue.as_deref(), Some("The Fillmore"));
        assert_eq!(info.location.as_deref(), Some("San Francisco, CA"));
        assert_eq!(info.concert_date.as_deref(), Some("2024-03-15"));
        assert_eq!(info.album, None);
    }

    #[test]
    fn five_line_header() {
        let text = "The Band\nSummer Fest\nMain Stage\nRoskilde, DK\n2023-07-01\n";
        let info = parse_header(text, RecordingType::Live);
        assert_eq!(info.event.as_deref(), Some("Summer Fest"));
        assert_eq!(info.stage.as_deref(), Some("Main Stage"));
        assert_eq!(info.location.as_deref(), Some("Roskilde, DK"));
        assert_eq!(info.concert_date.as_deref(), Some("2023-07-01"));
        assert_eq!(info.venue, None);
    }

    #[test]
    fn labels_when_no_positional_date() {
        let text = "Some notes\nPERFORMER \"The Band\"\nVENUE Paradiso\nDATE 2022-11-05\n";
        let info = parse_header(text, RecordingType::Live);
        assert_eq!(info.album_artist.as_deref(), Some("The Band"));
        assert_eq!(info.venue.as_deref(), Some("Paradiso"));
        assert_eq!(info.concert_date.as_deref(), Some("2022-11-05"));
    }

    #[test]
    fn invalid_label_date_is_dropped() {
        let text = "PERFORMER X\nDATE 2022-02-30\n";
        assert_eq!(parse_header(text, RecordingType::Live).concert_date, None);
    }

    #[test]
    fn commercial_reads_only_performer_and_title() {
        let text = "PERFORMER Miles Davis\nTITLE Kind of Blue\nDATE 1959-08-17\n";
        let info = parse_header(text, RecordingType::Commercial);
        assert_eq!(info.album_artist.as_deref(), Some("Miles Davis"));
        assert_eq!(info.album.as_deref(), Some("Kind of Blue"));
        assert_eq!(info.concert_date, None);
    }

    #[test]
    fn set_list_between_marker_and_end() {
        let entries = parse_set_list(FOUR_LINE);
        let titles: Vec<_> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["Opener", "Second Song"]);
    }

    #[test]
    fn set_list_defaults_to_line_six() {
        let text = "a\nb\nc\n2024-01-01\n\n\n1 First\n2 Second\n3 Third";
        assert_eq!(parse_set_list(text).len(), 3);
    }

    #[test]
    fn numbered_lines_in_the_header_are_skipped_without_marker() {
        let text = "1 a\n2 b\n3 c\n4 d\n5 e\n6 f\n7 g\n";
        let titles: Vec<_> = parse_set_list(text).into_iter().map(|e| e.title).collect();
        assert_eq!(titles, ["g"]);
    }

    #[rstest]
    #[case("01. Tweezer (jam) *", "Tweezer", None)]
    #[case("2 Harry Hood [Trey Anastasio]", "Harry Hood", Some("Trey Anastasio"))]
    #[case("3. - Down With Disease ->", "Down With Disease", None)]
    #[case("04 (tuning)", "Track 01", None)]
    #[case("12.Walls of the Cave", "Walls of the Cave", None)]
    fn set_list_line(#[case] line: &str, #[case] title: &str, #[case] artist: Option<&str>) {
        let text = format!("Set 1\n{}\nEnd", line);
        let entries = parse_set_list(&text);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, title);
        assert_eq!(entries[0].artist.as_deref(), artist);
    }

    #[test]
    fn running_counter_names_untitled_tracks() {
        let text = "Set 1\n01 One\n02 (banter)\n03 Three\nEnd";
        let titles: Vec<_> = parse_set_list(text).into_iter().map(|e| e.title).collect();
        assert_eq!(titles, ["One", "Track 02", "Three"]);
    }

    #[rstest]
    #[case("100 Years")]
    #[case("12:30 intro")]
    #[case("Encore:")]
    fn non_track_lines_are_ignored(#[case] line: &str) {
        let text = format!("Set 1\n{}\nEnd", line);
        assert!(parse_set_list(&text).is_empty());
    }
}
