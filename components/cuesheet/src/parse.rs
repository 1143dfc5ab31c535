//! Reading `LABEL value` lines and `TRACK` blocks.
//!
//! The same line grammar serves cuesheets and the label form of info sheets,
//! so label lookup works on any text.

use regex::Regex;
use std::sync::LazyLock;

static TRACK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*TRACK\s+(\d+)\s+AUDIO\b").expect("valid regex"));

/// One track as read from a cuesheet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CueTrack {
    pub number: u32,
    pub title: Option<String>,
    pub performer: Option<String>,
}

/// Remove whitespace and one pair of surrounding double quotes
pub fn unquote(value: &str) -> &str {
    let value = value.trim();
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
        .trim()
}

/// Value of `LABEL value` (optionally behind `REM`) on one line.
///
/// Labels are case-sensitive. An empty value counts as absent.
pub fn label_value<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let mut rest = line.trim_start();
    if let Some(after) = rest.strip_prefix("REM") {
        if after.starts_with(char::is_whitespace) {
            rest = after.trim_start();
        }
    }

    let after = rest.strip_prefix(label)?;
    if !after.starts_with(char::is_whitespace) {
        return None;
    }

    let value = unquote(after);
    (!value.is_empty()).then_some(value)
}

/// First value given for `label` anywhere in `text`
pub fn find_label(text: &str, label: &str) -> Option<String> {
    text.lines()
        .find_map(|line| label_value(line, label))
        .map(str::to_string)
}

fn track_number(line: &str) -> Option<u32> {
    TRACK_LINE
        .captures(line)
        .and_then(|caps| caps[1].parse().ok())
}

/// The part of a cuesheet before its first `TRACK` line
pub fn header(text: &str) -> String {
    text.lines()
        .take_while(|line| track_number(line).is_none())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Collect the `TITLE` and `PERFORMER` of every `TRACK NN AUDIO` block.
///
/// The first value of each wins; repeats inside one block are logged and
/// ignored. A block is committed when the next one starts or the text ends.
pub fn parse_tracks(text: &str) -> Vec<CueTrack> {
    let mut tracks = Vec::new();
    let mut current: Option<CueTrack> = None;

    for line in text.lines() {
        if let Some(number) = track_number(line) {
            if let Some(done) = current.take() {
                tracks.push(done);
            }
            current = Some(CueTrack {
                number,
                ..CueTrack::default()
            });
            continue;
        }

        let Some(track) = current.as_mut() else {
            continue;
        };

        if let Some(title) = label_value(line, "TITLE") {
            if track.title.is_some() {
                tracing::warn!("Track {} has a second TITLE, ignoring \"{}\"", track.number, title);
            } else {
                track.title = Some(title.to_string());
            }
        } else if let Some(performer) = label_value(line, "PERFORMER") {
            if track.performer.is_some() {
                tracing::warn!(
                    "Track {} has a second PERFORMER, ignoring \"{}\"",
                    track.number,
                    performer
                );
            } else {
                track.performer = Some(performer.to_string());
            }
        }
    }

    if let Some(done) = current {
        tracks.push(done);
    }

    tracks
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const SAMPLE: &str = r#"REM GENRE Rock
PERFORMER "The Band"
TITLE "Live at the Hall"
REM DATE 1999-12-31
FILE "show.wav" WAVE
  TRACK 01 AUDIO
    TITLE "Opener"
    PERFORMER "Guest"
    INDEX 01 00:00:00
  TRACK 02 AUDIO
    TITLE "Second"
    TITLE "Duplicate"
    INDEX 01 04:12:30
  TRACK 03 AUDIO
    INDEX 01 09:00:00
"#;

    #[rstest]
    #[case("PERFORMER \"A B\"", "PERFORMER", Some("A B"))]
    #[case("  TITLE Plain words ", "TITLE", Some("Plain words"))]
    #[case("REM DATE 2024-03-15", "DATE", Some("2024-03-15"))]
    #[case("TITLE \"\"", "TITLE", None)]
    #[case("TITLES are here", "TITLE", None)]
    #[case("title lowercase", "TITLE", None)]
    #[case("REMARK TITLE x", "TITLE", None)]
    fn single_line_labels(#[case] line: &str, #[case] label: &str, #[case] expected: Option<&str>) {
        assert_eq!(label_value(line, label), expected);
    }

    #[test]
    fn find_label_takes_first_occurrence() {
        assert_eq!(find_label(SAMPLE, "TITLE").as_deref(), Some("Live at the Hall"));
        assert_eq!(find_label(SAMPLE, "DATE").as_deref(), Some("1999-12-31"));
        assert_eq!(find_label(SAMPLE, "VENUE"), None);
    }

    #[test]
    fn header_stops_at_first_track() {
        let head = header(SAMPLE);
        assert!(head.contains("FILE \"show.wav\" WAVE"));
        assert!(!head.contains("Opener"));
    }

    #[test]
    fn tracks_keep_first_title_and_performer() {
        let tracks = parse_tracks(SAMPLE);
        assert_eq!(tracks.len(), 3);

        assert_eq!(tracks[0].number, 1);
        assert_eq!(tracks[0].title.as_deref(), Some("Opener"));
        assert_eq!(tracks[0].performer.as_deref(), Some("Guest"));

        assert_eq!(tracks[1].title.as_deref(), Some("Second"));
        assert_eq!(tracks[1].performer, None);

        assert_eq!(tracks[2].title, None);
    }

    #[test]
    fn text_without_tracks_has_none() {
        assert!(parse_tracks("PERFORMER x\nTITLE y\n").is_empty());
    }
}
