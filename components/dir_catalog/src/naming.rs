//! Parsing of directory names into the parts metadata resolution needs.
//!
//! Album directories look like `03 - Artist 2024-03-15 Main Stage` (live) or
//! `Artist - Album` (commercial). Anything else is kept whole as the album.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

static ORDINAL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,3}(?:[.)]\s*|\s+)(?:-\s*)?").expect("valid regex"));

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").expect("valid regex"));

const SEPARATOR_CHARS: &[char] = &[' ', '\t', '-', '_'];

/// What kind of recording an album directory holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingType {
    Live,
    Commercial,
    Other,
}

/// The pieces of an album directory name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumName {
    pub recording_type: RecordingType,
    pub artist: Option<String>,
    pub album: String,
    /// Normalized `yyyy-mm-dd`
    pub date: Option<String>,
    pub stage: Option<String>,
}

/// Split a directory name at its last `.` into base name and extension
pub fn split_extension(name: &str) -> (&str, Option<&str>) {
    match name.rfind('.') {
        Some(pos) if pos > 0 && pos + 1 < name.len() => (&name[..pos], Some(&name[pos + 1..])),
        _ => (name, None),
    }
}

/// Drop a leading ordinal such as `01 `, `2. ` or `03 - `
pub fn strip_ordinal_prefix(name: &str) -> &str {
    match ORDINAL_PREFIX.find(name) {
        Some(m) if m.end() < name.len() => &name[m.end()..],
        _ => name,
    }
}

/// Find the first valid calendar date in `text`, normalized to `yyyy-mm-dd`
pub fn find_iso_date(text: &str) -> Option<String> {
    ISO_DATE
        .find_iter(text)
        .find_map(|m| NaiveDate::parse_from_str(m.as_str(), "%Y-%m-%d").ok())
        .map(|date| date.format("%Y-%m-%d").to_string())
}

/// Replace characters that are unsafe in file names
pub fn sanitize_key(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}

/// Strip surrounding quotes and whitespace from an album title
pub fn clean_album(album: &str) -> String {
    album
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim()
        .to_string()
}

fn trim_separators(text: &str) -> Option<String> {
    let trimmed = text.trim_matches(SEPARATOR_CHARS);
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Parse an album directory's name, ignoring any ordinal prefix
pub fn parse_album_name(name: &str) -> AlbumName {
    let cleaned = strip_ordinal_prefix(name.trim());

    if let Some(m) = ISO_DATE.find_iter(cleaned).find(|m| {
        NaiveDate::parse_from_str(m.as_str(), "%Y-%m-%d").is_ok()
    }) {
        let date = m.as_str().to_string();
        let artist = trim_separators(&cleaned[..m.start()]);
        let stage = trim_separators(&cleaned[m.end()..]);
        let album = match &stage {
            Some(stage) => format!("{} {}", date, stage),
            None => date.clone(),
        };
        return AlbumName {
            recording_type: RecordingType::Live,
            artist,
            album: clean_album(&album),
            date: Some(date),
            stage,
        };
    }

    if let Some((artist, album)) = cleaned.split_once(" - ") {
        return AlbumName {
            recording_type: RecordingType::Commercial,
            artist: trim_separators(artist),
            album: clean_album(album),
            date: None,
            stage: None,
        };
    }

    AlbumName {
        recording_type: RecordingType::Other,
        artist: None,
        album: clean_album(cleaned),
        date: None,
        stage: None,
    }
}
