use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static TRACK_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,3}(?:\s*[-_.]\s*|\s+)").expect("valid regex"));

/// Title implied by an audio file's name: the stem without its track number
pub fn title_from_file_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    match TRACK_NUMBER.find(&stem) {
        Some(m) if m.end() < stem.len() => stem[m.end()..].trim().to_string(),
        _ => stem,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("01 Opener.wav", "Opener")]
    #[case("02 - Second Song.flac", "Second Song")]
    #[case("03_Encore.wav", "Encore")]
    #[case("4.Jam.wav", "Jam")]
    #[case("Intro.wav", "Intro")]
    #[case("05.wav", "05")]
    #[case("1999.wav", "1999")]
    fn strips_track_numbers(#[case] file: &str, #[case] title: &str) {
        assert_eq!(title_from_file_name(Path::new(file)), title);
    }
}
