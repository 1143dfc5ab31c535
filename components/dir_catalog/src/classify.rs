use crate::naming::split_extension;
use audio_primitives::{Bitrate, Format};

/// Functional role of a directory in the archive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirType {
    /// Unedited captures, the `Raw` directory
    RawAudio,
    /// Per-track WAV files under a bitrate-named directory
    TrackedAudio,
    /// Output of one compression format, e.g. `16-44.flac`
    CompressedAudio,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub dir_type: DirType,
    pub bitrate: Option<Bitrate>,
    pub format: Option<Format>,
}

impl Classification {
    fn other() -> Self {
        Self {
            dir_type: DirType::Other,
            bitrate: None,
            format: None,
        }
    }
}

/// Compressed format whose directory extension occurs in `extension`
pub fn compressed_format_for(extension: &str) -> Option<Format> {
    Format::COMPRESSED.into_iter().find(|format| {
        format
            .dir_extension()
            .is_some_and(|dir_ext| extension.contains(dir_ext))
    })
}

/// First bitrate whose name occurs in `base_name`
pub fn bitrate_in(base_name: &str, candidates: &[Bitrate]) -> Option<Bitrate> {
    candidates
        .iter()
        .copied()
        .find(|bitrate| base_name.contains(bitrate.name()))
}

/// Derive a directory's role from its name alone.
///
/// First match wins: the exact `Raw` name, then a bitrate name on a directory
/// without a compressed extension, then a compressed extension. Names are
/// matched by substring since directories carry decorations.
pub fn classify(name: &str) -> Classification {
    if name == Bitrate::Raw.name() {
        return Classification {
            dir_type: DirType::RawAudio,
            bitrate: Some(Bitrate::Raw),
            format: Some(Format::Wav),
        };
    }

    let (base_name, extension) = split_extension(name);
    let compressed = extension.and_then(compressed_format_for);

    if compressed.is_none() {
        if let Some(bitrate) = bitrate_in(name, &Bitrate::TRACKED) {
            return Classification {
                dir_type: DirType::TrackedAudio,
                bitrate: Some(bitrate),
                format: Some(Format::Wav),
            };
        }
    }

    match compressed {
        Some(format) => Classification {
            dir_type: DirType::CompressedAudio,
            bitrate: bitrate_in(base_name, &Bitrate::ALL),
            format: Some(format),
        },
        None => Classification::other(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn raw_name_is_raw_audio() {
        let class = classify("Raw");
        assert_eq!(class.dir_type, DirType::RawAudio);
        assert_eq!(class.bitrate, Some(Bitrate::Raw));
    }

    #[rstest]
    #[case("16-44", Bitrate::B16_44)]
    #[case("24-96", Bitrate::B24_96)]
    #[case("24-48 edited", Bitrate::B24_48)]
    fn bitrate_names_are_tracked(#[case] name: &str, #[case] bitrate: Bitrate) {
        let class = classify(name);
        assert_eq!(class.dir_type, DirType::TrackedAudio);
        assert_eq!(class.bitrate, Some(bitrate));
        assert_eq!(class.format, Some(Format::Wav));
    }

    #[rstest]
    #[case("16-44.flac", Format::Flac, Some(Bitrate::B16_44))]
    #[case("24-96.shn", Format::Shn, Some(Bitrate::B24_96))]
    #[case("16-48.wv", Format::WavPack, Some(Bitrate::B16_48))]
    #[case("Raw.mp3", Format::Mp3, Some(Bitrate::Raw))]
    #[case("Mixdown.flac8", Format::Flac, None)]
    fn compressed_extensions(
        #[case] name: &str,
        #[case] format: Format,
        #[case] bitrate: Option<Bitrate>,
    ) {
        let class = classify(name);
        assert_eq!(class.dir_type, DirType::CompressedAudio);
        assert_eq!(class.format, Some(format));
        assert_eq!(class.bitrate, bitrate);
    }

    #[rstest]
    #[case("Artwork")]
    #[case("raw")]
    #[case("Phish 2024-03-15 Main Stage")]
    #[case("notes.txt")]
    fn everything_else_is_other(#[case] name: &str) {
        assert_eq!(classify(name), Classification::other());
    }
}
