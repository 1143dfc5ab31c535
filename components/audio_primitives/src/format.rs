use crate::ParseError;
use std::{fmt, str::FromStr};

/// Audio container formats handled by the archive.
///
/// `Wav` is the uncompressed sentinel: it has a matrix row like every other
/// format but never names a compressed directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Format {
    Flac = 0,
    Shn = 1,
    WavPack = 2,
    Mp3 = 3,
    Wav = 4,
}

impl Format {
    /// Every format in lookup order, `Wav` last
    pub const ALL: [Format; 5] = [
        Format::Flac,
        Format::Shn,
        Format::WavPack,
        Format::Mp3,
        Format::Wav,
    ];

    /// Formats that have a compressed directory of their own
    pub const COMPRESSED: [Format; 4] = [Format::Flac, Format::Shn, Format::WavPack, Format::Mp3];

    pub const COUNT: usize = Self::ALL.len();

    /// Short name used on the command line and for substring matching
    pub fn name(&self) -> &'static str {
        match self {
            Format::Flac => "flac",
            Format::Shn => "shn",
            Format::WavPack => "wv",
            Format::Mp3 => "mp3",
            Format::Wav => "wav",
        }
    }

    /// Extension carried by directories holding this format, if any
    pub fn dir_extension(&self) -> Option<&'static str> {
        match self {
            Format::Wav => None,
            other => Some(other.name()),
        }
    }

    /// Extension of the individual audio files
    pub fn file_extension(&self) -> &'static str {
        self.name()
    }

    pub fn is_compressed(&self) -> bool {
        !matches!(self, Format::Wav)
    }

    /// Guess the format of a file from its extension (case-insensitive)
    pub fn from_file_extension(ext: &str) -> Option<Format> {
        let ext = ext.to_ascii_lowercase();
        Self::ALL.into_iter().find(|f| f.file_extension() == ext)
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl FromStr for Format {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flac" => Ok(Format::Flac),
            "shn" | "shorten" => Ok(Format::Shn),
            "wv" | "wavpack" => Ok(Format::WavPack),
            "mp3" => Ok(Format::Mp3),
            "wav" => Ok(Format::Wav),
            _ => Err(ParseError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn wav_is_the_trailing_sentinel() {
        assert_eq!(Format::ALL.last(), Some(&Format::Wav));
        assert_eq!(Format::Wav.dir_extension(), None);
        assert!(!Format::COMPRESSED.contains(&Format::Wav));
    }

    #[test]
    fn compressed_formats_are_index_aligned() {
        for (i, format) in Format::COMPRESSED.iter().enumerate() {
            assert_eq!(format.index(), i);
            assert_eq!(format.dir_extension(), Some(format.name()));
        }
    }

    #[test]
    fn parse_accepts_aliases() {
        assert_eq!("FLAC".parse::<Format>().unwrap(), Format::Flac);
        assert_eq!("wavpack".parse::<Format>().unwrap(), Format::WavPack);
        assert_eq!("shorten".parse::<Format>().unwrap(), Format::Shn);
        assert_matches!("ogg".parse::<Format>(), Err(ParseError::UnknownFormat(_)));
    }

    #[test]
    fn file_extension_lookup() {
        assert_eq!(Format::from_file_extension("WV"), Some(Format::WavPack));
        assert_eq!(Format::from_file_extension("wav"), Some(Format::Wav));
        assert_eq!(Format::from_file_extension("txt"), None);
    }
}
