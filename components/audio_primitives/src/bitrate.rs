use crate::ParseError;
use std::{fmt, str::FromStr};

/// Bit depth / sample rate pairs a tracked WAV set can be stored at.
///
/// `Raw` is a pseudo-bitrate for unedited captures. It is the last slot and
/// is left out of every wildcard query on [`crate::FormatBitrateMatrix`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Bitrate {
    B16_44 = 0,
    B16_48 = 1,
    B24_44 = 2,
    B24_48 = 3,
    B24_88 = 4,
    B24_96 = 5,
    Raw = 6,
}

impl Bitrate {
    /// Every bitrate in lookup order, `Raw` last
    pub const ALL: [Bitrate; 7] = [
        Bitrate::B16_44,
        Bitrate::B16_48,
        Bitrate::B24_44,
        Bitrate::B24_48,
        Bitrate::B24_88,
        Bitrate::B24_96,
        Bitrate::Raw,
    ];

    /// Real bitrates, the scope of wildcard queries
    pub const TRACKED: [Bitrate; 6] = [
        Bitrate::B16_44,
        Bitrate::B16_48,
        Bitrate::B24_44,
        Bitrate::B24_48,
        Bitrate::B24_88,
        Bitrate::B24_96,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Directory name for this bitrate
    pub fn name(&self) -> &'static str {
        match self {
            Bitrate::B16_44 => "16-44",
            Bitrate::B16_48 => "16-48",
            Bitrate::B24_44 => "24-44",
            Bitrate::B24_48 => "24-48",
            Bitrate::B24_88 => "24-88",
            Bitrate::B24_96 => "24-96",
            Bitrate::Raw => "Raw",
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, Bitrate::Raw)
    }

    pub fn bit_depth(&self) -> Option<u8> {
        match self {
            Bitrate::B16_44 | Bitrate::B16_48 => Some(16),
            Bitrate::Raw => None,
            _ => Some(24),
        }
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> Option<u32> {
        match self {
            Bitrate::B16_44 | Bitrate::B24_44 => Some(44_100),
            Bitrate::B16_48 | Bitrate::B24_48 => Some(48_000),
            Bitrate::B24_88 => Some(88_200),
            Bitrate::B24_96 => Some(96_000),
            Bitrate::Raw => None,
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl FromStr for Bitrate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseError::UnknownBitrate(s.to_string()))
    }
}

impl fmt::Display for Bitrate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("16-44", Bitrate::B16_44)]
    #[case("24-96", Bitrate::B24_96)]
    #[case("raw", Bitrate::Raw)]
    #[case(" 24-88 ", Bitrate::B24_88)]
    fn parse_names(#[case] input: &str, #[case] expected: Bitrate) {
        assert_eq!(input.parse::<Bitrate>().unwrap(), expected);
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert_eq!(
            "32-192".parse::<Bitrate>(),
            Err(ParseError::UnknownBitrate("32-192".to_string()))
        );
    }

    #[test]
    fn raw_has_no_audio_properties() {
        assert_eq!(Bitrate::Raw.bit_depth(), None);
        assert_eq!(Bitrate::Raw.sample_rate(), None);
        assert_eq!(Bitrate::B24_88.sample_rate(), Some(88_200));
        assert_eq!(Bitrate::B16_48.bit_depth(), Some(16));
    }

    #[test]
    fn no_bitrate_name_contains_another() {
        for a in Bitrate::ALL {
            for b in Bitrate::ALL {
                if a != b {
                    assert!(!a.name().contains(b.name()), "{a} contains {b}");
                }
            }
        }
    }
}
