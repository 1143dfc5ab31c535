use crate::{Bitrate, Format};

/// Row selector for matrix operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatSelector {
    /// At least one format row must match
    Any,
    /// Every format row must match
    All,
    Only(Format),
}

/// Column selector for matrix operations.
///
/// `Any` and `All` never include [`Bitrate::Raw`]; it has to be named.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitrateSelector {
    Any,
    All,
    Only(Bitrate),
}

impl From<Format> for FormatSelector {
    fn from(format: Format) -> Self {
        FormatSelector::Only(format)
    }
}

impl From<Bitrate> for BitrateSelector {
    fn from(bitrate: Bitrate) -> Self {
        BitrateSelector::Only(bitrate)
    }
}

impl FormatSelector {
    fn formats(&self) -> Vec<Format> {
        match self {
            FormatSelector::Any | FormatSelector::All => Format::ALL.to_vec(),
            FormatSelector::Only(format) => vec![*format],
        }
    }

    fn requires_all(&self) -> bool {
        matches!(self, FormatSelector::All)
    }
}

impl BitrateSelector {
    fn bitrates(&self) -> Vec<Bitrate> {
        match self {
            BitrateSelector::Any | BitrateSelector::All => Bitrate::TRACKED.to_vec(),
            BitrateSelector::Only(bitrate) => vec![*bitrate],
        }
    }

    fn requires_all(&self) -> bool {
        matches!(self, BitrateSelector::All)
    }
}

/// Which (format, bitrate) combinations the current run operates on.
///
/// Cells are only ever set; a fresh matrix is the only way to clear them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatBitrateMatrix {
    cells: [[bool; Bitrate::COUNT]; Format::COUNT],
}

impl FormatBitrateMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one cell, or fan out over every cell a wildcard covers
    pub fn set(&mut self, format: impl Into<FormatSelector>, bitrate: impl Into<BitrateSelector>) {
        let bitrates = bitrate.into().bitrates();
        for f in format.into().formats() {
            for b in &bitrates {
                self.cells[f.index()][b.index()] = true;
            }
        }
    }

    /// Query with set semantics: `Any` needs one matching cell, `All` needs
    /// every cell in scope.
    pub fn is_set(
        &self,
        format: impl Into<FormatSelector>,
        bitrate: impl Into<BitrateSelector>,
    ) -> bool {
        let format = format.into();
        let bitrate = bitrate.into();
        let bitrates = bitrate.bitrates();

        let row_matches = |f: Format| {
            let mut cells = bitrates.iter().map(|b| self.cells[f.index()][b.index()]);
            if bitrate.requires_all() {
                cells.all(|set| set)
            } else {
                cells.any(|set| set)
            }
        };

        let formats = format.formats();
        if format.requires_all() {
            formats.into_iter().all(row_matches)
        } else {
            formats.into_iter().any(row_matches)
        }
    }

    /// True iff exactly one real bitrate is selected for `format`
    pub fn is_unique_bitrate(&self, format: Format) -> bool {
        self.bitrates_set(format).count() == 1
    }

    /// True iff exactly one format is selected for `bitrate`
    pub fn is_unique_format(&self, bitrate: Bitrate) -> bool {
        self.formats_set(bitrate).count() == 1
    }

    pub fn first_bitrate_set(&self, format: Format) -> Option<Bitrate> {
        self.bitrates_set(format).next()
    }

    /// Real bitrates selected in a format row, in lookup order
    pub fn bitrates_set(&self, format: Format) -> impl Iterator<Item = Bitrate> + '_ {
        Bitrate::TRACKED
            .into_iter()
            .filter(move |b| self.cells[format.index()][b.index()])
    }

    /// Formats selected in a bitrate column, in lookup order
    pub fn formats_set(&self, bitrate: Bitrate) -> impl Iterator<Item = Format> + '_ {
        Format::ALL
            .into_iter()
            .filter(move |f| self.cells[f.index()][bitrate.index()])
    }

    /// True when no cell at all is set, `Raw` included
    pub fn is_empty(&self) -> bool {
        self.cells.iter().flatten().all(|set| !set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn new_matrix_is_empty() {
        let matrix = FormatBitrateMatrix::new();
        assert!(matrix.is_empty());
        assert!(!matrix.is_set(FormatSelector::Any, BitrateSelector::Any));
    }

    #[rstest]
    #[case(Format::Flac, Bitrate::B16_44)]
    #[case(Format::Wav, Bitrate::B24_96)]
    #[case(Format::Mp3, Bitrate::Raw)]
    fn set_touches_exactly_one_cell(#[case] format: Format, #[case] bitrate: Bitrate) {
        let mut matrix = FormatBitrateMatrix::new();
        matrix.set(format, bitrate);

        assert!(matrix.is_set(format, bitrate));
        for f in Format::ALL {
            for b in Bitrate::ALL {
                if (f, b) != (format, bitrate) {
                    assert!(!matrix.is_set(f, b), "{f}/{b} should be unset");
                }
            }
        }
    }

    #[test]
    fn unique_bitrate_flips_on_second_cell() {
        let mut matrix = FormatBitrateMatrix::new();
        matrix.set(Format::Wav, Bitrate::B16_44);
        assert!(matrix.is_unique_bitrate(Format::Wav));

        matrix.set(Format::Wav, Bitrate::B24_96);
        assert!(!matrix.is_unique_bitrate(Format::Wav));
    }

    #[test]
    fn raw_never_counts_towards_uniqueness() {
        let mut matrix = FormatBitrateMatrix::new();
        matrix.set(Format::Flac, Bitrate::Raw);
        assert!(!matrix.is_unique_bitrate(Format::Flac));

        matrix.set(Format::Flac, Bitrate::B24_48);
        assert!(matrix.is_unique_bitrate(Format::Flac));
        assert_eq!(matrix.first_bitrate_set(Format::Flac), Some(Bitrate::B24_48));
    }

    #[test]
    fn raw_is_invisible_to_wildcards() {
        let mut matrix = FormatBitrateMatrix::new();
        matrix.set(Format::Flac, Bitrate::Raw);

        assert!(!matrix.is_set(Format::Flac, BitrateSelector::Any));
        assert!(!matrix.is_set(FormatSelector::Any, BitrateSelector::Any));
        assert!(matrix.is_set(FormatSelector::Any, Bitrate::Raw));
        assert!(!matrix.is_empty());
    }

    #[test]
    fn wildcard_set_fans_out_without_raw() {
        let mut matrix = FormatBitrateMatrix::new();
        matrix.set(Format::Shn, BitrateSelector::All);

        assert!(matrix.is_set(Format::Shn, BitrateSelector::All));
        assert!(!matrix.is_set(Format::Shn, Bitrate::Raw));
        assert!(!matrix.is_set(FormatSelector::All, BitrateSelector::Any));
        assert_eq!(matrix.bitrates_set(Format::Shn).count(), Bitrate::TRACKED.len());
    }

    #[test]
    fn all_requires_every_cell_in_scope() {
        let mut matrix = FormatBitrateMatrix::new();
        for bitrate in &Bitrate::TRACKED[..5] {
            matrix.set(Format::Flac, *bitrate);
        }
        assert!(!matrix.is_set(Format::Flac, BitrateSelector::All));
        assert!(matrix.is_set(Format::Flac, BitrateSelector::Any));

        matrix.set(Format::Flac, Bitrate::B24_96);
        assert!(matrix.is_set(Format::Flac, BitrateSelector::All));
    }

    #[test]
    fn all_formats_for_one_bitrate() {
        let mut matrix = FormatBitrateMatrix::new();
        matrix.set(FormatSelector::All, Bitrate::B16_44);

        assert!(matrix.is_set(FormatSelector::All, Bitrate::B16_44));
        assert!(!matrix.is_unique_format(Bitrate::B16_44));
        assert!(!matrix.is_set(FormatSelector::Any, Bitrate::B16_48));
    }

    #[test]
    fn unique_format_counts_one_column() {
        let mut matrix = FormatBitrateMatrix::new();
        matrix.set(Format::WavPack, Bitrate::B24_96);
        matrix.set(Format::Flac, Bitrate::B16_44);

        assert!(matrix.is_unique_format(Bitrate::B24_96));
        assert!(matrix.is_unique_format(Bitrate::B16_44));
        assert!(!matrix.is_unique_format(Bitrate::B24_48));
    }

    #[test]
    fn first_bitrate_follows_lookup_order() {
        let mut matrix = FormatBitrateMatrix::new();
        matrix.set(Format::Wav, Bitrate::B24_96);
        matrix.set(Format::Wav, Bitrate::B16_48);

        assert_eq!(matrix.first_bitrate_set(Format::Wav), Some(Bitrate::B16_48));
        assert_eq!(matrix.first_bitrate_set(Format::Mp3), None);
    }
}
