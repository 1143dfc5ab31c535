use dir_catalog::MetadataSource;

/// Which on-disk sources resolution may consult
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverOptions {
    pub use_info_sheet: bool,
    pub use_cuesheet: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            use_info_sheet: true,
            use_cuesheet: true,
        }
    }
}

/// Outcome of asking one source for metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<T> {
    Accepted { value: T, source: MetadataSource },
    Rejected { source: MetadataSource, reason: String },
}

impl<T> Resolution<T> {
    pub fn accepted(value: T, source: MetadataSource) -> Self {
        Resolution::Accepted { value, source }
    }

    pub fn rejected(source: MetadataSource, reason: impl Into<String>) -> Self {
        Resolution::Rejected {
            source,
            reason: reason.into(),
        }
    }

    pub fn source(&self) -> MetadataSource {
        match self {
            Resolution::Accepted { source, .. } | Resolution::Rejected { source, .. } => *source,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Resolution::Accepted { .. })
    }

    /// The accepted value, logging why it was turned down otherwise
    pub fn into_accepted(self) -> Option<(T, MetadataSource)> {
        match self {
            Resolution::Accepted { value, source } => Some((value, source)),
            Resolution::Rejected { source, reason } => {
                tracing::warn!("Ignoring {}: {}", source, reason);
                None
            }
        }
    }
}
