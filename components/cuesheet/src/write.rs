use crate::timecode::{index_timecodes, CueTimecode};
use crate::CuesheetError;
use std::fmt::Write;

/// Album-level lines written at the top of a cuesheet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CueHeader {
    pub performer: Option<String>,
    pub title: Option<String>,
    pub event: Option<String>,
    pub venue: Option<String>,
    pub stage: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>,
}

impl CueHeader {
    fn labels(&self) -> [(&'static str, Option<&str>); 7] {
        [
            ("PERFORMER", self.performer.as_deref()),
            ("TITLE", self.title.as_deref()),
            ("EVENT", self.event.as_deref()),
            ("VENUE", self.venue.as_deref()),
            ("STAGE", self.stage.as_deref()),
            ("LOCATION", self.location.as_deref()),
            ("DATE", self.date.as_deref()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CueEntry {
    pub title: String,
    pub performer: String,
    pub index: CueTimecode,
}

/// A complete single-file cuesheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CueSheet {
    pub file_name: String,
    pub header: CueHeader,
    pub entries: Vec<CueEntry>,
}

/// Quotes would end the value early; keep the sheet parseable
fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "'"))
}

impl CueSheet {
    /// Lay out index-aligned track lists as one cuesheet.
    ///
    /// Fails when the lists disagree in length or any duration is malformed.
    pub fn build(
        file_name: impl Into<String>,
        header: CueHeader,
        titles: &[String],
        performers: &[String],
        durations_ms: &[String],
    ) -> Result<Self, CuesheetError> {
        if titles.len() != performers.len() || titles.len() != durations_ms.len() {
            return Err(CuesheetError::LengthMismatch {
                titles: titles.len(),
                performers: performers.len(),
                durations: durations_ms.len(),
            });
        }

        let indices = index_timecodes(durations_ms)?;
        let entries = titles
            .iter()
            .zip(performers)
            .zip(indices)
            .map(|((title, performer), index)| CueEntry {
                title: title.clone(),
                performer: performer.clone(),
                index,
            })
            .collect();

        Ok(Self {
            file_name: file_name.into(),
            header,
            entries,
        })
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        // Writing into a String cannot fail
        let _ = writeln!(
            out,
            "REM COMMENT {}",
            quoted(&format!("tapeshelf {}", env!("CARGO_PKG_VERSION")))
        );
        let _ = writeln!(out, "FILE {} WAVE", quoted(&self.file_name));
        for (label, value) in self.header.labels() {
            let _ = writeln!(out, "{} {}", label, quoted(value.unwrap_or_default()));
        }

        for (i, entry) in self.entries.iter().enumerate() {
            let _ = writeln!(out, "  TRACK {:02} AUDIO", i + 1);
            let _ = writeln!(out, "    TITLE {}", quoted(&entry.title));
            let _ = writeln!(out, "    PERFORMER {}", quoted(&entry.performer));
            let _ = writeln!(out, "    INDEX 01 {}", entry.index);
        }

        out
    }
}
